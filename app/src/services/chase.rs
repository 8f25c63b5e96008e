use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    models::{chase_log::ChaseType, task::Model as Task, user::Model as User},
    repos::{chase_logs::ChaseLogsRepo, tasks::TasksRepo},
    services::notifier::{Notify, NotifyError, ReminderPayload},
};

#[derive(Debug, Error)]
pub enum ChaseError {
    #[error("Task {0} not found")]
    TaskNotFound(i32),

    #[error(transparent)]
    Store(#[from] DbErr),

    #[error("Failed to deliver reminder: {0}")]
    Delivery(#[from] NotifyError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChaseDetail {
    pub task_id: i32,
    pub sent_to: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChaseReport {
    pub chased_count: usize,
    pub details: Vec<ChaseDetail>,
}

/// Drives the reminder workflow: build the message, append the audit log,
/// bump the task's chase metadata, then hand delivery to the notifier.
pub struct ChaseEngine {
    tasks: TasksRepo,
    logs: ChaseLogsRepo,
    notifier: Arc<dyn Notify>,
}

impl ChaseEngine {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notify>) -> Self {
        Self {
            tasks: TasksRepo::new(db.clone()),
            logs: ChaseLogsRepo::new(db),
            notifier,
        }
    }

    /// Single-task chase. The log row and chase metadata commit before
    /// delivery is attempted; a delivery failure surfaces as
    /// `ChaseError::Delivery` without rolling either back.
    pub async fn chase_task(
        &self,
        task_id: i32,
        now: DateTime<Utc>,
    ) -> Result<String, ChaseError> {
        let (task, assignee) = self
            .tasks
            .get_with_assignee(task_id)
            .await?
            .ok_or(ChaseError::TaskNotFound(task_id))?;

        let message = self
            .record(&task, &assignee, ChaseType::Manual, now)
            .await?;

        self.notifier
            .notify(&ReminderPayload {
                email: assignee.email.clone(),
                message: message.clone(),
                user_name: assignee.name.clone(),
                task_id: task.id,
            })
            .await?;

        Ok(message)
    }

    /// Batch overdue scan. Store writes run one task at a time; deliveries
    /// are fired together and awaited together, each outcome captured
    /// independently. `chased_count` counts tasks processed, not tasks
    /// successfully delivered.
    pub async fn check_overdue(&self, now: DateTime<Utc>) -> Result<ChaseReport, ChaseError> {
        let overdue = self.tasks.get_overdue(now.date_naive()).await?;
        info!("Overdue scan selected {} task(s)", overdue.len());

        let mut store_failures: Vec<ChaseDetail> = Vec::new();
        let mut recorded: Vec<(Task, User, String)> = Vec::new();

        // Phase 1: sequential log + metadata writes. A failed task is marked
        // failed and skipped for delivery; the rest continue.
        for (task, assignee) in overdue {
            match self.record(&task, &assignee, ChaseType::Auto, now).await {
                Ok(message) => recorded.push((task, assignee, message)),
                Err(e) => {
                    error!("Failed to record chase for task {}: {}", task.id, e);
                    store_failures.push(ChaseDetail {
                        task_id: task.id,
                        sent_to: assignee.email,
                        status: DeliveryStatus::Failed,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        // Phase 2: fire every delivery, await them all. One task's failure
        // never touches another's outcome.
        let deliveries = recorded.into_iter().map(|(task, assignee, message)| {
            let notifier = self.notifier.clone();
            async move {
                let payload = ReminderPayload {
                    email: assignee.email,
                    message,
                    user_name: assignee.name,
                    task_id: task.id,
                };

                match notifier.notify(&payload).await {
                    Ok(()) => ChaseDetail {
                        task_id: task.id,
                        sent_to: payload.email,
                        status: DeliveryStatus::Sent,
                        error: None,
                    },
                    Err(e) => {
                        error!("Failed to deliver reminder for task {}: {}", task.id, e);
                        ChaseDetail {
                            task_id: task.id,
                            sent_to: payload.email,
                            status: DeliveryStatus::Failed,
                            error: Some(e.to_string()),
                        }
                    }
                }
            }
        });

        let mut details = join_all(deliveries).await;
        details.extend(store_failures);

        Ok(ChaseReport {
            chased_count: details.len(),
            details,
        })
    }

    async fn record(
        &self,
        task: &Task,
        assignee: &User,
        chase_type: ChaseType,
        now: DateTime<Utc>,
    ) -> Result<String, DbErr> {
        let name = sanitize_fragment(&assignee.name);
        let title = sanitize_fragment(&task.title);
        let message = build_reminder(&chase_type, &name, &title, days_overdue(now, task.due_date));

        self.logs
            .append(task.id, chase_type, message.clone(), now)
            .await?;
        self.tasks.record_chase(task, now).await?;

        Ok(message)
    }
}

/// Calendar-day difference between "now" and the due date. Negative when the
/// task is not yet due.
fn days_overdue(now: DateTime<Utc>, due_date: NaiveDate) -> i64 {
    (now.date_naive() - due_date).num_days()
}

/// Strips characters that would corrupt the message or its downstream JSON
/// payload when user text is embedded: double quotes, newlines, carriage
/// returns and backslashes. Trims the result.
pub fn sanitize_fragment(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '"' | '\n' | '\r' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Three-branch day-offset phrasing, first match wins: overdue, due today,
/// not yet due. Automatic chases carry an automated prefix on top of the
/// same branches.
fn build_reminder(chase_type: &ChaseType, name: &str, title: &str, days_overdue: i64) -> String {
    let body = if days_overdue > 0 {
        format!(
            "Hi {name}, the task '{title}' is {days_overdue} days overdue. Can you please provide an update?"
        )
    } else if days_overdue == 0 {
        format!("Hi {name}, friendly reminder that '{title}' is due today!")
    } else {
        format!("Hi {name}, just checking in on '{title}'.")
    };

    match chase_type {
        ChaseType::Manual => body,
        ChaseType::Auto => format!("Automated Reminder: {body}"),
    }
}
