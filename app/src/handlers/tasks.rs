use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    core::state::AppState,
    models::task::{Model as Task, TaskStatus},
    repos::{chase_logs::ChaseLogsRepo, tasks::TasksRepo},
    services::chase::{ChaseDetail, ChaseEngine},
    utils::response::APIError,
};

#[derive(Debug, Serialize)]
pub struct TaskWithAssignee {
    #[serde(flatten)]
    pub task: Task,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
}

pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskWithAssignee>>, APIError> {
    let tasks_repo = TasksRepo::new(state.database.clone());
    let tasks = tasks_repo.get_all_with_assignees().await?;

    let tasks = tasks
        .into_iter()
        .map(|(task, assignee)| TaskWithAssignee {
            task,
            assignee_name: assignee.as_ref().map(|a| a.name.clone()),
            assignee_email: assignee.map(|a| a.email),
        })
        .collect();

    Ok(Json(tasks))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: i32,
    pub due_date: NaiveDate,
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), APIError> {
    let tasks_repo = TasksRepo::new(state.database.clone());
    let task = tasks_repo
        .create(
            payload.title,
            payload.description,
            payload.assignee_id,
            payload.due_date,
        )
        .await
        .map_err(|e| {
            error!("Failed to create task: {}", e);
            APIError::from(e)
        })?;

    info!("Created task {} due {}", task.id, task.due_date);

    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Debug, Serialize)]
pub struct ChaseResponse {
    pub success: bool,
    pub message: String,
    pub sent_message: String,
}

pub async fn chase_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Json<ChaseResponse>, APIError> {
    let engine = ChaseEngine::new(state.database.clone(), state.notifier.clone());
    let sent_message = engine.chase_task(task_id, Utc::now()).await?;

    Ok(Json(ChaseResponse {
        success: true,
        message: "Chase initiated".to_string(),
        sent_message,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    #[serde(rename = "taskId")]
    pub task_id: i32,
    pub status: TaskStatus,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, APIError> {
    let status = TaskStatus::parse(&payload.status)
        .ok_or_else(|| APIError::BadRequest(format!("Invalid status: {}", payload.status)))?;

    let tasks_repo = TasksRepo::new(state.database.clone());
    let task = tasks_repo.change_status(task_id, status).await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        task_id: task.id,
        status: task.status,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
    pub message: String,
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Json<DeleteTaskResponse>, APIError> {
    let logs_repo = ChaseLogsRepo::new(state.database.clone());
    let tasks_repo = TasksRepo::new(state.database.clone());

    let removed_logs = logs_repo.delete_for_task(task_id).await?;
    tasks_repo.delete(task_id).await?;

    info!("Deleted task {} and {} log(s)", task_id, removed_logs);

    Ok(Json(DeleteTaskResponse {
        success: true,
        message: "Task deleted".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CheckOverdueResponse {
    pub success: bool,
    pub chased_count: usize,
    pub details: Vec<ChaseDetail>,
}

pub async fn check_overdue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CheckOverdueResponse>, APIError> {
    let engine = ChaseEngine::new(state.database.clone(), state.notifier.clone());
    let report = engine.check_overdue(Utc::now()).await?;

    Ok(Json(CheckOverdueResponse {
        success: true,
        chased_count: report.chased_count,
        details: report.details,
    }))
}
