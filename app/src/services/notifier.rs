use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Payload shape the webhook endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderPayload {
    pub email: String,
    pub message: String,
    pub user_name: String,
    pub task_id: i32,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(StatusCode),
}

/// Delivery seam for reminders. One attempt per call, no retry; the caller
/// decides what a failure means.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, payload: &ReminderPayload) -> Result<(), NotifyError>;
}

pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl Notify for WebhookNotifier {
    async fn notify(&self, payload: &ReminderPayload) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }

        info!(
            "Sent reminder webhook: to={} task_id={}",
            payload.email, payload.task_id
        );

        Ok(())
    }
}
