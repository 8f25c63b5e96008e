use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chaser::{
    config::config::Config,
    core::server::create_server,
    services::notifier::{Notify, NotifyError, ReminderPayload},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

/// Test double for the webhook: records every payload and can be told to
/// fail delivery for specific task ids.
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<ReminderPayload>>,
    fail_for: Mutex<HashSet<i32>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_for_task(&self, task_id: i32) {
        self.fail_for.lock().unwrap().insert(task_id);
    }

    pub fn sent_payloads(&self) -> Vec<ReminderPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notify for RecordingNotifier {
    async fn notify(&self, payload: &ReminderPayload) -> Result<(), NotifyError> {
        if self.fail_for.lock().unwrap().contains(&payload.task_id) {
            return Err(NotifyError::Status(StatusCode::BAD_GATEWAY));
        }

        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn setup() -> TestApp {
    let config = Config {
        webhook_url: "http://localhost:9/webhook".to_string(),
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        server_ip: "127.0.0.1".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let notifier = Arc::new(RecordingNotifier::new());
    let (router, db) = create_server(config, notifier.clone())
        .await
        .expect("Failed to build test server");

    TestApp {
        router,
        db,
        notifier,
    }
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

pub async fn create_task(router: &Router, title: &str, assignee_id: i32, due_date: &str) -> i32 {
    let (status, body) = send(
        router,
        "POST",
        "/tasks",
        Some(serde_json::json!({
            "title": title,
            "description": "integration test task",
            "assignee_id": assignee_id,
            "due_date": due_date,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_i64().unwrap() as i32
}

/// Fetch one task's JSON from GET /tasks by id.
pub async fn get_task(router: &Router, task_id: i32) -> Option<Value> {
    let (status, body) = send(router, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);

    body.as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"].as_i64() == Some(task_id as i64))
        .cloned()
}

pub fn days_from_today(offset: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(offset)).to_string()
}
