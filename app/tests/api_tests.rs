use axum::http::StatusCode;
use chaser::repos::chase_logs::ChaseLogsRepo;

mod common;

use common::{create_task, days_from_today, get_task, send, setup};

#[tokio::test]
async fn seeds_default_users_and_lists_them() {
    let app = setup().await;

    let (status, body) = send(&app.router, "GET", "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Alice Engineer");
    assert_eq!(users[0]["email"], "alice@example.com");
    assert_eq!(users[0]["role"], "user");
    assert_eq!(users[1]["email"], "bob@example.com");
}

#[tokio::test]
async fn lists_tasks_with_assignees_ordered_by_due_date() {
    let app = setup().await;

    let later = create_task(&app.router, "Later task", 2, "2030-06-01").await;
    let sooner = create_task(&app.router, "Sooner task", 1, "2030-01-01").await;

    let (status, body) = send(&app.router, "GET", "/tasks", None).await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 2);

    assert_eq!(tasks[0]["id"].as_i64(), Some(sooner as i64));
    assert_eq!(tasks[0]["due_date"], "2030-01-01");
    assert_eq!(tasks[0]["status"], "PENDING");
    assert_eq!(tasks[0]["chase_count"], 0);
    assert_eq!(tasks[0]["assignee_name"], "Alice Engineer");
    assert_eq!(tasks[0]["assignee_email"], "alice@example.com");

    assert_eq!(tasks[1]["id"].as_i64(), Some(later as i64));
    assert_eq!(tasks[1]["assignee_name"], "Bob Manager");
}

#[tokio::test]
async fn manual_chase_reports_exact_day_count() {
    let app = setup().await;

    let task_id = create_task(&app.router, "Review doc", 1, &days_from_today(-3)).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/tasks/{task_id}/chase"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let sent_message = body["sent_message"].as_str().unwrap();
    assert!(sent_message.contains("3 days overdue"), "{sent_message}");

    // Delivered payload carries the assignee and task context.
    let payloads = app.notifier.sent_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].email, "alice@example.com");
    assert_eq!(payloads[0].user_name, "Alice Engineer");
    assert_eq!(payloads[0].task_id, task_id);

    // Chase metadata and audit log were recorded.
    let task = get_task(&app.router, task_id).await.unwrap();
    assert_eq!(task["chase_count"], 1);
    assert!(!task["last_chased_at"].is_null());

    let logs = ChaseLogsRepo::new(app.db.clone())
        .get_all_for_task(task_id)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message_sent, sent_message);
}

#[tokio::test]
async fn manual_chase_of_unknown_task_is_404() {
    let app = setup().await;

    let (status, body) = send(&app.router, "POST", "/tasks/9999/chase", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn manual_chase_records_even_when_delivery_fails() {
    let app = setup().await;

    let task_id = create_task(&app.router, "Unreachable chase", 1, &days_from_today(-1)).await;
    app.notifier.fail_for_task(task_id);

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/tasks/{task_id}/chase"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    // The chase was recorded before delivery was attempted and is not
    // rolled back on delivery failure.
    let task = get_task(&app.router, task_id).await.unwrap();
    assert_eq!(task["chase_count"], 1);

    let logs = ChaseLogsRepo::new(app.db.clone())
        .get_all_for_task(task_id)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
}

#[tokio::test]
async fn rejects_unknown_status_values() {
    let app = setup().await;

    let task_id = create_task(&app.router, "Status check", 1, "2030-01-01").await;

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/tasks/{task_id}/status"),
        Some(serde_json::json!({ "status": "ARCHIVED" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Store unchanged.
    let task = get_task(&app.router, task_id).await.unwrap();
    assert_eq!(task["status"], "PENDING");
}

#[tokio::test]
async fn toggles_status_both_ways() {
    let app = setup().await;

    let task_id = create_task(&app.router, "Toggle me", 1, "2030-01-01").await;

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/tasks/{task_id}/status"),
        Some(serde_json::json!({ "status": "COMPLETED" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["taskId"].as_i64(), Some(task_id as i64));
    assert_eq!(body["status"], "COMPLETED");

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/tasks/{task_id}/status"),
        Some(serde_json::json!({ "status": "PENDING" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING");
}

#[tokio::test]
async fn delete_removes_task_and_its_logs() {
    let app = setup().await;

    let task_id = create_task(&app.router, "Doomed task", 1, &days_from_today(-2)).await;

    // Two chases, two log rows.
    for _ in 0..2 {
        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/tasks/{task_id}/chase"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let logs_repo = ChaseLogsRepo::new(app.db.clone());
    assert_eq!(logs_repo.get_all_for_task(task_id).await.unwrap().len(), 2);

    let (status, body) = send(&app.router, "DELETE", &format!("/tasks/{task_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert!(get_task(&app.router, task_id).await.is_none());
    assert!(logs_repo.get_all_for_task(task_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_unknown_task_is_404() {
    let app = setup().await;

    let (status, body) = send(&app.router, "DELETE", "/tasks/4242", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
