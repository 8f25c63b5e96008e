use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::tasks::{
        chase_task, check_overdue, create_task, delete_task, get_tasks, update_status,
    },
};

pub fn task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route("/check-overdue", get(check_overdue))
        .route("/:id/chase", post(chase_task))
        .route("/:id/status", patch(update_status))
        .route("/:id", delete(delete_task))
}
