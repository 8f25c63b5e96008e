pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::{
    core::state::AppState,
    routes::{tasks::task_routes, users::user_routes},
    utils::global_error_handler::global_error_handler,
};

pub fn create_routers(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .nest("/tasks", task_routes())
        .nest("/users", user_routes())
        .layer(CorsLayer::permissive())
        .fallback(global_error_handler)
        .with_state(state)
}
