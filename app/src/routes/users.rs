use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{core::state::AppState, handlers::users::get_users};

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_users))
}
