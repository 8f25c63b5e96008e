use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    core::state::AppState, models::user::Model as User, repos::users::UsersRepo,
    utils::response::APIError,
};

pub async fn get_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, APIError> {
    let users_repo = UsersRepo::new(state.database.clone());
    let users = users_repo.get_all().await?;

    Ok(Json(users))
}
