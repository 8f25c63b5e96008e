use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;

use crate::services::chase::ChaseError;

#[derive(Debug)]
pub enum APIError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<DbErr> for APIError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            e => Self::InternalServerError(e.to_string()),
        }
    }
}

impl From<ChaseError> for APIError {
    fn from(err: ChaseError) -> Self {
        match err {
            ChaseError::TaskNotFound(_) => Self::NotFound(err.to_string()),
            ChaseError::Store(e) => e.into(),
            ChaseError::Delivery(_) => Self::InternalServerError(err.to_string()),
        }
    }
}
