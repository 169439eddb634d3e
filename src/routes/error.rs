// JSON error responses for API handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::TargetError;
use crate::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0} is not monitored")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Session(SessionError::Target(e)) => {
                let status = match e {
                    TargetError::AlreadyMonitored(_) => StatusCode::CONFLICT,
                    TargetError::NotMonitored(_) => StatusCode::NOT_FOUND,
                    TargetError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
                };
                (status, e.code())
            }
            ApiError::Session(SessionError::Closed) => {
                tracing::warn!("API request after dashboard session closed");
                (StatusCode::SERVICE_UNAVAILABLE, "SESSION_CLOSED")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_MONITORED"),
        };

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}
