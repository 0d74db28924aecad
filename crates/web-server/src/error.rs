use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use dashboard::DashboardError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Core(#[from] CoreError),
    #[error("Invalid request: {0}")]
    Dashboard(#[from] DashboardError),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Core(_) | AppError::Dashboard(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            AppError::Internal(detail) => {
                tracing::error!(%detail, "Request failed.");
                "An internal error occurred".to_string()
            }
            other => {
                tracing::warn!(error = %other, "Rejected request.");
                other.to_string()
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
