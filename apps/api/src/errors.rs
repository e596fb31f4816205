use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Generation failures never surface here; the copywriter masks them with a
/// templated fallback.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::MalformedBody(rejection) => {
                tracing::warn!("Rejected request body: {rejection}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Invalid request body",
                        "detail": rejection.body_text()
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
