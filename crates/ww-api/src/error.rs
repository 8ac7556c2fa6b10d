//! HTTP mapping for failures.
//!
//! Every error body has the shape `{"error": "..."}`. Storage failures
//! always carry the same fixed message; the cause only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use ww_core::error::AppError;

/// Body returned for any internal failure of the message store endpoint.
pub const STORE_FAILURE_MESSAGE: &str = "Failed to process wish";

#[derive(Debug)]
pub enum ApiError {
    /// The request body does not match `{name, message}` or breaks a bound.
    BadRequest(String),
    /// The store failed; the cause is logged, never returned.
    Store(anyhow::Error),
    /// A page could not be rendered.
    Render(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::Render(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Store(e) => {
                error!(error = %e, "message store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": STORE_FAILURE_MESSAGE })),
                )
                    .into_response()
            }
            ApiError::Render(msg) => {
                error!(error = %msg, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to render page" })),
                )
                    .into_response()
            }
        }
    }
}
