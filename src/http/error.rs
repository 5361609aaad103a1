use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::app::error::StoreError;
use crate::domain::validation::FieldViolation;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    details: Vec<FieldViolation>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldViolation>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn validation(details: Vec<FieldViolation>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "validation failed".to_string(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Maps a service failure onto its response, logging storage faults with `action` as context.
    pub fn from_store(err: StoreError, action: &'static str) -> Self {
        match err {
            StoreError::Validation(details) => Self::validation(details),
            StoreError::NotFound { entity, .. } => Self::not_found(format!("{} not found", entity)),
            StoreError::Storage(err) => {
                tracing::error!(error = ?err, "failed to {}", action);
                Self::internal(format!("failed to {}", action))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
