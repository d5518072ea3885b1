//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::LogError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of `GET /api/get-students`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentsResponse {
    pub students: Vec<String>,
}

/// Success body of `POST /api/log-behavior`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn logged() -> Self {
        Self {
            message: "Data logged successfully".to_string(),
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            version: VERSION.to_string(),
            uptime,
        }
    }
}

/// Error answer of a handler. Only the generic message reaches the caller.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn roster_unavailable() -> Self {
        Self::Internal("Failed to fetch student list".to_string())
    }

    pub fn log_failed() -> Self {
        Self::Internal("Failed to log data".to_string())
    }

    pub fn missing_fields() -> Self {
        Self::BadRequest("Missing required fields".to_string())
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::MissingField(_) => Self::missing_fields(),
            LogError::Store(_) => Self::log_failed(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
