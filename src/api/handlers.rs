//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{Html, Json},
};
use tracing::{error, info, warn};

use crate::{
    error::LogError,
    models::LogBehaviorRequest,
    state::AppState,
};
use super::responses::{ApiError, HealthResponse, MessageResponse, StudentsResponse};

/// Handle GET /api/get-students - Return the roster column
pub async fn get_students_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StudentsResponse>, ApiError> {
    match state.roster.fetch().await {
        Ok(students) => {
            info!("Roster requested - {} students", students.len());
            Ok(Json(StudentsResponse { students }))
        }
        Err(e) => {
            error!("Error fetching student list: {}", e);
            Err(ApiError::roster_unavailable())
        }
    }
}

/// Handle POST /api/log-behavior - Append one interval to the log sheet
pub async fn log_behavior_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = parse_log_request(&body)?;

    match state.log_appender.append_request(request).await {
        Ok(()) => Ok(Json(MessageResponse::logged())),
        Err(LogError::MissingField(field)) => {
            warn!("Rejected log request: missing {}", field);
            Err(ApiError::missing_fields())
        }
        Err(e) => {
            error!("Error logging data: {}", e);
            Err(e.into())
        }
    }
}

/// An empty body counts as a request with every field missing
fn parse_log_request(body: &[u8]) -> Result<LogBehaviorRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LogBehaviorRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected log request: malformed body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })
}

/// Handle GET / - Serve the browser view
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
