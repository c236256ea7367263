//! Dashboard-level request handlers.
//!
//! Topic handlers live with their topic under [`crate::topics`].

use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// GET /
///
/// Lists the registered topics.
pub async fn index(State(state): State<AppState>) -> Response {
    state.render.render_index(&state.topics)
}

/// GET /api/health
///
/// Health check endpoint for monitoring and load balancers.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
