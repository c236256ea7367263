//! Error handling and HTTP error conversion
//!
//! This module defines how resolver and rendering errors are translated to
//! HTTP error responses. The conversion happens at the HTTP boundary and
//! never exposes backend failure details to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use issues_topic::ResolveError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all JSON API errors.
///
/// All error responses follow this consistent structure to provide
/// machine-readable error codes and human-readable messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Errors surfaced by the HTTP layer.
///
/// Handlers return `Result<_, ApiError>` and rely on `?` to convert resolver
/// and rendering failures.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler() -> Result<Json<Vec<IssueSummary>>, ApiError> {
///     let issues = resolver.resolve(&ctx, org).await?;
///     Ok(Json(issues))
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),
}

impl ApiError {
    /// Status code and client-facing body for this error.
    pub fn to_response_parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Resolve(err) => convert_resolve_error(err),
            ApiError::Render(_) | ApiError::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response("RenderError", "An internal error occurred", None),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_response_parts();

        log_error(&self, status);

        (status, Json(error_response)).into_response()
    }
}

/// Convert a resolver error to HTTP status code and error response.
///
/// Lookup and scan failures keep the storage cause out of the body; it is
/// only logged.
pub fn convert_resolve_error(error: &ResolveError) -> (StatusCode, ErrorResponse) {
    match error {
        ResolveError::NotFound { entity, key } => (
            StatusCode::NOT_FOUND,
            error_response(
                "NotFound",
                error.to_string(),
                Some(json!({ "entity": entity.to_string(), "key": key })),
            ),
        ),
        ResolveError::LookupFailure { entity, key, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_response(
                "LookupFailure",
                format!("Unable to get information on {} {}", entity, key),
                Some(json!({ "entity": entity.to_string(), "key": key })),
            ),
        ),
        ResolveError::ScanFailure { repository, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_response(
                "ScanFailure",
                format!("Unable to read issues of repository {}", repository),
                Some(json!({ "repository": repository })),
            ),
        ),
        ResolveError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_response("Cancelled", "The request was cancelled", None),
        ),
    }
}

fn error_response(
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> ErrorResponse {
    ErrorResponse {
        error: ErrorDetails {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    }
}

/// Log error with appropriate level based on HTTP status
pub(crate) fn log_error(error: &ApiError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = %status, error = %error, "API error");
    } else if status.is_client_error() {
        tracing::warn!(status = %status, error = %error, "API error");
    } else {
        tracing::info!(status = %status, error = %error, "API error");
    }
}
