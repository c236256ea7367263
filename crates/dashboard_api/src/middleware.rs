//! Request middleware.

use axum::{extract::Request, middleware::Next, response::Response};

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Header carrying the generated request ID back to the client.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs request start and completion under a generated request ID.
///
/// The ID is also returned in the `x-request-id` response header.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
