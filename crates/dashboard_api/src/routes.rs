//! HTTP routing configuration
//!
//! # Route Structure
//!
//! - GET /                 - Topic index
//! - GET /api/health       - Health check
//! - GET /{topic}[/]       - Topic HTML page
//! - GET /api/{topic}[/]   - Topic JSON endpoint

use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete router with all routes configured.
///
/// This function sets up:
/// - The index and health endpoints
/// - Every registered topic under `/{name}` and `/api/{name}`
/// - CORS configuration
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        // Cache preflight responses for 1 hour
        .max_age(Duration::from_secs(3600));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_response(DefaultOnResponse::new().include_headers(true));

    let timeout_layer = TimeoutLayer::new(request_timeout);

    let topics = state.topics.clone();

    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health_check))
        .with_state(state);

    for topic in topics.iter() {
        let name = topic.name();
        let routes = topic.clone().routes();
        tracing::debug!(topic = name, "Mounting topic");

        router = router
            .route(&format!("/{}", name), routes.html.clone())
            .route(&format!("/{}/", name), routes.html)
            .route(&format!("/api/{}", name), routes.api.clone())
            .route(&format!("/api/{}/", name), routes.api);
    }

    router
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .layer(cors)
}
