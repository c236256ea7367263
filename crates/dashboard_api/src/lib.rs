//! Dashboard HTTP API
//!
//! This crate serves the dashboard's topics over HTTP. Each topic is mounted
//! twice: as an HTML page under `/{name}` and as a JSON endpoint under
//! `/api/{name}`.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - Query parameter extraction and default organization fallback
//! - Page rendering through a shared [`RenderContext`]
//! - Error mapping from resolver failures to HTTP responses
//! - Routing, middleware and server configuration
//!
//! The dependency flows: HTTP API → topic resolvers → storage, never the
//! reverse.

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod server;
pub mod topics;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience
pub use config::{ConfigError, DashboardConfig};
pub use errors::{ApiError, ErrorDetails, ErrorResponse};
pub use render::RenderContext;
pub use server::{ApiConfig, ApiServer};
pub use topics::{issues::IssuesTopic, Topic, TopicRoutes};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Title shown in the header of every page.
pub const SITE_TITLE: &str = "Dashboard";

/// Application state shared across the dashboard-level handlers.
///
/// Topics carry their own state; this only holds what the index and health
/// endpoints need.
#[derive(Clone)]
pub struct AppState {
    /// Shared page renderer
    pub render: RenderContext,

    /// Registered topics, in display order
    pub topics: Arc<[Arc<dyn Topic>]>,
}

impl AppState {
    /// Create application state from a renderer and the topics to serve.
    pub fn new(render: RenderContext, topics: Vec<Arc<dyn Topic>>) -> Self {
        Self {
            render,
            topics: topics.into(),
        }
    }
}
