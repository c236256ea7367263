//! Dashboard topics.
//!
//! A topic is one page of the dashboard together with its JSON endpoint.

use axum::routing::MethodRouter;
use std::sync::Arc;

pub mod issues;

/// Handlers of a topic, ready to be mounted.
pub struct TopicRoutes {
    /// Served under `/{name}`
    pub html: MethodRouter,

    /// Served under `/api/{name}`
    pub api: MethodRouter,
}

/// A dashboard topic.
pub trait Topic: Send + Sync {
    /// Path segment the topic is mounted under.
    fn name(&self) -> &'static str;

    /// Human-readable title.
    fn title(&self) -> &'static str;

    /// One-line description shown on the index page.
    fn description(&self) -> &'static str;

    /// Build the topic's HTML and JSON handlers.
    fn routes(self: Arc<Self>) -> TopicRoutes;
}
