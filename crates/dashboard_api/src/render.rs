//! Shared page rendering.
//!
//! Every topic renders its own page body and hands it to the
//! [`RenderContext`], which wraps it in the common layout. Errors are rendered
//! the same way so that HTML clients never see a JSON error body.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::errors::{log_error, ApiError};
use crate::Topic;

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

const LAYOUT_TEMPLATE: &str = "layout";
const ERROR_TEMPLATE: &str = "error";
const INDEX_TEMPLATE: &str = "index";

/// Renders full HTML pages, HTML error pages and JSON bodies.
///
/// Cheap to clone; the template registry is shared.
#[derive(Clone)]
pub struct RenderContext {
    registry: Arc<Handlebars<'static>>,
    site_title: Arc<str>,
}

impl RenderContext {
    /// Create a renderer with the built-in layout, error and index templates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Template`] if a built-in template fails to parse.
    pub fn new(site_title: impl Into<String>) -> Result<Self, ApiError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(
            LAYOUT_TEMPLATE,
            include_str!("../templates/layout.html"),
        )?;
        registry.register_template_string(ERROR_TEMPLATE, include_str!("../templates/error.html"))?;
        registry.register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;

        Ok(Self {
            registry: Arc::new(registry),
            site_title: Arc::from(site_title.into()),
        })
    }

    /// Title shown in the header of every page.
    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    /// Wrap already rendered `content` in the layout and respond with 200.
    pub fn render_html(&self, page_title: &str, content: String) -> Response {
        match self.layout(page_title, &content) {
            Ok(page) => (StatusCode::OK, Html(page)).into_response(),
            Err(e) => self.render_html_error(&e),
        }
    }

    /// Render `err` as an HTML error page carrying the error's status.
    pub fn render_html_error(&self, err: &ApiError) -> Response {
        let (status, body) = err.to_response_parts();
        log_error(err, status);

        let data = json!({
            "status": status.as_u16(),
            "reason": status.canonical_reason().unwrap_or_default(),
            "message": body.error.message,
        });

        let page = self
            .registry
            .render(ERROR_TEMPLATE, &data)
            .map_err(ApiError::from)
            .and_then(|content| self.layout("Error", &content));

        match page {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, body.error.message).into_response()
            }
        }
    }

    /// Serialize `body` as JSON with the given status.
    pub fn render_json<T: Serialize>(&self, status: StatusCode, body: &T) -> Response {
        (status, Json(body)).into_response()
    }

    /// Render the index page listing `topics`.
    pub fn render_index(&self, topics: &[Arc<dyn Topic>]) -> Response {
        let entries: Vec<_> = topics
            .iter()
            .map(|t| {
                json!({
                    "name": t.name(),
                    "title": t.title(),
                    "description": t.description(),
                })
            })
            .collect();

        match self.registry.render(INDEX_TEMPLATE, &json!({ "topics": entries })) {
            Ok(content) => self.render_html("Topics", content),
            Err(e) => self.render_html_error(&e.into()),
        }
    }

    fn layout(&self, page_title: &str, content: &str) -> Result<String, ApiError> {
        let data = json!({
            "site_title": self.site_title.as_ref(),
            "page_title": page_title,
            "content": content,
        });
        Ok(self.registry.render(LAYOUT_TEMPLATE, &data)?)
    }
}
