//! The issues topic.
//!
//! - GET /issues?org=<login>      HTML table of the org's issues
//! - GET /api/issues?org=<login>  JSON array of issue summaries
//!
//! A missing or empty `org` falls back to the configured default for each
//! surface.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
};
use dashboard_storage::RequestContext;
use handlebars::Handlebars;
use issues_topic::{IssueSummary, IssuesResolver, ProjectionPolicy};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    config::IssuesTopicConfig,
    errors::ApiError,
    render::RenderContext,
    topics::{Topic, TopicRoutes},
};

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;

const PAGE_TEMPLATE: &str = "issues";

/// Query parameters accepted by both issues endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IssuesQuery {
    /// Organization login
    pub org: Option<String>,
}

impl IssuesQuery {
    /// The requested organization, or `default` when absent or empty.
    pub fn org_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.org.as_deref() {
            Some(org) if !org.is_empty() => org,
            _ => default,
        }
    }
}

/// Lists the issues of an organization's repository.
pub struct IssuesTopic {
    resolver: IssuesResolver,
    render: RenderContext,
    options: IssuesTopicConfig,
    page: Handlebars<'static>,
}

impl IssuesTopic {
    /// Create the topic.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Template`] if the page template fails to parse.
    pub fn new(
        resolver: IssuesResolver,
        render: RenderContext,
        options: IssuesTopicConfig,
    ) -> Result<Self, ApiError> {
        let mut page = Handlebars::new();
        page.register_template_string(PAGE_TEMPLATE, include_str!("../../templates/issues.html"))?;

        Ok(Self {
            resolver,
            render,
            options,
            page,
        })
    }

    fn render_page(&self, org: &str, issues: &[IssueSummary]) -> Result<String, ApiError> {
        let data = json!({
            "org": org,
            "repo": self.resolver.config().repository,
            "resolved": self.resolver.config().projection == ProjectionPolicy::DisplayResolved,
            "count": issues.len(),
            "issues": issues,
        });
        Ok(self.page.render(PAGE_TEMPLATE, &data)?)
    }
}

impl Topic for IssuesTopic {
    fn name(&self) -> &'static str {
        "issues"
    }

    fn title(&self) -> &'static str {
        "Issues"
    }

    fn description(&self) -> &'static str {
        "Information on new and old issues."
    }

    fn routes(self: Arc<Self>) -> TopicRoutes {
        TopicRoutes {
            html: get(issues_html).with_state(self.clone()),
            api: get(issues_json).with_state(self),
        }
    }
}

/// GET /issues
///
/// Returns the rendered error page on failure, never a partial table.
#[instrument(skip(topic), fields(org = tracing::field::Empty))]
pub async fn issues_html(
    State(topic): State<Arc<IssuesTopic>>,
    Query(query): Query<IssuesQuery>,
) -> Response {
    let org = query.org_or(&topic.options.html_default_org);
    tracing::Span::current().record("org", org);

    let ctx = RequestContext::new();
    let _cancel = ctx.cancel_on_drop();

    let issues = match topic.resolver.resolve(&ctx, org).await {
        Ok(issues) => issues,
        Err(e) => return topic.render.render_html_error(&e.into()),
    };

    match topic.render_page(org, &issues) {
        Ok(content) => topic.render.render_html(topic.title(), content),
        Err(e) => topic.render.render_html_error(&e),
    }
}

/// GET /api/issues
#[instrument(skip(topic), fields(org = tracing::field::Empty))]
pub async fn issues_json(
    State(topic): State<Arc<IssuesTopic>>,
    Query(query): Query<IssuesQuery>,
) -> Result<Response, ApiError> {
    let org = query.org_or(&topic.options.api_default_org);
    tracing::Span::current().record("org", org);

    let ctx = RequestContext::new();
    let _cancel = ctx.cancel_on_drop();

    let issues = topic.resolver.resolve(&ctx, org).await?;

    Ok(topic.render.render_json(StatusCode::OK, &issues))
}
