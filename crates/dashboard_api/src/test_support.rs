//! Shared fixtures for HTTP tests.

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use dashboard_storage::{
    EntityStore, InMemoryStore, Issue, IssueFilter, IssueVisitor, Lookup, OrgId, Organization,
    ReadThroughCache, RepoId, Repository, RequestContext, Seed, StorageError, StorageResult, User,
    UserId,
};
use issues_topic::IssuesResolver;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::{
    config::IssuesTopicConfig, routes::create_router, AppState, IssuesTopic, RenderContext,
    Topic, SITE_TITLE,
};

fn issue(number: i64, title: &str, state: &str, author: &str, assignees: &[&str]) -> Issue {
    Issue {
        org_id: OrgId::new("O_1"),
        repo_id: RepoId::new("R_1"),
        number,
        title: title.to_string(),
        state: state.to_string(),
        author_id: UserId::new(author),
        assignee_ids: assignees.iter().map(|a| UserId::new(*a)).collect(),
    }
}

/// Org `istio` owning repository `istio` with three issues, and org
/// `kubernetes` without an `istio` repository.
pub fn seed() -> Seed {
    Seed {
        organizations: vec![
            Organization {
                org_id: OrgId::new("O_1"),
                login: "istio".to_string(),
            },
            Organization {
                org_id: OrgId::new("O_2"),
                login: "kubernetes".to_string(),
            },
        ],
        repositories: vec![Repository {
            org_id: OrgId::new("O_1"),
            repo_id: RepoId::new("R_1"),
            name: "istio".to_string(),
        }],
        users: vec![
            User {
                user_id: UserId::new("U_1"),
                login: "alice".to_string(),
            },
            User {
                user_id: UserId::new("U_2"),
                login: "bob".to_string(),
            },
        ],
        issues: vec![
            issue(1, "Flaky test", "open", "U_1", &["U_2"]),
            issue(2, "Fixed crash", "closed", "U_2", &[]),
            issue(3, &"long title ".repeat(10), "open", "U_9", &["U_1", "U_2"]),
        ],
    }
}

/// Store whose every operation fails.
pub struct BrokenStore;

fn offline() -> StorageError {
    StorageError::Unavailable("database offline".to_string())
}

#[async_trait]
impl EntityStore for BrokenStore {
    async fn read_org_by_login(
        &self,
        _ctx: &RequestContext,
        _login: &str,
    ) -> StorageResult<Lookup<Organization>> {
        Err(offline())
    }

    async fn read_repo_by_name(
        &self,
        _ctx: &RequestContext,
        _org_id: &OrgId,
        _name: &str,
    ) -> StorageResult<Lookup<Repository>> {
        Err(offline())
    }

    async fn read_user(
        &self,
        _ctx: &RequestContext,
        _user_id: &UserId,
    ) -> StorageResult<Lookup<User>> {
        Err(offline())
    }

    async fn scan_issues(
        &self,
        _ctx: &RequestContext,
        _org_id: &OrgId,
        _repo_id: &RepoId,
        _filter: IssueFilter,
        _visit: &mut IssueVisitor<'_>,
    ) -> StorageResult<()> {
        Err(offline())
    }
}

/// Issues topic over `store` with the given options.
pub fn topic_over<S: EntityStore + 'static>(
    store: S,
    options: IssuesTopicConfig,
) -> Arc<IssuesTopic> {
    let store = Arc::new(store);
    let cache = Arc::new(ReadThroughCache::with_default_ttl(store.clone()));
    let resolver = IssuesResolver::new(cache, store, options.resolver.clone());
    let render = RenderContext::new(SITE_TITLE).unwrap();
    Arc::new(IssuesTopic::new(resolver, render, options).unwrap())
}

/// Full router serving `topic`.
pub fn app_with(topic: Arc<IssuesTopic>) -> Router {
    let render = RenderContext::new(SITE_TITLE).unwrap();
    let topic: Arc<dyn Topic> = topic;
    create_router(AppState::new(render, vec![topic]), Duration::from_secs(30))
}

/// Full router over the seeded store with default options.
pub fn seeded_app() -> Router {
    app_with(topic_over(
        InMemoryStore::from_seed(seed()),
        IssuesTopicConfig::default(),
    ))
}

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
