//! In-memory entity store.
//!
//! Holds every entity in hash maps behind a `tokio::sync::RwLock`. Issues are
//! kept per repository in insertion order, which is the order scans yield
//! them. Suitable for tests, local development and small fixed data sets
//! loaded from a JSON seed document.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{
    EntityStore, Issue, IssueFilter, IssueVisitor, Lookup, OrgId, Organization, RepoId,
    Repository, RequestContext, StorageError, StorageResult, User, UserId,
};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

/// Seed document used to populate an [`InMemoryStore`].
///
/// # Example
///
/// ```json
/// {
///   "organizations": [{ "org_id": "O_1", "login": "istio" }],
///   "repositories": [{ "org_id": "O_1", "repo_id": "R_1", "name": "istio" }],
///   "users": [{ "user_id": "U_1", "login": "alice" }],
///   "issues": [{
///     "org_id": "O_1", "repo_id": "R_1", "number": 1,
///     "title": "Flaky test", "state": "open",
///     "author_id": "U_1", "assignee_ids": ["U_1"]
///   }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Default)]
struct Inner {
    orgs: HashMap<OrgId, Organization>,
    repos: HashMap<RepoId, Repository>,
    users: HashMap<UserId, User>,
    issues: HashMap<(OrgId, RepoId), Vec<Issue>>,
}

/// Entity store backed by process memory.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from a seed document.
    pub fn from_seed(seed: Seed) -> Self {
        let mut inner = Inner::default();
        for org in seed.organizations {
            inner.orgs.insert(org.org_id.clone(), org);
        }
        for repo in seed.repositories {
            inner.repos.insert(repo.repo_id.clone(), repo);
        }
        for user in seed.users {
            inner.users.insert(user.user_id.clone(), user);
        }
        for issue in seed.issues {
            upsert_issue(&mut inner, issue);
        }

        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Parse a JSON seed document and build a store from it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] if the document is not a valid seed.
    pub fn from_seed_json(json: &str) -> StorageResult<Self> {
        let seed: Seed =
            serde_json::from_str(json).map_err(|e| StorageError::Decode(e.to_string()))?;
        Ok(Self::from_seed(seed))
    }

    /// Insert or replace an organization.
    pub async fn insert_org(&self, org: Organization) {
        self.inner.write().await.orgs.insert(org.org_id.clone(), org);
    }

    /// Insert or replace a repository.
    pub async fn insert_repo(&self, repo: Repository) {
        self.inner
            .write()
            .await
            .repos
            .insert(repo.repo_id.clone(), repo);
    }

    /// Insert or replace a user.
    pub async fn insert_user(&self, user: User) {
        self.inner
            .write()
            .await
            .users
            .insert(user.user_id.clone(), user);
    }

    /// Insert an issue, replacing any issue with the same number in the
    /// same repository while keeping its position.
    pub async fn insert_issue(&self, issue: Issue) {
        upsert_issue(&mut *self.inner.write().await, issue);
    }
}

fn upsert_issue(inner: &mut Inner, issue: Issue) {
    let issues = inner
        .issues
        .entry((issue.org_id.clone(), issue.repo_id.clone()))
        .or_default();
    match issues.iter_mut().find(|i| i.number == issue.number) {
        Some(existing) => *existing = issue,
        None => issues.push(issue),
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    #[instrument(skip(self, ctx))]
    async fn read_org_by_login(
        &self,
        ctx: &RequestContext,
        login: &str,
    ) -> StorageResult<Lookup<Organization>> {
        ctx.check()?;
        let inner = self.inner.read().await;
        Ok(inner
            .orgs
            .values()
            .find(|org| org.login == login)
            .cloned()
            .into())
    }

    #[instrument(skip(self, ctx), fields(org_id = %org_id))]
    async fn read_repo_by_name(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        name: &str,
    ) -> StorageResult<Lookup<Repository>> {
        ctx.check()?;
        let inner = self.inner.read().await;
        Ok(inner
            .repos
            .values()
            .find(|repo| &repo.org_id == org_id && repo.name == name)
            .cloned()
            .into())
    }

    #[instrument(skip(self, ctx), fields(user_id = %user_id))]
    async fn read_user(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
    ) -> StorageResult<Lookup<User>> {
        ctx.check()?;
        let inner = self.inner.read().await;
        Ok(inner.users.get(user_id).cloned().into())
    }

    #[instrument(skip(self, ctx, visit), fields(org_id = %org_id, repo_id = %repo_id))]
    async fn scan_issues(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        repo_id: &RepoId,
        filter: IssueFilter,
        visit: &mut IssueVisitor<'_>,
    ) -> StorageResult<()> {
        ctx.check()?;
        let inner = self.inner.read().await;
        let Some(issues) = inner.issues.get(&(org_id.clone(), repo_id.clone())) else {
            debug!("No issues stored for repository");
            return Ok(());
        };

        let mut visited = 0usize;
        for issue in issues.iter().filter(|i| filter.matches(i)) {
            ctx.check()?;
            visit(issue)?;
            visited += 1;
        }

        debug!(visited, ?filter, "Issue scan complete");
        Ok(())
    }
}
