//! Test doubles for the cache and store contracts.

use async_trait::async_trait;
use dashboard_storage::{
    EntityStore, Issue, IssueFilter, IssueVisitor, Lookup, OrgId, Organization, RepoId,
    Repository, RequestContext, ResolutionCache, StorageError, StorageResult, User, UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ORG_ID: &str = "O_istio";
pub const REPO_ID: &str = "R_istio";

/// Cache double with configurable entities and failures.
#[derive(Default)]
pub struct FakeCache {
    pub orgs: HashMap<String, Organization>,
    pub repos: HashMap<(OrgId, String), Repository>,
    pub users: HashMap<UserId, User>,
    pub failing_orgs: HashSet<String>,
    pub failing_repos: HashSet<String>,
    pub failing_users: HashSet<UserId>,
    /// Cancel the request context on every user read.
    pub cancel_on_user_read: bool,
    pub user_reads: AtomicUsize,
}

impl FakeCache {
    /// Cache knowing org `istio` with repository `istio` and users
    /// `u1 → alice`, `u2 → bob`, `u3 → carol`.
    pub fn istio() -> Self {
        let mut cache = Self::default();
        cache.orgs.insert(
            "istio".to_string(),
            Organization {
                org_id: OrgId::new(ORG_ID),
                login: "istio".to_string(),
            },
        );
        cache.repos.insert(
            (OrgId::new(ORG_ID), "istio".to_string()),
            Repository {
                org_id: OrgId::new(ORG_ID),
                repo_id: RepoId::new(REPO_ID),
                name: "istio".to_string(),
            },
        );
        for (id, login) in [("u1", "alice"), ("u2", "bob"), ("u3", "carol")] {
            cache.users.insert(
                UserId::new(id),
                User {
                    user_id: UserId::new(id),
                    login: login.to_string(),
                },
            );
        }
        cache
    }

    pub fn user_reads(&self) -> usize {
        self.user_reads.load(Ordering::SeqCst)
    }
}

fn offline() -> StorageError {
    StorageError::Unavailable("cache offline".to_string())
}

#[async_trait]
impl ResolutionCache for FakeCache {
    async fn read_org_by_login(
        &self,
        ctx: &RequestContext,
        login: &str,
    ) -> StorageResult<Lookup<Organization>> {
        ctx.check()?;
        if self.failing_orgs.contains(login) {
            return Err(offline());
        }
        Ok(self.orgs.get(login).cloned().into())
    }

    async fn read_repo_by_name(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        name: &str,
    ) -> StorageResult<Lookup<Repository>> {
        ctx.check()?;
        if self.failing_repos.contains(name) {
            return Err(offline());
        }
        Ok(self
            .repos
            .get(&(org_id.clone(), name.to_string()))
            .cloned()
            .into())
    }

    async fn read_user(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
    ) -> StorageResult<Lookup<User>> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        if self.cancel_on_user_read {
            ctx.cancel();
        }
        ctx.check()?;
        if self.failing_users.contains(user_id) {
            return Err(offline());
        }
        Ok(self.users.get(user_id).cloned().into())
    }
}

/// Store double yielding a fixed list of issues, optionally failing after a
/// number of visited issues.
#[derive(Default)]
pub struct FakeStore {
    pub issues: Vec<Issue>,
    pub fail_after: Option<usize>,
}

impl FakeStore {
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            fail_after: None,
        }
    }
}

#[async_trait]
impl EntityStore for FakeStore {
    async fn read_org_by_login(
        &self,
        _ctx: &RequestContext,
        _login: &str,
    ) -> StorageResult<Lookup<Organization>> {
        Ok(Lookup::NotFound)
    }

    async fn read_repo_by_name(
        &self,
        _ctx: &RequestContext,
        _org_id: &OrgId,
        _name: &str,
    ) -> StorageResult<Lookup<Repository>> {
        Ok(Lookup::NotFound)
    }

    async fn read_user(
        &self,
        _ctx: &RequestContext,
        _user_id: &UserId,
    ) -> StorageResult<Lookup<User>> {
        Ok(Lookup::NotFound)
    }

    async fn scan_issues(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        repo_id: &RepoId,
        filter: IssueFilter,
        visit: &mut IssueVisitor<'_>,
    ) -> StorageResult<()> {
        ctx.check()?;
        let matching = self
            .issues
            .iter()
            .filter(|i| &i.org_id == org_id && &i.repo_id == repo_id && filter.matches(i));
        for (visited, issue) in matching.enumerate() {
            if self.fail_after == Some(visited) {
                return Err(StorageError::Unavailable("connection reset".to_string()));
            }
            visit(issue)?;
        }
        Ok(())
    }
}

/// An issue of the `istio/istio` repository.
pub fn issue(number: i64, state: &str, author: &str, assignees: &[&str]) -> Issue {
    Issue {
        org_id: OrgId::new(ORG_ID),
        repo_id: RepoId::new(REPO_ID),
        number,
        title: format!("Issue number {}", number),
        state: state.to_string(),
        author_id: UserId::new(author),
        assignee_ids: assignees.iter().map(|a| UserId::new(*a)).collect(),
    }
}
