//! Storage and cache contracts consumed by dashboard topics.
//!
//! Both contracts report three outcomes for a keyed lookup: the entity was
//! found, it definitively does not exist, or the lookup itself failed. The
//! first two are carried by [`Lookup`], the third by [`StorageError`](crate::StorageError), so a
//! caller cannot mistake a missing entity for a broken backend.

use async_trait::async_trait;

use crate::{
    Issue, IssueFilter, OrgId, Organization, RepoId, Repository, RequestContext, StorageResult,
    User, UserId,
};

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Outcome of a lookup that completed without a backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The entity exists.
    Found(T),
    /// The entity definitively does not exist.
    NotFound,
}

impl<T> Lookup<T> {
    /// Converts into an `Option`, discarding the distinction from errors.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Returns `true` when the entity exists.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Callback invoked once per issue during a scan.
///
/// Returning an error stops the scan and the error is returned from
/// [`EntityStore::scan_issues`] unchanged.
pub type IssueVisitor<'a> = dyn FnMut(&Issue) -> StorageResult<()> + Send + 'a;

/// Durable, authoritative store of dashboard entities.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Read an organization by its login.
    async fn read_org_by_login(
        &self,
        ctx: &RequestContext,
        login: &str,
    ) -> StorageResult<Lookup<Organization>>;

    /// Read a repository by its name within an organization.
    async fn read_repo_by_name(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        name: &str,
    ) -> StorageResult<Lookup<Repository>>;

    /// Read a user by ID.
    async fn read_user(&self, ctx: &RequestContext, user_id: &UserId)
        -> StorageResult<Lookup<User>>;

    /// Stream every issue of a repository that passes `filter`.
    ///
    /// `visit` is called once per matching issue in the store's natural
    /// order. The scan stops at the first error, whether raised by the store
    /// or returned by `visit`.
    async fn scan_issues(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        repo_id: &RepoId,
        filter: IssueFilter,
        visit: &mut IssueVisitor<'_>,
    ) -> StorageResult<()>;
}

/// Read-through cache resolving human-facing keys to entities.
#[async_trait]
pub trait ResolutionCache: Send + Sync {
    /// Resolve an organization by login.
    async fn read_org_by_login(
        &self,
        ctx: &RequestContext,
        login: &str,
    ) -> StorageResult<Lookup<Organization>>;

    /// Resolve a repository by organization ID and name.
    async fn read_repo_by_name(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        name: &str,
    ) -> StorageResult<Lookup<Repository>>;

    /// Resolve a user by ID.
    async fn read_user(&self, ctx: &RequestContext, user_id: &UserId)
        -> StorageResult<Lookup<User>>;
}
