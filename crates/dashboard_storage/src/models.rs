//! # Models
//!
//! Entities mirrored from the source-control host: organizations,
//! repositories, users and issues. They are produced outside the dashboard
//! and are read-only from its perspective.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Stable identifier of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Create a new organization ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrgId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Stable identifier of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(String);

impl RepoId {
    /// Create a new repository ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Stable identifier of a user account.
///
/// Serialized as a bare string so that identifiers passed through to API
/// consumers are exactly the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An organization known to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// The stable ID of the organization
    pub org_id: OrgId,
    /// The login name of the organization
    pub login: String,
}

/// A repository owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// The owning organization
    pub org_id: OrgId,
    /// The stable ID of the repository
    pub repo_id: RepoId,
    /// The repository name, unique within its organization
    pub name: String,
}

/// A user account referenced as an issue author or assignee.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// The stable ID of the user
    pub user_id: UserId,
    /// The login name of the user
    pub login: String,
}

/// A raw issue record as held by the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub org_id: OrgId,
    pub repo_id: RepoId,
    /// Issue number, unique within the repository
    pub number: i64,
    pub title: String,
    /// Host-reported state, typically `open` or `closed`
    pub state: String,
    pub author_id: UserId,
    /// Assignees in the order the host reported them
    #[serde(default)]
    pub assignee_ids: Vec<UserId>,
}

impl Issue {
    /// Returns `true` when the issue is closed.
    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case("closed")
    }
}

/// Selects which issues an issue scan yields.
///
/// A deployment picks exactly one mode; it is never mixed within a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueFilter {
    /// Only issues that are not closed
    #[default]
    Open,
    /// Every issue regardless of state
    All,
}

impl IssueFilter {
    /// Returns `true` when `issue` passes this filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            IssueFilter::Open => !issue.is_closed(),
            IssueFilter::All => true,
        }
    }
}
