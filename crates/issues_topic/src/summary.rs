//! Display-ready issue summaries.

use dashboard_storage::UserId;
use serde::Serialize;

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;

/// One issue as shown by the dashboard.
///
/// Built fresh for every request and never stored.
///
/// # Example
///
/// ```json
/// {
///   "repo": "istio",
///   "number": 42,
///   "title": "Sidecar injection fails on ...",
///   "state": "open",
///   "author_login": "alice",
///   "assignees": "bob,\ncarol"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    /// Name of the repository the issue was listed from
    pub repo: String,
    pub number: i64,
    pub title: String,
    pub state: String,
    #[serde(flatten)]
    pub identity: IssueIdentity,
}

/// Author and assignee fields of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IssueIdentity {
    /// Logins resolved for human readers.
    Resolved {
        author_login: String,
        /// Assignee logins joined with `",\n"`
        assignees: String,
    },
    /// Identifiers copied from the stored issue.
    PassThrough {
        author_id: UserId,
        assignee_ids: Vec<UserId>,
    },
}
