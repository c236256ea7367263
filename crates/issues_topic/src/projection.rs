//! Projection of raw issues into summaries.
//!
//! Two policies exist. [`ProjectionPolicy::DisplayResolved`] resolves author
//! and assignee IDs to logins and shortens long titles for human readers.
//! [`ProjectionPolicy::PassThrough`] copies the IDs unchanged for consumers
//! that resolve identities themselves.

use dashboard_storage::{Issue, Lookup, RequestContext, ResolutionCache, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{IssueIdentity, IssueSummary};

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;

/// Login shown for users that cannot be resolved.
pub const UNKNOWN_USER: &str = "unknown";

/// Titles longer than this many characters are truncated.
pub const TITLE_LIMIT: usize = 50;

/// Marker appended to truncated titles.
pub const TITLE_ELLIPSIS: &str = ". . .";

/// Separator between assignee logins.
pub const ASSIGNEE_SEPARATOR: &str = ",\n";

/// How raw issues are turned into summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionPolicy {
    /// Resolve IDs to logins and truncate long titles.
    #[default]
    DisplayResolved,
    /// Carry IDs and titles through untouched.
    PassThrough,
}

impl ProjectionPolicy {
    /// Project one issue listed from repository `repo`.
    ///
    /// Never fails: unresolved users become [`UNKNOWN_USER`].
    pub async fn project(
        self,
        cache: &dyn ResolutionCache,
        ctx: &RequestContext,
        repo: &str,
        issue: Issue,
    ) -> IssueSummary {
        let (title, identity) = match self {
            ProjectionPolicy::DisplayResolved => {
                let author_login = display_name(cache, ctx, &issue.author_id).await;
                let mut logins = Vec::with_capacity(issue.assignee_ids.len());
                for assignee in &issue.assignee_ids {
                    logins.push(display_name(cache, ctx, assignee).await);
                }
                (
                    truncate_title(&issue.title),
                    IssueIdentity::Resolved {
                        author_login,
                        assignees: format_assignees(&logins),
                    },
                )
            }
            ProjectionPolicy::PassThrough => (
                issue.title,
                IssueIdentity::PassThrough {
                    author_id: issue.author_id,
                    assignee_ids: issue.assignee_ids,
                },
            ),
        };

        IssueSummary {
            repo: repo.to_string(),
            number: issue.number,
            title,
            state: issue.state,
            identity,
        }
    }
}

/// Resolve a user ID to a login, falling back to [`UNKNOWN_USER`].
pub async fn display_name(
    cache: &dyn ResolutionCache,
    ctx: &RequestContext,
    user_id: &UserId,
) -> String {
    match cache.read_user(ctx, user_id).await {
        Ok(Lookup::Found(user)) => user.login,
        Ok(Lookup::NotFound) => {
            debug!(user_id = %user_id, "User not found, showing placeholder");
            UNKNOWN_USER.to_string()
        }
        Err(e) => {
            debug!(user_id = %user_id, error = %e, "User lookup failed, showing placeholder");
            UNKNOWN_USER.to_string()
        }
    }
}

/// Shorten `title` to [`TITLE_LIMIT`] characters plus [`TITLE_ELLIPSIS`].
///
/// Counts characters, not bytes, so multi-byte titles are never split inside
/// a code point.
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(TITLE_LIMIT) {
        Some((cut, _)) => format!("{}{}", &title[..cut], TITLE_ELLIPSIS),
        None => title.to_string(),
    }
}

/// Join assignee logins in input order with [`ASSIGNEE_SEPARATOR`].
pub fn format_assignees(logins: &[String]) -> String {
    logins.join(ASSIGNEE_SEPARATOR)
}
