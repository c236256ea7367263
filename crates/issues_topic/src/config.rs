//! Resolver configuration.

use dashboard_storage::IssueFilter;
use serde::{Deserialize, Serialize};

use crate::ProjectionPolicy;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default repository whose issues are listed.
pub const DEFAULT_REPOSITORY: &str = "istio";

/// Per-deployment settings of the issue resolver.
///
/// # Example TOML Configuration
///
/// ```toml
/// repository = "istio"
/// scan = "open"
/// projection = "display_resolved"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Repository listed for every organization
    pub repository: String,

    /// Which issues the store scan yields
    pub scan: IssueFilter,

    /// How raw issues are projected into summaries
    pub projection: ProjectionPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            scan: IssueFilter::Open,
            projection: ProjectionPolicy::DisplayResolved,
        }
    }
}
