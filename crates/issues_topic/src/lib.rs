//! # Issues Topic
//!
//! Resolves the issues of an organization's repository into display-ready
//! summaries for the dashboard's issues topic.
//!
//! ## Overview
//!
//! A call to [`IssuesResolver::resolve`]:
//! 1. Resolves the organization by login through the resolution cache
//! 2. Resolves the configured repository within that organization
//! 3. Scans the repository's issues from the entity store
//! 4. Projects each issue into an [`IssueSummary`] under the configured
//!    [`ProjectionPolicy`]
//!
//! Organization and repository failures abort the call and are classified
//! as [`ResolveError::LookupFailure`] or [`ResolveError::NotFound`]. Users
//! that cannot be resolved are shown as `unknown` instead.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dashboard_storage::{InMemoryStore, ReadThroughCache, RequestContext};
//! use issues_topic::{IssuesResolver, ResolverConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let cache = Arc::new(ReadThroughCache::with_default_ttl(store.clone()));
//! let resolver = IssuesResolver::new(cache, store, ResolverConfig::default());
//!
//! let summaries = resolver.resolve(&RequestContext::new(), "istio").await?;
//! println!("{} issues", summaries.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod projection;
pub mod resolver;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use config::{ResolverConfig, DEFAULT_REPOSITORY};
pub use errors::{EntityKind, ResolveError};
pub use projection::{ProjectionPolicy, UNKNOWN_USER};
pub use resolver::IssuesResolver;
pub use summary::{IssueIdentity, IssueSummary};
