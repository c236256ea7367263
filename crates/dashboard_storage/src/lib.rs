//! Storage contracts and implementations for the dashboard.
//!
//! This crate defines the entities the dashboard reads (organizations,
//! repositories, users and issues), the [`EntityStore`] and
//! [`ResolutionCache`] contracts that dashboard topics consume, and two
//! implementations of them:
//!
//! - [`InMemoryStore`]: an entity store held in process memory, optionally
//!   seeded from a JSON document.
//! - [`ReadThroughCache`]: a TTL cache that serves found entities and falls
//!   back to any [`EntityStore`] on a miss.
//!
//! Every operation takes a [`RequestContext`] and fails with
//! [`StorageError::Cancelled`] once that context is cancelled.

pub mod cache;
pub mod context;
pub mod errors;
pub mod memory;
pub mod models;
pub mod store;

pub use cache::{CacheEntry, ReadThroughCache, DEFAULT_CACHE_TTL_SECS};
pub use context::RequestContext;
pub use errors::{StorageError, StorageResult};
pub use memory::{InMemoryStore, Seed};
pub use models::{Issue, IssueFilter, OrgId, Organization, RepoId, Repository, User, UserId};
pub use store::{EntityStore, IssueVisitor, Lookup, ResolutionCache};
