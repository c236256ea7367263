//! Errors raised while resolving issue summaries.
//!
//! Only failures that abort the whole listing appear here. A user that cannot
//! be resolved is not an error; its login is replaced with a placeholder
//! (see [`crate::projection::display_name`]).

use dashboard_storage::StorageError;
use std::fmt;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// The kind of entity a resolution step was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Repository,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Organization => write!(f, "organization"),
            EntityKind::Repository => write!(f, "repository"),
        }
    }
}

/// Errors that abort an issue listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The cache could not answer an organization or repository lookup.
    #[error("unable to get information on {entity} {key}: {source}")]
    LookupFailure {
        entity: EntityKind,
        key: String,
        #[source]
        source: StorageError,
    },

    /// The organization or repository does not exist.
    #[error("no information available on {entity} {key}")]
    NotFound { entity: EntityKind, key: String },

    /// The issue scan failed part way through.
    #[error("unable to read issues of repository {repository}: {source}")]
    ScanFailure {
        repository: String,
        #[source]
        source: StorageError,
    },

    /// The request was cancelled before the listing completed.
    #[error("issue listing cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Classify a failed organization or repository lookup.
    pub fn lookup(entity: EntityKind, key: impl Into<String>, source: StorageError) -> Self {
        if source.is_cancellation() {
            return ResolveError::Cancelled;
        }
        ResolveError::LookupFailure {
            entity,
            key: key.into(),
            source,
        }
    }

    /// Report a definitive absence of an organization or repository.
    pub fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        ResolveError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Classify a failed issue scan.
    pub fn scan(repository: impl Into<String>, source: StorageError) -> Self {
        if source.is_cancellation() {
            return ResolveError::Cancelled;
        }
        ResolveError::ScanFailure {
            repository: repository.into(),
            source,
        }
    }

    /// Returns `true` for a definitive not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}
