//! Error types for storage and cache operations.
//!
//! These errors describe failures of the storage layer itself. A lookup that
//! completes but finds nothing is not an error; it is reported as
//! [`Lookup::NotFound`](crate::Lookup::NotFound).

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while reading from the entity store or the
/// resolution cache.
///
/// ## Examples
///
/// ```rust
/// use dashboard_storage::StorageError;
///
/// let err = StorageError::Unavailable("connection refused".to_string());
/// assert!(!err.is_cancellation());
/// assert!(StorageError::Cancelled.is_cancellation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store could not be reached or refused the request.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// A stored record or seed document could not be decoded.
    #[error("Failed to decode stored record: {0}")]
    Decode(String),

    /// The request that owns the operation was cancelled.
    #[error("Operation cancelled")]
    Cancelled,
}

impl StorageError {
    /// Returns `true` when the error was caused by request cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, StorageError::Cancelled)
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
