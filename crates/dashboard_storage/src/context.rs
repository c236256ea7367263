//! Per-request context carried through every store and cache call.

use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{StorageError, StorageResult};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Cancellation-bearing context for a single request.
///
/// Cloning the context shares the underlying token, so cancelling any clone
/// cancels them all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Create a context with a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns `true` once the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fail with [`StorageError::Cancelled`] if the context has been cancelled.
    pub fn check(&self) -> StorageResult<()> {
        if self.is_cancelled() {
            Err(StorageError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Returns a guard that cancels the context when dropped.
    ///
    /// HTTP handlers hold the guard for the lifetime of the request future so
    /// that a dropped request cancels any work still using the context.
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.cancellation.clone().drop_guard()
    }
}
