//! The issue summary resolver.

use dashboard_storage::{EntityStore, Issue, Lookup, RequestContext, ResolutionCache};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{EntityKind, IssueSummary, ResolveError, ResolverConfig};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Resolves the issues of one organization's configured repository into
/// display summaries.
///
/// Organizations, repositories and users are resolved through the
/// [`ResolutionCache`]; issues are streamed from the [`EntityStore`]. The
/// resolver keeps no per-request state and can be shared between requests.
pub struct IssuesResolver {
    cache: Arc<dyn ResolutionCache>,
    store: Arc<dyn EntityStore>,
    config: ResolverConfig,
}

impl IssuesResolver {
    /// Create a resolver over the given cache and store.
    pub fn new(
        cache: Arc<dyn ResolutionCache>,
        store: Arc<dyn EntityStore>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            cache,
            store,
            config,
        }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// List the issues of the configured repository of `org_login`.
    ///
    /// Summaries are returned in the order the store yields issues. The call
    /// is all-or-nothing: if the scan fails no summaries are returned.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::LookupFailure`] if the organization or repository
    ///   lookup fails
    /// - [`ResolveError::NotFound`] if either does not exist
    /// - [`ResolveError::ScanFailure`] if the issue scan fails
    /// - [`ResolveError::Cancelled`] if `ctx` is cancelled along the way
    #[instrument(skip(self, ctx), fields(repo = %self.config.repository))]
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        org_login: &str,
    ) -> Result<Vec<IssueSummary>, ResolveError> {
        let repo_name = self.config.repository.as_str();

        let org = match self.cache.read_org_by_login(ctx, org_login).await {
            Ok(Lookup::Found(org)) => org,
            Ok(Lookup::NotFound) => {
                return Err(ResolveError::not_found(EntityKind::Organization, org_login))
            }
            Err(e) => {
                warn!(error = %e, "Organization lookup failed");
                return Err(ResolveError::lookup(EntityKind::Organization, org_login, e));
            }
        };

        let repo = match self.cache.read_repo_by_name(ctx, &org.org_id, repo_name).await {
            Ok(Lookup::Found(repo)) => repo,
            Ok(Lookup::NotFound) => {
                return Err(ResolveError::not_found(EntityKind::Repository, repo_name))
            }
            Err(e) => {
                warn!(error = %e, "Repository lookup failed");
                return Err(ResolveError::lookup(EntityKind::Repository, repo_name, e));
            }
        };

        // Collect first so a failing scan never leaves a partial listing.
        let mut issues: Vec<Issue> = Vec::new();
        self.store
            .scan_issues(ctx, &org.org_id, &repo.repo_id, self.config.scan, &mut |issue| {
                issues.push(issue.clone());
                Ok(())
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Issue scan failed");
                ResolveError::scan(repo_name, e)
            })?;

        debug!(count = issues.len(), "Projecting issues");

        let mut summaries = Vec::with_capacity(issues.len());
        for issue in issues {
            if ctx.is_cancelled() {
                return Err(ResolveError::Cancelled);
            }
            summaries.push(
                self.config
                    .projection
                    .project(self.cache.as_ref(), ctx, repo_name, issue)
                    .await,
            );
        }

        // User lookups absorb cancellation as placeholders; never return those.
        if ctx.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        info!(
            org = %org.login,
            count = summaries.len(),
            scan = ?self.config.scan,
            projection = ?self.config.projection,
            "Resolved issue summaries"
        );

        Ok(summaries)
    }
}
