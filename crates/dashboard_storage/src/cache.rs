//! TTL-based read-through cache in front of an [`EntityStore`].
//!
//! Found entities are cached with the time they were fetched and served
//! until their TTL elapses. Not-found answers and failures are never cached,
//! so a newly created organization or a recovered backend is seen on the
//! next request.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{
    EntityStore, Lookup, OrgId, Organization, Repository, RequestContext, ResolutionCache,
    StorageResult, User, UserId,
};

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

/// Default time-to-live for cached entities.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;

/// A cached entity with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the entry was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is still valid based on TTL.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.cached_at) < ttl
    }
}

struct Table<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K: Eq + Hash, V: Clone> Table<K, V> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the entry for `key` if it is still valid. An expired entry is
    /// removed.
    async fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_valid(ttl) => return Some(entry.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock: the key may have been refreshed.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_valid(ttl)) {
            entries.remove(key);
            debug!("Evicted expired cache entry");
        }
        None
    }

    async fn put(&self, key: K, value: V) {
        self.entries.write().await.insert(key, CacheEntry::new(value));
    }
}

/// Read-through cache of organizations, repositories and users.
pub struct ReadThroughCache<S> {
    store: Arc<S>,
    ttl: Duration,
    orgs: Table<String, Organization>,
    repos: Table<(OrgId, String), Repository>,
    users: Table<UserId, User>,
}

impl<S: EntityStore> ReadThroughCache<S> {
    /// Create a cache over `store` whose entries live for `ttl`.
    pub fn new(store: Arc<S>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            orgs: Table::new(),
            repos: Table::new(),
            users: Table::new(),
        }
    }

    /// Create a cache with [`DEFAULT_CACHE_TTL_SECS`].
    pub fn with_default_ttl(store: Arc<S>) -> Self {
        Self::new(store, Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }
}

#[async_trait]
impl<S: EntityStore> ResolutionCache for ReadThroughCache<S> {
    #[instrument(skip(self, ctx))]
    async fn read_org_by_login(
        &self,
        ctx: &RequestContext,
        login: &str,
    ) -> StorageResult<Lookup<Organization>> {
        ctx.check()?;
        let key = login.to_string();
        if let Some(org) = self.orgs.get(&key, self.ttl).await {
            debug!("Organization cache hit");
            return Ok(Lookup::Found(org));
        }

        let lookup = self.store.read_org_by_login(ctx, login).await?;
        if let Lookup::Found(org) = &lookup {
            self.orgs.put(key, org.clone()).await;
        }
        Ok(lookup)
    }

    #[instrument(skip(self, ctx), fields(org_id = %org_id))]
    async fn read_repo_by_name(
        &self,
        ctx: &RequestContext,
        org_id: &OrgId,
        name: &str,
    ) -> StorageResult<Lookup<Repository>> {
        ctx.check()?;
        let key = (org_id.clone(), name.to_string());
        if let Some(repo) = self.repos.get(&key, self.ttl).await {
            debug!("Repository cache hit");
            return Ok(Lookup::Found(repo));
        }

        let lookup = self.store.read_repo_by_name(ctx, org_id, name).await?;
        if let Lookup::Found(repo) = &lookup {
            self.repos.put(key, repo.clone()).await;
        }
        Ok(lookup)
    }

    #[instrument(skip(self, ctx), fields(user_id = %user_id))]
    async fn read_user(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
    ) -> StorageResult<Lookup<User>> {
        ctx.check()?;
        if let Some(user) = self.users.get(user_id, self.ttl).await {
            debug!("User cache hit");
            return Ok(Lookup::Found(user));
        }

        let lookup = self.store.read_user(ctx, user_id).await?;
        if let Lookup::Found(user) = &lookup {
            self.users.put(user_id.clone(), user.clone()).await;
        }
        Ok(lookup)
    }
}
