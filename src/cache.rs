use moka::future::Cache;
use std::hash::Hash;
use std::time::Duration;

/// Upper bound on cached entries per analytics view.
pub const MAX_CACHE_ENTRIES: u64 = 24;

/// Time-to-live cache for analytics results.
///
/// Entries are served until `ttl` has elapsed since they were stored, even if
/// the underlying logs changed in the meantime. A zero `ttl` never caches.
pub struct StatsCache<K, V> {
    inner: Option<Cache<K, V>>,
}

impl<K, V> StatsCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_CACHE_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build()
        });
        Self { inner }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.as_ref()?.get(key).await
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub async fn get_with(&self, key: K, init: impl Future<Output = V>) -> V {
        match &self.inner {
            Some(cache) => cache.get_with(key, init).await,
            None => init.await,
        }
    }

    #[cfg(test)]
    async fn entry_count(&self) -> u64 {
        match &self.inner {
            Some(cache) => {
                cache.run_pending_tasks().await;
                cache.entry_count()
            }
            None => 0,
        }
    }
}
