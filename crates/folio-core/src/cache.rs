//! Response cache for public pages.
//!
//! `PublicCache` is a concurrent path-to-payload map backed by `DashMap`,
//! with a short TTL. Public GET handlers read through it; every content
//! mutation blows the whole thing away, since the public site is small and
//! rebuilding it costs a handful of queries. Values are cloned on read to
//! avoid holding a `DashMap` `Ref` across `.await` points.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

/// Default entry lifetime: content edits propagate within a minute even if
/// an invalidation is missed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Concurrent TTL cache of rendered public payloads, keyed by request path.
///
/// Cloning produces a shared view of the same underlying data (backed by `Arc`).
#[derive(Debug, Clone)]
pub struct PublicCache {
    inner: Arc<DashMap<String, (Instant, Value)>>,
    ttl: Duration,
}

impl PublicCache {
    /// Create an empty cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create an empty cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Get a cloned copy of the payload at `path`, or `None` if absent or
    /// expired. Expired entries are removed on the way out.
    pub fn get(&self, path: &str) -> Option<Value> {
        let expired = match self.inner.get(path) {
            Some(entry) => {
                let (stored_at, value) = entry.value();
                if stored_at.elapsed() < self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.inner.remove(path);
        }
        None
    }

    /// Insert or overwrite the payload for `path`.
    pub fn put(&self, path: impl Into<String>, value: Value) {
        self.inner.insert(path.into(), (Instant::now(), value));
    }

    /// Drop everything. Called after any content mutation.
    pub fn invalidate_all(&self) {
        self.inner.clear();
    }

    /// Number of live entries (expired ones included until touched).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for PublicCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_get_roundtrip() {
        let cache = PublicCache::new();
        cache.put("/api/v1/projects", json!([{"slug": "brand-refresh"}]));
        assert_eq!(
            cache.get("/api/v1/projects"),
            Some(json!([{"slug": "brand-refresh"}]))
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let cache = PublicCache::new();
        assert_eq!(cache.get("/api/v1/profile"), None);
    }

    #[test]
    fn invalidate_all_empties_cache() {
        let cache = PublicCache::new();
        cache.put("/a", json!(1));
        cache.put("/b", json!(2));
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.get("/a"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = PublicCache::with_ttl(Duration::from_millis(0));
        cache.put("/a", json!(1));
        assert_eq!(cache.get("/a"), None);
        // The expired entry was swept on read.
        assert!(cache.is_empty());
    }

    #[test]
    fn entries_live_within_ttl() {
        let cache = PublicCache::with_ttl(Duration::from_secs(3600));
        cache.put("/a", json!("payload"));
        assert_eq!(cache.get("/a"), Some(json!("payload")));
    }

    #[test]
    fn clone_shares_data() {
        let cache = PublicCache::new();
        let view = cache.clone();
        cache.put("/shared", json!("data"));
        assert_eq!(view.get("/shared"), Some(json!("data")));
        view.invalidate_all();
        assert!(cache.is_empty());
    }
}
