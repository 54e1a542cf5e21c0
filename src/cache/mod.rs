//! Memoizing content cache fronting the backend's content-addressed store.
//!
//! Bodies are keyed by [`ContentHash`]. The first [`request`] for a hash
//! issues exactly one `store_get_content` call over the bridge; requests that
//! arrive while that fetch is in flight coalesce onto it. Resolved bodies are
//! held in a bounded LRU: hashes are content-addressed, so a stored value is
//! immutable and eviction is always safe. Failures are never cached: a failed
//! hash is re-fetched on the next request.
//!
//! [`request`]: ContentCache::request

use crate::bridge::{Bridge, BridgeCall};
use crate::domain::ContentHash;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Default number of resolved bodies kept in memory.
pub const DEFAULT_CAPACITY: usize = 512;

/// Observable state of one content lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    /// Body is resolved and readable via [`ContentCache::body`].
    Loaded,

    /// A fetch is in flight; render a loading placeholder.
    Loading,

    /// The previous fetch failed; a retry has been issued. Render an
    /// "unavailable" placeholder until it resolves.
    Unavailable,
}

/// Hash-keyed memoizing store for resolved content bodies.
#[derive(Debug)]
pub struct ContentCache {
    bodies: LruCache<ContentHash, String>,
    in_flight: HashSet<ContentHash>,
    failed: HashSet<ContentHash>,
}

impl ContentCache {
    /// Creates a cache bounded to `capacity` resolved bodies.
    ///
    /// A zero capacity is treated as one; the cache must be able to hold at
    /// least the entry currently being rendered.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            bodies: LruCache::new(capacity),
            in_flight: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Ensures a body for `hash` is resolved or being resolved, returning the
    /// current status.
    ///
    /// Issues at most one bridge fetch per unresolved hash: while a fetch is
    /// in flight, further requests return [`ContentStatus::Loading`] without
    /// touching the bridge. A hash whose previous fetch failed is retried
    /// (one new fetch) and reported [`ContentStatus::Unavailable`] for this
    /// pass so callers can distinguish "never loaded" from "failed".
    pub fn request(&mut self, hash: &ContentHash, bridge: &dyn Bridge) -> ContentStatus {
        if self.bodies.contains(hash) {
            self.bodies.promote(hash);
            return ContentStatus::Loaded;
        }
        if self.in_flight.contains(hash) {
            return ContentStatus::Loading;
        }

        let retrying = self.failed.remove(hash);
        self.in_flight.insert(hash.clone());
        tracing::debug!(hash = %hash, retry = retrying, "fetching content");
        bridge.invoke(&BridgeCall::StoreGetContent { hash: hash.clone() });

        if retrying {
            ContentStatus::Unavailable
        } else {
            ContentStatus::Loading
        }
    }

    /// Returns the resolved body for `hash`, if present. Never fetches.
    #[must_use]
    pub fn body(&mut self, hash: &ContentHash) -> Option<&str> {
        self.bodies.get(hash).map(String::as_str)
    }

    /// Like [`body`](Self::body) but without refreshing LRU recency, for
    /// callers that only hold a shared reference.
    #[must_use]
    pub fn peek(&self, hash: &ContentHash) -> Option<&str> {
        self.bodies.peek(hash).map(String::as_str)
    }

    /// Stores a resolved body, completing the in-flight fetch for `hash`.
    ///
    /// Also called for unsolicited resolutions (e.g. raw-content answers);
    /// the body is stored either way since content addressing guarantees it
    /// can never be stale.
    pub fn resolve(&mut self, hash: ContentHash, body: String) {
        self.in_flight.remove(&hash);
        self.failed.remove(&hash);
        self.bodies.put(hash, body);
    }

    /// Records a fetch failure for `hash` without caching it.
    ///
    /// The next [`request`](Self::request) re-issues the fetch.
    pub fn fail(&mut self, hash: &ContentHash) {
        tracing::debug!(hash = %hash, "content fetch failed");
        self.in_flight.remove(hash);
        self.failed.insert(hash.clone());
    }

    /// Number of resolved bodies currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::RecordingBridge;

    fn hash(s: &str) -> ContentHash {
        ContentHash(s.to_string())
    }

    #[test]
    fn concurrent_requests_coalesce_into_one_fetch() {
        let bridge = RecordingBridge::default();
        let mut cache = ContentCache::default();

        assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loading);
        assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loading);
        assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loading);

        assert_eq!(bridge.count_of("store_get_content"), 1);

        cache.resolve(hash("h1"), "body".to_string());
        assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loaded);
        assert_eq!(cache.body(&hash("h1")), Some("body"));
    }

    #[test]
    fn resolved_hash_never_refetches() {
        let bridge = RecordingBridge::default();
        let mut cache = ContentCache::default();

        cache.request(&hash("h1"), &bridge);
        cache.resolve(hash("h1"), "body".to_string());

        for _ in 0..5 {
            assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loaded);
        }
        assert_eq!(bridge.count_of("store_get_content"), 1);
    }

    #[test]
    fn failure_is_not_cached_and_retries() {
        let bridge = RecordingBridge::default();
        let mut cache = ContentCache::default();

        cache.request(&hash("h1"), &bridge);
        cache.fail(&hash("h1"));
        assert_eq!(cache.body(&hash("h1")), None);

        // next request reports unavailable and issues a second fetch
        assert_eq!(
            cache.request(&hash("h1"), &bridge),
            ContentStatus::Unavailable
        );
        assert_eq!(bridge.count_of("store_get_content"), 2);

        // which may then succeed
        cache.resolve(hash("h1"), "body".to_string());
        assert_eq!(cache.request(&hash("h1"), &bridge), ContentStatus::Loaded);
    }

    #[test]
    fn capacity_bounds_resolved_bodies() {
        let bridge = RecordingBridge::default();
        let mut cache = ContentCache::new(2);

        for name in ["h1", "h2", "h3"] {
            cache.request(&hash(name), &bridge);
            cache.resolve(hash(name), name.to_string());
        }

        assert_eq!(cache.len(), 2);
        // oldest entry evicted, newest retained
        assert_eq!(cache.peek(&hash("h1")), None);
        assert_eq!(cache.peek(&hash("h3")), Some("h3"));
    }
}
