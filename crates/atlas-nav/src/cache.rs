//! Time-bounded memoization of category navigation.
//!
//! [`NavigationCache`] sits in front of the tree walk, keyed by normalized
//! category path. Two seams keep it testable:
//!
//! - [`Clock`]: source of "now" ([`SystemClock`], or [`ManualClock`] in tests)
//! - [`CacheStore`]: entry storage ([`MemoryCacheStore`], or [`NullCacheStore`]
//!   when caching is disabled)
//!
//! Per key the lifecycle is absent → cached → absent. An entry expires when
//! its TTL elapses; expired entries are dropped on lookup or by
//! [`NavigationCache::purge_expired`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use atlas_content::path;

use crate::item::NavigationItem;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Shared navigation list handed out by the cache.
pub type SharedItems = Arc<[NavigationItem]>;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A cached navigation list with its expiry.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub path: String,
    pub value: SharedItems,
    pub expires_at: Instant,
}

impl CacheEntry {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Storage for cache entries.
///
/// Implementations must tolerate concurrent readers and concurrent writers
/// to distinct keys.
pub trait CacheStore: Send + Sync {
    /// Entry for `key` if present and not expired at `now`.
    ///
    /// An expired entry is removed.
    fn get(&self, key: &str, now: Instant) -> Option<SharedItems>;

    /// Insert or overwrite an entry.
    fn insert(&self, entry: CacheEntry);

    /// Remove every entry expired at `now`, returning how many were removed.
    fn purge_expired(&self, now: Instant) -> usize;

    /// Number of stored entries, expired or not.
    fn len(&self) -> usize;
}

/// In-memory store behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str, now: Instant) -> Option<SharedItems> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(Arc::clone(&entry.value)),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: another caller may have refreshed it.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    fn insert(&self, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry.path.clone(), entry);
    }

    fn purge_expired(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Store that never keeps anything.
///
/// Every lookup misses. Used when caching is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCacheStore;

impl CacheStore for NullCacheStore {
    fn get(&self, _key: &str, _now: Instant) -> Option<SharedItems> {
        None
    }

    fn insert(&self, _entry: CacheEntry) {}

    fn purge_expired(&self, _now: Instant) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

/// TTL cache for category navigation.
///
/// Hits return the very same `Arc` that was stored, so callers can compare
/// results with [`Arc::ptr_eq`].
#[derive(Clone)]
pub struct NavigationCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl std::fmt::Debug for NavigationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl NavigationCache {
    /// In-memory cache on the system clock.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_parts(ttl, Arc::new(MemoryCacheStore::new()), Arc::new(SystemClock))
    }

    /// Cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_parts(DEFAULT_TTL, Arc::new(NullCacheStore), Arc::new(SystemClock))
    }

    /// Cache with injected storage and clock.
    #[must_use]
    pub fn with_parts(ttl: Duration, store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached navigation for `category_path`, `None` on miss or expiry.
    #[must_use]
    pub fn get(&self, category_path: &str) -> Option<SharedItems> {
        let key = path::normalize(category_path);
        let hit = self.store.get(&key, self.clock.now());
        debug!(path = %key, hit = hit.is_some(), "Navigation cache lookup");
        hit
    }

    /// Store navigation with the default TTL.
    pub fn set(&self, category_path: &str, value: SharedItems) {
        self.set_with_ttl(category_path, value, self.ttl);
    }

    /// Store navigation with an explicit TTL, restarting any previous one.
    pub fn set_with_ttl(&self, category_path: &str, value: SharedItems, ttl: Duration) {
        let entry = CacheEntry {
            path: path::normalize(category_path),
            value,
            expires_at: self.clock.now() + ttl,
        };
        self.store.insert(entry);
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) -> usize {
        let removed = self.store.purge_expired(self.clock.now());
        if removed > 0 {
            debug!(removed, "Purged expired navigation entries");
        }
        removed
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
