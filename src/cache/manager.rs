//! Cache manager for keeping responses in memory
//!
//! Provides a `CacheManager` that stores cloneable data with the instant it was
//! stored, reporting staleness against a fixed freshness window.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::clock::{Clock, SystemClock};

/// Freshness window for cached responses, in minutes
pub const CACHE_TTL_MINUTES: i64 = 5;

/// Builds the composite cache key for a date and credential
pub fn cache_key(date: &str, credential: &str) -> String {
    format!("{}:{}", date, credential)
}

/// Wrapper struct for cached data held in memory
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the entry is older than the freshness window
    pub is_expired: bool,
}

/// Manages reading and writing cached data
///
/// Entries are never removed. An entry whose age reaches the freshness window
/// is still returned (with `is_expired = true`) and is replaced by the next
/// `store` under the same key. The map grows with the number of distinct keys.
pub struct CacheManager<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<T: Clone> CacheManager<T> {
    /// Creates a new CacheManager on the wall clock with the default window
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), Duration::minutes(CACHE_TTL_MINUTES))
    }

    /// Creates a new CacheManager with a custom clock and freshness window
    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Returns the freshness window
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if nothing was ever stored under `key`.
    pub fn lookup(&self, key: &str) -> Option<CachedData<T>> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        let age = self.clock.now() - entry.cached_at;

        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            is_expired: age >= self.ttl,
        })
    }

    /// Stores data under `key`, stamped with the current time
    ///
    /// Overwrites any previous entry for the key. Last store wins.
    pub fn store(&self, key: &str, data: T) {
        let entry = CacheEntry {
            data,
            cached_at: self.clock.now(),
        };
        self.entries.write().insert(key.to_string(), entry);
    }

    /// Number of entries held, stale ones included
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Clone> Default for CacheManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
