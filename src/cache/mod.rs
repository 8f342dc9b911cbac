//! In-memory response cache
//!
//! This module provides a cache manager that keeps responses in memory keyed by
//! string, stamped with the time they were stored. Freshness is decided from
//! the entry's age against a fixed window; stale entries are reported with an
//! `is_expired` flag and stay in memory until the next store overwrites them.

mod clock;
mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{cache_key, CacheManager, CachedData, CACHE_TTL_MINUTES};
