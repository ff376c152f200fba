use std::time::Duration;

/// Value returned by a cache lookup. `stale` is set once the entry is past its
/// TTL but still inside the stale-while-revalidate window; the caller decides
/// how to refresh it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHit<T> {
    pub value: T,
    pub stale: bool,
}

impl<T> CacheHit<T> {
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            stale: false,
        }
    }

    pub fn stale(value: T) -> Self {
        Self { value, stale: true }
    }
}

/// Eviction operations that do not depend on the stored value type.
pub trait CacheControl: Send + Sync {
    /// Removes every key matching `pattern` and returns how many were removed.
    /// `*` matches any run of characters; a pattern without `*` matches only
    /// the identical key.
    fn invalidate(&self, pattern: &str) -> usize;

    fn clear(&self);
}

pub trait CacheStore<T>: CacheControl {
    fn get(&self, key: &str) -> Option<CacheHit<T>>;

    /// Stores `value`, replacing any previous entry. `ttl` falls back to the
    /// store's default when `None`.
    fn set(&self, key: &str, value: T, ttl: Option<Duration>);

    /// Removes exactly `key`; returns whether an entry existed.
    fn remove(&self, key: &str) -> bool;
}
