use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::pattern::matches_pattern;
use crate::application::ports::cache::{CacheControl, CacheHit, CacheStore};
use crate::application::ports::time::Clock;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_STALE_WHILE_REVALIDATE: Duration = Duration::from_secs(60);
/// Every this many writes, `set` drops the entries past their stale window.
pub const SWEEP_INTERVAL: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub default_ttl: Duration,
    pub stale_while_revalidate: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            stale_while_revalidate: DEFAULT_STALE_WHILE_REVALIDATE,
        }
    }
}

struct CacheEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
    ttl: Duration,
    stale_while_revalidate: Duration,
}

enum Freshness {
    Fresh,
    Stale,
    Expired,
}

impl<T> CacheEntry<T> {
    fn freshness(&self, now: DateTime<Utc>) -> Freshness {
        // A clock that went backwards counts as age zero.
        let age = (now - self.stored_at).to_std().unwrap_or(Duration::ZERO);
        if age < self.ttl {
            Freshness::Fresh
        } else if age < self.ttl.saturating_add(self.stale_while_revalidate) {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}

/// Mutex-guarded map of entries. Expiry is lazy: entries are dropped when a
/// read finds them past `ttl + stale_while_revalidate`, and every
/// [`SWEEP_INTERVAL`] writes all such entries are dropped at once so keys that
/// are never read again do not pile up.
pub struct InMemoryCache<T> {
    name: &'static str,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    writes: AtomicUsize,
    settings: CacheSettings,
    clock: Arc<dyn Clock>,
}

impl<T> InMemoryCache<T> {
    pub fn new(name: &'static str, settings: CacheSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // Entries stay consistent even if a holder panicked; every write is a
        // single insert or remove.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send> CacheControl for InMemoryCache<T> {
    fn invalidate(&self, pattern: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !matches_pattern(pattern, key));
        let removed = before - entries.len();
        tracing::debug!(cache = self.name, pattern, removed, "cache invalidated");
        removed
    }

    fn clear(&self) {
        self.lock().clear();
        tracing::debug!(cache = self.name, "cache cleared");
    }
}

impl<T: Clone + Send> CacheStore<T> for InMemoryCache<T> {
    fn get(&self, key: &str) -> Option<CacheHit<T>> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let freshness = entries.get(key)?.freshness(now);
        match freshness {
            Freshness::Fresh => entries.get(key).map(|e| CacheHit::fresh(e.value.clone())),
            Freshness::Stale => entries.get(key).map(|e| CacheHit::stale(e.value.clone())),
            Freshness::Expired => {
                entries.remove(key);
                None
            }
        }
    }

    fn set(&self, key: &str, value: T, ttl: Option<Duration>) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
            ttl: ttl.unwrap_or(self.settings.default_ttl),
            stale_while_revalidate: self.settings.stale_while_revalidate,
        };
        let now = entry.stored_at;
        let mut entries = self.lock();
        entries.insert(key.to_string(), entry);

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            let before = entries.len();
            entries.retain(|_, entry| !matches!(entry.freshness(now), Freshness::Expired));
            let swept = before - entries.len();
            if swept > 0 {
                tracing::debug!(cache = self.name, swept, "expired entries swept");
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::time::ManualClock;

    fn cache(ttl: u64, swr: u64) -> (Arc<ManualClock>, InMemoryCache<String>) {
        let clock = Arc::new(ManualClock::new());
        let settings = CacheSettings {
            default_ttl: Duration::from_secs(ttl),
            stale_while_revalidate: Duration::from_secs(swr),
        };
        let cache = InMemoryCache::new("test", settings, clock.clone());
        (clock, cache)
    }

    #[test]
    fn set_then_get_within_ttl_is_fresh() {
        let (clock, cache) = cache(60, 0);
        cache.set("k", "v".to_string(), None);
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("k"), Some(CacheHit::fresh("v".to_string())));
    }

    #[test]
    fn entry_expires_at_ttl_without_stale_window() {
        let (clock, cache) = cache(60, 0);
        cache.set("k", "v".to_string(), None);
        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty(), "expired entry is removed on read");
    }

    #[test]
    fn stale_window_flags_value_then_expires() {
        let (clock, cache) = cache(60, 30);
        cache.set("k", "v".to_string(), None);

        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(CacheHit::stale("v".to_string())));

        clock.advance(Duration::from_secs(29));
        assert_eq!(cache.get("k"), Some(CacheHit::stale("v".to_string())));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn explicit_ttl_overrides_default() {
        let (clock, cache) = cache(300, 0);
        cache.set("short", "v".to_string(), Some(Duration::from_secs(5)));
        cache.set("long", "v".to_string(), None);
        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.get("short"), None);
        assert!(cache.get("long").is_some());
    }

    #[test]
    fn default_settings_use_five_minute_ttl() {
        assert_eq!(CacheSettings::default().default_ttl, Duration::from_secs(300));
    }

    #[test]
    fn last_write_wins_and_resets_age() {
        let (clock, cache) = cache(60, 0);
        cache.set("k", "first".to_string(), None);
        clock.advance(Duration::from_secs(50));
        cache.set("k", "second".to_string(), None);
        clock.advance(Duration::from_secs(50));
        assert_eq!(cache.get("k"), Some(CacheHit::fresh("second".to_string())));
    }

    #[test]
    fn invalidate_removes_all_and_only_matching_keys() {
        let (_, cache) = cache(60, 0);
        for key in ["articles:list:a", "articles:slug:blog:x", "categories:list:all", "articlesX"] {
            cache.set(key, key.to_string(), None);
        }

        assert_eq!(cache.invalidate("articles:*"), 2);
        assert!(cache.get("articles:list:a").is_none());
        assert!(cache.get("articles:slug:blog:x").is_none());
        assert!(cache.get("categories:list:all").is_some());
        assert!(cache.get("articlesX").is_some());

        assert_eq!(cache.invalidate("articlesX"), 1);
        assert_eq!(cache.invalidate("missing"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_and_remove() {
        let (_, cache) = cache(60, 0);
        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);
        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn periodic_sweep_drops_unread_expired_keys() {
        let (clock, cache) = cache(60, 30);
        for i in 0..10 {
            cache.set(&format!("articles:list:search={i}"), "old".to_string(), None);
        }
        clock.advance(Duration::from_secs(90));

        for i in 0..SWEEP_INTERVAL - 10 {
            cache.set(&format!("fresh:{i}"), "new".to_string(), None);
        }

        assert_eq!(cache.len(), SWEEP_INTERVAL - 10);
        assert!(cache.get("fresh:0").is_some());
    }

    #[test]
    fn sweep_keeps_stale_entries() {
        let (clock, cache) = cache(60, 30);
        cache.set("stale", "v".to_string(), None);
        clock.advance(Duration::from_secs(70));

        for i in 0..SWEEP_INTERVAL {
            cache.set(&format!("k{i}"), "v".to_string(), None);
        }

        assert_eq!(cache.get("stale"), Some(CacheHit::stale("v".to_string())));
    }

    #[test]
    fn concurrent_writers_on_distinct_keys() {
        let (_, cache) = cache(60, 0);
        let cache = Arc::new(cache);
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("t{t}:{i}");
                        cache.set(&key, key.clone(), None);
                        assert_eq!(cache.get(&key).map(|h| h.value), Some(key));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 800);
    }
}
