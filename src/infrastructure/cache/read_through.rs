use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{Instrument, debug, warn};

use crate::application::ports::cache::CacheStore;
use crate::domain::errors::RepositoryResult;
use crate::trace::TraceContext;

/// Read-through access to a [`CacheStore`].
///
/// Fresh hits are returned directly. Stale hits are returned too, and a
/// background task reloads the entry; at most one such refresh runs per key.
/// Misses load inline and populate the cache. Loads that find nothing are not
/// cached.
pub struct ReadThrough<T> {
    cache: Arc<dyn CacheStore<T>>,
    refreshing: Arc<Mutex<HashSet<String>>>,
}

impl<T> Clone for ReadThrough<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            refreshing: Arc::clone(&self.refreshing),
        }
    }
}

impl<T> ReadThrough<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(cache: Arc<dyn CacheStore<T>>) -> Self {
        Self {
            cache,
            refreshing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub async fn get_or_load<F, Fut>(
        &self,
        ctx: &TraceContext,
        key: String,
        load: F,
    ) -> RepositoryResult<Option<T>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = RepositoryResult<Option<T>>> + Send + 'static,
    {
        match self.cache.get(&key) {
            Some(hit) if !hit.stale => {
                debug!(request_id = %ctx.request_id(), key = %key, "cache hit");
                Ok(Some(hit.value))
            }
            Some(hit) => {
                debug!(request_id = %ctx.request_id(), key = %key, "cache stale, serving and refreshing");
                self.spawn_refresh(ctx, key, load);
                Ok(Some(hit.value))
            }
            None => {
                debug!(request_id = %ctx.request_id(), key = %key, "cache miss");
                let loaded = load().await?;
                if let Some(value) = &loaded {
                    self.cache.set(&key, value.clone(), None);
                }
                Ok(loaded)
            }
        }
    }

    fn spawn_refresh<F, Fut>(&self, ctx: &TraceContext, key: String, load: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = RepositoryResult<Option<T>>> + Send + 'static,
    {
        {
            let mut refreshing = self.refreshing.lock().unwrap_or_else(PoisonError::into_inner);
            if !refreshing.insert(key.clone()) {
                return;
            }
        }

        let cache = Arc::clone(&self.cache);
        let refreshing = Arc::clone(&self.refreshing);
        let request_id = ctx.request_id().to_string();

        tokio::spawn(
            async move {
                match load().await {
                    Ok(Some(value)) => {
                        cache.set(&key, value, None);
                        debug!(request_id = %request_id, key = %key, "cache refreshed");
                    }
                    Ok(None) => {
                        cache.remove(&key);
                        debug!(request_id = %request_id, key = %key, "entry gone upstream, evicted");
                    }
                    Err(err) => {
                        warn!(
                            request_id = %request_id,
                            key = %key,
                            error = %err.detail(),
                            "background cache refresh failed"
                        );
                    }
                }
                refreshing
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&key);
            }
            .instrument(ctx.span()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::infrastructure::cache::{CacheSettings, InMemoryCache};
    use crate::infrastructure::time::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn setup() -> (Arc<ManualClock>, ReadThrough<String>) {
        let clock = Arc::new(ManualClock::new());
        let settings = CacheSettings {
            default_ttl: Duration::from_secs(60),
            stale_while_revalidate: Duration::from_secs(60),
        };
        let cache: Arc<dyn CacheStore<String>> =
            Arc::new(InMemoryCache::new("test", settings, clock.clone()));
        (clock, ReadThrough::new(cache))
    }

    fn counting_loader(
        calls: &Arc<AtomicUsize>,
        value: &str,
    ) -> impl FnOnce() -> std::future::Ready<RepositoryResult<Option<String>>> + Send + 'static
    {
        let calls = Arc::clone(calls);
        let value = value.to_string();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(Some(value)))
        }
    }

    #[tokio::test]
    async fn miss_loads_then_hit_serves_from_cache() {
        let (_, rt) = setup();
        let ctx = TraceContext::root();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = rt
            .get_or_load(&ctx, "k".into(), counting_loader(&calls, "v1"))
            .await
            .unwrap();
        let second = rt
            .get_or_load(&ctx, "k".into(), counting_loader(&calls, "v2"))
            .await
            .unwrap();

        assert_eq!(first.as_deref(), Some("v1"));
        assert_eq!(second.as_deref(), Some("v1"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_is_not_cached() {
        let (_, rt) = setup();
        let ctx = TraceContext::root();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            let found = rt
                .get_or_load(&ctx, "missing".into(), move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    std::future::ready(Ok(None))
                })
                .await
                .unwrap();
            assert!(found.is_none());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn load_errors_propagate() {
        let (_, rt) = setup();
        let ctx = TraceContext::root();
        let result = rt
            .get_or_load(&ctx, "k".into(), || {
                std::future::ready(Err(RepositoryError::new("upstream down")))
            })
            .await;
        assert_eq!(result.unwrap_err().message(), "upstream down");
    }

    #[tokio::test]
    async fn stale_hit_returns_old_value_and_refreshes_in_background() {
        let (clock, rt) = setup();
        let ctx = TraceContext::root();
        let calls = Arc::new(AtomicUsize::new(0));

        rt.get_or_load(&ctx, "k".into(), counting_loader(&calls, "old"))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(90));

        let stale = rt
            .get_or_load(&ctx, "k".into(), counting_loader(&calls, "new"))
            .await
            .unwrap();
        assert_eq!(stale.as_deref(), Some("old"));

        let mut refreshed = None;
        for _ in 0..50 {
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(5)).await;
            let current = rt
                .get_or_load(&ctx, "k".into(), counting_loader(&calls, "unused"))
                .await
                .unwrap();
            if current.as_deref() == Some("new") {
                refreshed = current;
                break;
            }
        }
        assert_eq!(refreshed.as_deref(), Some("new"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
