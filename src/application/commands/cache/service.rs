// src/application/commands/cache/service.rs
use std::sync::Arc;

use crate::application::ports::cache::CacheControl;

pub struct CacheCommandService {
    pub(super) caches: Vec<Arc<dyn CacheControl>>,
    pub(super) webhook_token: Option<String>,
}

impl CacheCommandService {
    pub fn new(caches: Vec<Arc<dyn CacheControl>>, webhook_token: Option<String>) -> Self {
        Self {
            caches,
            webhook_token,
        }
    }
}
