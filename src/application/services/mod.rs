// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::cache::CacheCommandService,
        ports::{cache::CacheControl, files::FileSource},
        queries::{articles::ArticleQueryService, categories::CategoryQueryService},
    },
    domain::{article::ArticleRepository, category::CategoryRepository},
};

pub struct ApplicationServices {
    pub article_queries: Arc<ArticleQueryService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub cache_commands: Arc<CacheCommandService>,
}

impl ApplicationServices {
    pub fn new(
        article_repo: Arc<dyn ArticleRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        file_source: Arc<dyn FileSource>,
        caches: Vec<Arc<dyn CacheControl>>,
        webhook_token: Option<String>,
    ) -> Self {
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_repo),
            Arc::clone(&file_source),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_repo)));
        let cache_commands = Arc::new(CacheCommandService::new(caches, webhook_token));

        Self {
            article_queries,
            category_queries,
            cache_commands,
        }
    }
}
