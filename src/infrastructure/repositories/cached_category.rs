use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::cache::CacheStore;
use crate::domain::{
    article::ContentKind,
    category::{Category, CategoryRepository},
    errors::RepositoryResult,
};
use crate::infrastructure::cache::ReadThrough;
use crate::trace::TraceContext;

pub struct CachedCategoryRepository {
    inner: Arc<dyn CategoryRepository>,
    lists: ReadThrough<Vec<Category>>,
    entries: ReadThrough<Category>,
}

impl CachedCategoryRepository {
    pub fn new(
        inner: Arc<dyn CategoryRepository>,
        lists: Arc<dyn CacheStore<Vec<Category>>>,
        entries: Arc<dyn CacheStore<Category>>,
    ) -> Self {
        Self {
            inner,
            lists: ReadThrough::new(lists),
            entries: ReadThrough::new(entries),
        }
    }
}

#[async_trait]
impl CategoryRepository for CachedCategoryRepository {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        kind: Option<ContentKind>,
    ) -> RepositoryResult<Vec<Category>> {
        let key = format!(
            "categories:list:{}",
            kind.map_or("all", ContentKind::as_str)
        );
        let inner = Arc::clone(&self.inner);
        let load_ctx = ctx.clone();
        let categories = self
            .lists
            .get_or_load(ctx, key, move || async move {
                inner.find_all(&load_ctx, kind).await.map(Some)
            })
            .await?;
        Ok(categories.unwrap_or_default())
    }

    async fn find_by_slug(
        &self,
        ctx: &TraceContext,
        slug: &str,
    ) -> RepositoryResult<Option<Category>> {
        let slug = slug.trim().to_lowercase();
        let key = format!("categories:slug:{slug}");
        let inner = Arc::clone(&self.inner);
        let load_ctx = ctx.clone();
        self.entries
            .get_or_load(ctx, key, move || async move {
                inner.find_by_slug(&load_ctx, &slug).await
            })
            .await
    }
}
