use std::sync::Arc;

use async_trait::async_trait;

use super::api_article::list_query;
use crate::application::ports::cache::CacheStore;
use crate::domain::{
    article::{Article, ArticleFilter, ArticleId, ArticleRepository, ArticleSlug, ContentKind},
    errors::RepositoryResult,
    pagination::Page,
};
use crate::infrastructure::cache::ReadThrough;
use crate::trace::TraceContext;

fn list_key(filter: &ArticleFilter) -> String {
    format!("articles:list:{}", list_query(filter).cache_key())
}

fn slug_key(kind: ContentKind, slug: &ArticleSlug) -> String {
    format!("articles:slug:{kind}:{slug}")
}

fn id_key(id: ArticleId) -> String {
    format!("articles:id:{id}")
}

/// Read-through cache in front of another [`ArticleRepository`].
pub struct CachedArticleRepository {
    inner: Arc<dyn ArticleRepository>,
    lists: ReadThrough<Page<Article>>,
    entries: ReadThrough<Article>,
}

impl CachedArticleRepository {
    pub fn new(
        inner: Arc<dyn ArticleRepository>,
        lists: Arc<dyn CacheStore<Page<Article>>>,
        entries: Arc<dyn CacheStore<Article>>,
    ) -> Self {
        Self {
            inner,
            lists: ReadThrough::new(lists),
            entries: ReadThrough::new(entries),
        }
    }
}

#[async_trait]
impl ArticleRepository for CachedArticleRepository {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        filter: &ArticleFilter,
    ) -> RepositoryResult<Page<Article>> {
        let inner = Arc::clone(&self.inner);
        let (load_ctx, load_filter) = (ctx.clone(), filter.clone());
        let page = self
            .lists
            .get_or_load(ctx, list_key(filter), move || async move {
                inner.find_all(&load_ctx, &load_filter).await.map(Some)
            })
            .await?;
        Ok(page.unwrap_or_default())
    }

    async fn find_by_slug(
        &self,
        ctx: &TraceContext,
        kind: ContentKind,
        slug: &ArticleSlug,
    ) -> RepositoryResult<Option<Article>> {
        let inner = Arc::clone(&self.inner);
        let (load_ctx, load_slug) = (ctx.clone(), slug.clone());
        self.entries
            .get_or_load(ctx, slug_key(kind, slug), move || async move {
                inner.find_by_slug(&load_ctx, kind, &load_slug).await
            })
            .await
    }

    async fn find_by_id(
        &self,
        ctx: &TraceContext,
        id: ArticleId,
    ) -> RepositoryResult<Option<Article>> {
        let inner = Arc::clone(&self.inner);
        let load_ctx = ctx.clone();
        self.entries
            .get_or_load(ctx, id_key(id), move || async move {
                inner.find_by_id(&load_ctx, id).await
            })
            .await
    }
}
