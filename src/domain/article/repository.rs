use crate::trace::TraceContext;
use crate::domain::article::entity::Article;
use crate::domain::article::filter::ArticleFilter;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ContentKind};
use crate::domain::errors::RepositoryResult;
use crate::domain::pagination::Page;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        filter: &ArticleFilter,
    ) -> RepositoryResult<Page<Article>>;

    /// `Ok(None)` when no article of `kind` has this slug.
    async fn find_by_slug(
        &self,
        ctx: &TraceContext,
        kind: ContentKind,
        slug: &ArticleSlug,
    ) -> RepositoryResult<Option<Article>>;

    async fn find_by_id(&self, ctx: &TraceContext, id: ArticleId)
    -> RepositoryResult<Option<Article>>;
}
