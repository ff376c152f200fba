use crate::domain::article::ContentKind;
use crate::domain::category::entity::Category;
use crate::domain::errors::RepositoryResult;
use crate::trace::TraceContext;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        kind: Option<ContentKind>,
    ) -> RepositoryResult<Vec<Category>>;

    async fn find_by_slug(&self, ctx: &TraceContext, slug: &str)
    -> RepositoryResult<Option<Category>>;
}
