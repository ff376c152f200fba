use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
    trace::TraceContext,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    pub async fn get_article_by_id(
        &self,
        ctx: &TraceContext,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .repo
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article not found"))?;
        Ok(article.into())
    }
}
