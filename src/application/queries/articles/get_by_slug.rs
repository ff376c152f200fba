use super::ArticleQueryService;
use super::service::kind_label;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleSlug, ContentKind},
    trace::TraceContext,
};

pub struct GetArticleBySlugQuery {
    pub kind: ContentKind,
    pub slug: String,
}

impl ArticleQueryService {
    pub(super) async fn load_by_slug(
        &self,
        ctx: &TraceContext,
        kind: ContentKind,
        slug: &str,
    ) -> ApplicationResult<Article> {
        if slug.trim().is_empty() {
            return Err(ApplicationError::validation("Slug is required"));
        }
        let slug = ArticleSlug::new(slug)?;
        self.repo
            .find_by_slug(ctx, kind, &slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} not found", kind_label(kind))))
    }

    pub async fn get_article_by_slug(
        &self,
        ctx: &TraceContext,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let article = self.load_by_slug(ctx, query.kind, &query.slug).await?;
        Ok(article.into())
    }
}
