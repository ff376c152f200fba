use super::CategoryQueryService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    trace::TraceContext,
};

pub struct GetCategoryBySlugQuery {
    pub slug: String,
}

impl CategoryQueryService {
    pub async fn get_category_by_slug(
        &self,
        ctx: &TraceContext,
        query: GetCategoryBySlugQuery,
    ) -> ApplicationResult<CategoryDto> {
        let slug = query.slug.trim().to_lowercase();
        if slug.is_empty() {
            return Err(ApplicationError::validation("Slug is required"));
        }
        self.repo
            .find_by_slug(ctx, &slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("Category not found"))
    }
}
