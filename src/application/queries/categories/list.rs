use super::CategoryQueryService;
use crate::{
    application::{
        dto::{CategoryDto, ListPage},
        error::ApplicationResult,
    },
    domain::article::ContentKind,
    trace::TraceContext,
};

#[derive(Debug, Clone, Default)]
pub struct ListCategoriesQuery {
    pub kind: Option<String>,
}

impl CategoryQueryService {
    pub async fn list_categories(
        &self,
        ctx: &TraceContext,
        query: ListCategoriesQuery,
    ) -> ApplicationResult<ListPage<CategoryDto>> {
        let kind = match query.kind.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<ContentKind>()?),
            _ => None,
        };
        let categories = self.repo.find_all(ctx, kind).await?;
        Ok(ListPage::unpaged(
            categories.into_iter().map(Into::into).collect(),
        ))
    }
}
