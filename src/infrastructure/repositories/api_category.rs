use async_trait::async_trait;

use super::error::map_transport;
use super::mapping::{collect_records, map_category};
use crate::domain::{
    article::ContentKind,
    category::{Category, CategoryRepository},
    errors::RepositoryResult,
};
use crate::infrastructure::content_api::{ContentApiClient, ContentQuery, FilterOp, SortOrder};
use crate::trace::TraceContext;

const RESOURCE: &str = "categories";
const FIELDS: &[&str] = &["slug", "name", "type"];
/// Categories are few; one page holds them all.
const LIST_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct ApiCategoryRepository {
    client: ContentApiClient,
}

impl ApiCategoryRepository {
    pub fn new(client: ContentApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepository for ApiCategoryRepository {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        kind: Option<ContentKind>,
    ) -> RepositoryResult<Vec<Category>> {
        let mut query = ContentQuery::new();
        if let Some(kind) = kind {
            query = query.filter(&["type"], FilterOp::Eq, kind);
        }
        let query = query
            .fields(FIELDS)
            .sort("name", SortOrder::Asc)
            .page_size(LIST_PAGE_SIZE);

        let envelope = self
            .client
            .get(ctx, RESOURCE, &query)
            .await
            .map_err(|e| map_transport("load categories", e))?;
        Ok(collect_records(ctx, RESOURCE, &envelope, map_category))
    }

    async fn find_by_slug(
        &self,
        ctx: &TraceContext,
        slug: &str,
    ) -> RepositoryResult<Option<Category>> {
        let query = ContentQuery::new()
            .filter(&["slug"], FilterOp::Eq, slug.trim().to_lowercase())
            .fields(FIELDS)
            .page_size(1);

        let envelope = self
            .client
            .get(ctx, RESOURCE, &query)
            .await
            .map_err(|e| map_transport("load category", e))?;
        Ok(collect_records(ctx, RESOURCE, &envelope, map_category)
            .into_iter()
            .next())
    }
}
