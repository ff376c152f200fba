use async_trait::async_trait;
use tracing::debug;

use super::error::map_transport;
use super::mapping::{collect_records, map_article, map_pagination};
use crate::domain::{
    article::{
        Article, ArticleFilter, ArticleId, ArticleRepository, ArticleSlug, ContentKind,
        DEFAULT_PAGE_SIZE,
    },
    errors::RepositoryResult,
    pagination::Page,
};
use crate::infrastructure::content_api::{ContentApiClient, ContentQuery, FilterOp, SortOrder};
use crate::trace::TraceContext;

const RESOURCE: &str = "articles";
const LIST_FIELDS: &[&str] = &["title", "slug", "description", "type", "createdAt", "updatedAt"];
const LIST_RELATIONS: &[&str] = &["category", "file"];
const DETAIL_RELATIONS: &[&str] = &["category", "file", "faq"];
const SEARCH_FIELDS: &[&str] = &["title", "description"];

/// Reads articles straight from the content API.
#[derive(Clone)]
pub struct ApiArticleRepository {
    client: ContentApiClient,
}

impl ApiArticleRepository {
    pub fn new(client: ContentApiClient) -> Self {
        Self { client }
    }

    async fn find_one(
        &self,
        ctx: &TraceContext,
        query: ContentQuery,
    ) -> RepositoryResult<Option<Article>> {
        let query = query.populate(DETAIL_RELATIONS).page_size(1);
        let envelope = self
            .client
            .get(ctx, RESOURCE, &query)
            .await
            .map_err(|e| map_transport("load article", e))?;

        Ok(collect_records(ctx, RESOURCE, &envelope, map_article)
            .into_iter()
            .next())
    }
}

/// Translates a typed filter into the content API's query syntax.
pub(super) fn list_query(filter: &ArticleFilter) -> ContentQuery {
    let mut query = ContentQuery::new();
    if let Some(kind) = filter.kind() {
        query = query.filter(&["type"], FilterOp::Eq, kind);
    }
    if let Some(category) = filter.category() {
        query = query.filter(&["category", "slug"], FilterOp::Eq, category);
    }
    if let Some(search) = filter.search() {
        query = query.any_of(SEARCH_FIELDS, FilterOp::ContainsI, search);
    }
    query = query
        .fields(LIST_FIELDS)
        .populate(LIST_RELATIONS)
        .sort("createdAt", SortOrder::Desc);

    match (filter.offset(), filter.limit()) {
        (Some(offset), limit) => query.start_limit(offset, limit.unwrap_or(DEFAULT_PAGE_SIZE)),
        (None, Some(limit)) => query.page_size(limit),
        (None, None) => query,
    }
}

#[async_trait]
impl ArticleRepository for ApiArticleRepository {
    async fn find_all(
        &self,
        ctx: &TraceContext,
        filter: &ArticleFilter,
    ) -> RepositoryResult<Page<Article>> {
        let query = list_query(filter);
        let envelope = self
            .client
            .get(ctx, RESOURCE, &query)
            .await
            .map_err(|e| map_transport("load articles", e))?;

        let items = collect_records(ctx, RESOURCE, &envelope, map_article);
        debug!(
            request_id = %ctx.request_id(),
            received = envelope.records().len(),
            mapped = items.len(),
            "articles loaded"
        );
        Ok(Page::new(items, envelope.pagination().map(map_pagination)))
    }

    async fn find_by_slug(
        &self,
        ctx: &TraceContext,
        kind: ContentKind,
        slug: &ArticleSlug,
    ) -> RepositoryResult<Option<Article>> {
        let query = ContentQuery::new()
            .filter(&["slug"], FilterOp::Eq, slug)
            .filter(&["type"], FilterOp::Eq, kind);
        self.find_one(ctx, query).await
    }

    async fn find_by_id(
        &self,
        ctx: &TraceContext,
        id: ArticleId,
    ) -> RepositoryResult<Option<Article>> {
        let query = ContentQuery::new().filter(&["id"], FilterOp::Eq, id);
        self.find_one(ctx, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &ContentQuery) -> Vec<(String, String)> {
        query.pairs().to_vec()
    }

    fn has(query: &ContentQuery, key: &str, value: &str) -> bool {
        pairs(query).iter().any(|(k, v)| k == key && v == value)
    }

    #[test]
    fn empty_filter_only_projects_and_sorts() {
        let query = list_query(&ArticleFilter::new());
        assert!(pairs(&query).iter().all(|(k, _)| !k.starts_with("filters")));
        assert!(pairs(&query).iter().all(|(k, _)| !k.starts_with("pagination")));
        assert!(has(&query, "sort[0]", "createdAt:desc"));
        assert!(has(&query, "populate[1]", "file"));
    }

    #[test]
    fn filter_fields_map_to_bracketed_filters() {
        let filter = ArticleFilter::new()
            .with_kind(ContentKind::Speckit)
            .with_category("Tools")
            .with_search("rust");
        let query = list_query(&filter);

        assert!(has(&query, "filters[type][$eq]", "speckit"));
        assert!(has(&query, "filters[category][slug][$eq]", "tools"));
        assert!(has(&query, "filters[$or][0][title][$containsi]", "rust"));
        assert!(has(&query, "filters[$or][1][description][$containsi]", "rust"));
    }

    #[test]
    fn offset_switches_to_start_limit_paging() {
        let query = list_query(&ArticleFilter::new().with_offset(20).with_limit(10).unwrap());
        assert!(has(&query, "pagination[start]", "20"));
        assert!(has(&query, "pagination[limit]", "10"));
        assert!(pairs(&query).iter().all(|(k, _)| k != "pagination[pageSize]"));

        let query = list_query(&ArticleFilter::new().with_limit(5).unwrap());
        assert!(has(&query, "pagination[pageSize]", "5"));
    }
}
