use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, ListPage},
        error::ApplicationResult,
    },
    domain::article::{ArticleFilter, ContentKind},
    trace::TraceContext,
};

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListArticlesQuery {
    pub fn of_kind(kind: ContentKind) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    pub(super) fn into_filter(self) -> ApplicationResult<ArticleFilter> {
        let mut filter = ArticleFilter::new();
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.trim().is_empty()) {
            filter = filter.with_kind(kind.parse::<ContentKind>()?);
        }
        if let Some(category) = self.category {
            filter = filter.with_category(category);
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        if let Some(offset) = self.offset {
            filter = filter.with_offset(offset);
        }
        if let Some(limit) = self.limit {
            filter = filter.with_limit(limit)?;
        }
        Ok(filter)
    }
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        ctx: &TraceContext,
        query: ListArticlesQuery,
    ) -> ApplicationResult<ListPage<ArticleDto>> {
        let filter = query.into_filter()?;
        let page = self.repo.find_all(ctx, &filter).await?;
        Ok(ListPage::from_page(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        let filter = ListArticlesQuery::default().into_filter().unwrap();
        assert_eq!(filter, ArticleFilter::default());
    }

    #[test]
    fn kind_and_limit_are_validated() {
        let query = ListArticlesQuery {
            kind: Some("newsletter".into()),
            ..ListArticlesQuery::default()
        };
        assert!(query.into_filter().is_err());

        let query = ListArticlesQuery {
            limit: Some(500),
            ..ListArticlesQuery::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn of_kind_sets_kind_only() {
        let filter = ListArticlesQuery::of_kind(ContentKind::Speckit)
            .into_filter()
            .unwrap();
        assert_eq!(filter.kind(), Some(ContentKind::Speckit));
        assert_eq!(filter.category(), None);
    }
}
