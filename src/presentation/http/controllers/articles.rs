// src/presentation/http/controllers/articles.rs
use crate::application::{
    dto::ArticleDto,
    queries::articles::{GetArticleByIdQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiPath, ApiQuery, Trace};
use crate::presentation::http::responses::DataResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleListParams {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl From<ArticleListParams> for ListArticlesQuery {
    fn from(params: ArticleListParams) -> Self {
        Self {
            kind: params.kind,
            category: params.category,
            search: params.search,
            offset: params.offset,
            limit: params.limit,
        }
    }
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiQuery(params): ApiQuery<ArticleListParams>,
) -> HttpResult<Json<DataResponse<Vec<ArticleDto>>>> {
    state
        .services
        .article_queries
        .list_articles(&ctx, params.into())
        .await
        .into_http(state.environment)
        .map(|page| Json(page.into()))
}

pub async fn get_article_by_id(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<DataResponse<ArticleDto>>> {
    state
        .services
        .article_queries
        .get_article_by_id(&ctx, GetArticleByIdQuery { id })
        .await
        .into_http(state.environment)
        .map(|article| Json(DataResponse::single(article)))
}
