// src/presentation/http/controllers/speckits.rs
use crate::application::{
    dto::ArticleDto,
    queries::articles::{DownloadArticleFileQuery, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::domain::article::ContentKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiPath, ApiQuery, Trace};
use crate::presentation::http::responses::DataResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    body::Body,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

/// Same as the article listing, without `type`: the kind is fixed.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeckitListParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

pub async fn list_speckits(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiQuery(params): ApiQuery<SpeckitListParams>,
) -> HttpResult<Json<DataResponse<Vec<ArticleDto>>>> {
    let query = ListArticlesQuery {
        category: params.category,
        search: params.search,
        offset: params.offset,
        limit: params.limit,
        ..ListArticlesQuery::of_kind(ContentKind::Speckit)
    };
    state
        .services
        .article_queries
        .list_articles(&ctx, query)
        .await
        .into_http(state.environment)
        .map(|page| Json(page.into()))
}

pub async fn get_speckit(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<DataResponse<ArticleDto>>> {
    state
        .services
        .article_queries
        .get_article_by_slug(
            &ctx,
            GetArticleBySlugQuery {
                kind: ContentKind::Speckit,
                slug,
            },
        )
        .await
        .into_http(state.environment)
        .map(|article| Json(DataResponse::single(article)))
}

pub async fn download_speckit(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Response> {
    let file = state
        .services
        .article_queries
        .download_article_file(
            &ctx,
            DownloadArticleFileQuery {
                kind: ContentKind::Speckit,
                slug,
            },
        )
        .await
        .into_http(state.environment)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(file.content_type())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&file.file.name),
    );
    if let Some(length) = file.download.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    Ok((headers, Body::from_stream(file.download.body)).into_response())
}

/// `attachment; filename="<name>"` with quotes, backslashes and control
/// characters removed from the name.
fn content_disposition(name: &str) -> HeaderValue {
    let sanitized: String = name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\'))
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{sanitized}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_quotes_plain_names() {
        assert_eq!(
            content_disposition("guide.zip"),
            "attachment; filename=\"guide.zip\""
        );
    }

    #[test]
    fn disposition_strips_unsafe_characters() {
        assert_eq!(
            content_disposition("a\"b\\c\r\n.zip"),
            "attachment; filename=\"abc.zip\""
        );
    }
}
