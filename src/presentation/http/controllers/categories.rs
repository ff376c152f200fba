// src/presentation/http/controllers/categories.rs
use crate::application::{
    dto::CategoryDto,
    queries::categories::{GetCategoryBySlugQuery, ListCategoriesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiPath, ApiQuery, Trace};
use crate::presentation::http::responses::DataResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryListParams {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

pub async fn list_categories(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiQuery(params): ApiQuery<CategoryListParams>,
) -> HttpResult<Json<DataResponse<Vec<CategoryDto>>>> {
    state
        .services
        .category_queries
        .list_categories(&ctx, ListCategoriesQuery { kind: params.kind })
        .await
        .into_http(state.environment)
        .map(|page| Json(page.into()))
}

pub async fn get_category(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<DataResponse<CategoryDto>>> {
    state
        .services
        .category_queries
        .get_category_by_slug(&ctx, GetCategoryBySlugQuery { slug })
        .await
        .into_http(state.environment)
        .map(|category| Json(DataResponse::single(category)))
}
