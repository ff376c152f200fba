//! Composition root: wires adapters, caches and services into a router.

use std::sync::Arc;

use axum::Router;

use crate::application::ports::{cache::CacheControl, files::FileSource, time::Clock};
use crate::application::services::ApplicationServices;
use crate::config::AppConfig;
use crate::domain::{
    article::{Article, ArticleRepository},
    category::{Category, CategoryRepository},
    pagination::Page,
};
use crate::infrastructure::{
    cache::InMemoryCache,
    content_api::{ContentApiClient, ContentApiFileSource, TransportResult},
    repositories::{
        ApiArticleRepository, ApiCategoryRepository, CachedArticleRepository,
        CachedCategoryRepository,
    },
};
use crate::presentation::http::{routes::build_router, state::HttpState};

pub fn build_app(config: &AppConfig, clock: Arc<dyn Clock>) -> TransportResult<Router> {
    let client = ContentApiClient::new(config.content_api().clone())?;
    let settings = config.cache();

    let article_lists = Arc::new(InMemoryCache::<Page<Article>>::new(
        "article_lists",
        settings,
        Arc::clone(&clock),
    ));
    let articles = Arc::new(InMemoryCache::<Article>::new(
        "articles",
        settings,
        Arc::clone(&clock),
    ));
    let category_lists = Arc::new(InMemoryCache::<Vec<Category>>::new(
        "category_lists",
        settings,
        Arc::clone(&clock),
    ));
    let categories = Arc::new(InMemoryCache::<Category>::new(
        "categories",
        settings,
        Arc::clone(&clock),
    ));

    let article_repo: Arc<dyn ArticleRepository> = Arc::new(CachedArticleRepository::new(
        Arc::new(ApiArticleRepository::new(client.clone())),
        article_lists.clone(),
        articles.clone(),
    ));
    let category_repo: Arc<dyn CategoryRepository> = Arc::new(CachedCategoryRepository::new(
        Arc::new(ApiCategoryRepository::new(client.clone())),
        category_lists.clone(),
        categories.clone(),
    ));
    let file_source: Arc<dyn FileSource> = Arc::new(ContentApiFileSource::new(client.clone()));

    let caches: Vec<Arc<dyn CacheControl>> = vec![
        article_lists as Arc<dyn CacheControl>,
        articles as Arc<dyn CacheControl>,
        category_lists as Arc<dyn CacheControl>,
        categories as Arc<dyn CacheControl>,
    ];

    let services = Arc::new(ApplicationServices::new(
        article_repo,
        category_repo,
        file_source,
        caches,
        config.webhook_token().map(str::to_string),
    ));

    tracing::info!(
        content_api = %client.base_url(),
        authenticated = client.is_authenticated(),
        ttl_secs = settings.default_ttl.as_secs(),
        stale_while_revalidate_secs = settings.stale_while_revalidate.as_secs(),
        "content gateway assembled"
    );

    let state = HttpState {
        services,
        environment: config.environment(),
    };
    Ok(build_router(state, config.allowed_origins()))
}
