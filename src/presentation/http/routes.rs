// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, categories, speckits, webhooks},
    middleware::trace::trace_context,
    responses::StatusResponse,
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route("/api/articles", get(articles::list_articles))
        .route("/api/articles/{id}", get(articles::get_article_by_id))
        .route("/api/speckits", get(speckits::list_speckits))
        .route("/api/speckits/{slug}", get(speckits::get_speckit))
        .route(
            "/api/speckits/{slug}/download",
            get(speckits::download_speckit),
        )
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{slug}", get(categories::get_category))
        .route("/api/webhooks/content", post(webhooks::content_changed))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_context))
        .layer(cors)
        .layer(Extension(state))
}

/// `*` anywhere in the list allows every origin; unparseable entries are
/// dropped.
fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}

pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
