// src/presentation/http/controllers/webhooks.rs
use crate::application::commands::cache::{ContentChangedCommand, InvalidationReport};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Trace;
use crate::presentation::http::responses::DataResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::rejection::JsonRejection, http::HeaderMap};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::Deserialize;

/// CMS webhook payload. Only `event` and `model` drive invalidation; `entry`
/// is accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ContentWebhookPayload {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub entry: Option<serde_json::Value>,
}

pub async fn content_changed(
    Extension(state): Extension<HttpState>,
    Trace(ctx): Trace,
    headers: HeaderMap,
    payload: Result<Json<ContentWebhookPayload>, JsonRejection>,
) -> HttpResult<Json<DataResponse<InvalidationReport>>> {
    let token = headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string());
    state
        .services
        .cache_commands
        .authorize_webhook(token.as_deref())
        .into_http(state.environment)?;
    let Json(payload) = payload.map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;

    state
        .services
        .cache_commands
        .handle_content_changed(
            &ctx,
            ContentChangedCommand {
                token,
                event: payload.event,
                model: payload.model,
            },
        )
        .into_http(state.environment)
        .map(|report| Json(DataResponse::single(report)))
}
