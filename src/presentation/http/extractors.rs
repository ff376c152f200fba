// src/presentation/http/extractors.rs
use crate::trace::{TraceContext, current_trace_context};
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use super::error::HttpError;

/// The request's [`TraceContext`], installed by the trace middleware.
#[derive(Debug, Clone)]
pub struct Trace(pub TraceContext);

impl<S> FromRequestParts<S> for Trace
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<TraceContext>()
            .cloned()
            .or_else(current_trace_context)
            .unwrap_or_else(TraceContext::root);
        Ok(Self(ctx))
    }
}

/// Query string extractor whose failures use the JSON error body.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
    }
}

/// Path parameters extractor; a segment that fails to parse is a 400 with the
/// JSON error body.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
    }
}
