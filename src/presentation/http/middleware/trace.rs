use crate::trace::{TraceContext, TraceOptions, with_trace_context};
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the request's root [`TraceContext`], runs the rest of the stack
/// inside it and echoes the request id back to the caller.
pub async fn trace_context(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let ctx = TraceContext::new(TraceOptions {
        request_id,
        ..TraceOptions::default()
    })
    .with_metadata("method", request.method().as_str())
    .with_metadata("path", request.uri().path());

    let request_id = ctx.request_id().to_string();
    request.extensions_mut().insert(ctx.clone());

    let mut response = with_trace_context(ctx, next.run(request)).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
