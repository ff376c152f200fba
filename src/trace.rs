//! Per-request correlation metadata.
//!
//! A [`TraceContext`] is created once at the HTTP boundary and handed down by
//! reference to repositories, caches and the content API client. Its span is
//! entered around the request so every log line emitted while serving it
//! carries the same `request_id`.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{Instrument, Span};
use uuid::Uuid;

const MAX_REQUEST_ID_LEN: usize = 128;

tokio::task_local! {
    static CURRENT: TraceContext;
}

#[derive(Debug, Clone, Default)]
pub struct TraceOptions {
    pub request_id: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    request_id: String,
    timestamp: DateTime<Utc>,
    user_id: Option<String>,
    session_id: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl TraceContext {
    /// Builds a context. A missing or malformed `request_id` is replaced with a
    /// fresh UUID.
    pub fn new(options: TraceOptions) -> Self {
        let request_id = options
            .request_id
            .filter(|id| is_valid_request_id(id))
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            timestamp: Utc::now(),
            user_id: options.user_id,
            session_id: options.session_id,
            metadata: options.metadata,
        }
    }

    pub fn root() -> Self {
        Self::new(TraceOptions::default())
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            user_id = self.user_id.as_deref(),
            session_id = self.session_id.as_deref(),
        )
    }
}

fn is_valid_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

/// Runs `future` inside `ctx`: its span is entered on every poll and
/// [`current_trace_context`] returns `ctx` for the duration.
pub async fn with_trace_context<F>(ctx: TraceContext, future: F) -> F::Output
where
    F: Future,
{
    let span = ctx.span();
    CURRENT.scope(ctx, future.instrument(span)).await
}

/// The context installed by the enclosing [`with_trace_context`], if any.
pub fn current_trace_context() -> Option<TraceContext> {
    CURRENT.try_with(Clone::clone).ok()
}
