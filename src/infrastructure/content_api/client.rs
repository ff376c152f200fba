//! Content API client with timeout and bounded retry.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::{StreamExt, TryStreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use super::config::{ContentApiConfig, RetryPolicy};
use super::envelope::{ApiEnvelope, ApiErrorEnvelope};
use super::error::{TransportError, TransportErrorKind, TransportResult};
use super::query::ContentQuery;
use crate::application::ports::files::ByteStream;
use crate::trace::TraceContext;

const USER_AGENT_VALUE: &str = concat!("content-gateway/", env!("CARGO_PKG_VERSION"));

/// Binary response opened by [`ContentApiClient::open_download`].
pub struct Download {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

#[derive(Debug, Clone)]
pub struct ContentApiClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ContentApiClient {
    /// Fails when the base URL is empty or not an absolute http(s) URL.
    pub fn new(config: ContentApiConfig) -> TransportResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Total deadlines are set per JSON request; downloads are bounded per read.
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .read_timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                TransportError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            token: config.token.filter(|t| !t.trim().is_empty()),
            timeout: config.timeout,
            retry: RetryPolicy {
                max_attempts: config.retry.max_attempts.max(1),
                ..config.retry
            },
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// GET `/api/<path>` and decode the `{ data, meta }` envelope. The whole
    /// exchange, body included, must finish within the configured timeout.
    pub async fn get(
        &self,
        ctx: &TraceContext,
        path: &str,
        query: &ContentQuery,
    ) -> TransportResult<ApiEnvelope> {
        let url = self.endpoint(path)?;
        let url = &url;
        let (body, attempts) = self
            .with_retry(ctx, url, move || async move {
                let response = self.send_once(url, Some(query)).await?;
                response.bytes().await.map_err(TransportError::from_body)
            })
            .await?;

        serde_json::from_slice::<ApiEnvelope>(&body).map_err(|e| {
            TransportError::invalid_response(format!("failed to decode response body: {e}"))
                .with_attempts(attempts)
        })
    }

    /// Opens a binary resource. `location` is either absolute or a path resolved
    /// against the content API origin (media URLs such as `/uploads/x.zip`).
    ///
    /// The timeout bounds the wait for response headers and every single read
    /// of the body, not the length of the transfer.
    pub async fn open_download(
        &self,
        ctx: &TraceContext,
        location: &str,
    ) -> TransportResult<Download> {
        let url = self.resolve(location)?;
        let url = &url;
        let (response, _) = self
            .with_retry(ctx, url, move || self.send_once(url, None))
            .await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();
        let body = response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed();

        Ok(Download {
            content_type,
            content_length,
            body,
        })
    }

    fn endpoint(&self, path: &str) -> TransportResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                TransportError::configuration("content api base url cannot be a base")
            })?;
            segments.pop_if_empty().push("api");
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    fn resolve(&self, location: &str) -> TransportResult<Url> {
        let location = location.trim();
        if location.is_empty() {
            return Err(TransportError::configuration("download location is empty"));
        }
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            Ok(url) => Err(TransportError::configuration(format!(
                "unsupported download scheme `{}`",
                url.scheme()
            ))),
            Err(_) => self.base_url.join(location).map_err(|e| {
                TransportError::configuration(format!("invalid download location: {e}"))
            }),
        }
    }

    /// Runs `exchange` until it succeeds, fails for good, or the attempts
    /// run out. Returns the output with the number of attempts used.
    async fn with_retry<T, F, Fut>(
        &self,
        ctx: &TraceContext,
        url: &Url,
        mut exchange: F,
    ) -> TransportResult<(T, u32)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let max_attempts = self.retry.max_attempts;
        let mut attempt = 1;

        loop {
            let started = Instant::now();
            match exchange().await {
                Ok(output) => {
                    debug!(
                        request_id = %ctx.request_id(),
                        path = %url.path(),
                        attempt,
                        elapsed_ms = millis(started.elapsed()),
                        "content api request succeeded"
                    );
                    return Ok((output, attempt));
                }
                Err(err) => {
                    let err = err.with_attempts(attempt);
                    if !err.is_retryable() || attempt >= max_attempts {
                        warn!(
                            request_id = %ctx.request_id(),
                            path = %url.path(),
                            attempt,
                            max_attempts,
                            kind = %err.kind,
                            status = err.status_code,
                            error = %err.message,
                            "content api request failed"
                        );
                        return Err(err);
                    }

                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        request_id = %ctx.request_id(),
                        path = %url.path(),
                        attempt,
                        max_attempts,
                        kind = %err.kind,
                        status = err.status_code,
                        delay_ms = millis(delay),
                        error = %err.message,
                        "content api request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_once(
        &self,
        url: &Url,
        query: Option<&ContentQuery>,
    ) -> TransportResult<reqwest::Response> {
        let mut request = self.client.get(url.clone());
        match query {
            Some(query) => {
                request = request.timeout(self.timeout);
                if !query.is_empty() {
                    request = request.query(query.pairs());
                }
            }
            None => request = request.header(ACCEPT, "*/*"),
        }
        // Media may live on another host; only the CMS itself gets the token.
        if let Some(token) = self.token.as_deref() {
            if url.origin() == self.base_url.origin() {
                request = request.bearer_auth(token);
            }
        }

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| {
                TransportError::new(
                    TransportErrorKind::Timeout,
                    format!("no response within {}ms", millis(self.timeout)),
                )
            })??;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ApiErrorEnvelope>(&body).ok())
            .and_then(|envelope| envelope.error.message)
            .unwrap_or(fallback);

        Err(TransportError::status(status.as_u16(), message))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_base_url(raw: &str) -> TransportResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TransportError::configuration(
            "content api base url is empty",
        ));
    }
    let url = Url::parse(raw)
        .map_err(|e| TransportError::configuration(format!("invalid content api base url: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(TransportError::configuration(format!(
            "content api base url must be an absolute http(s) url, got `{raw}`"
        )));
    }
    Ok(url)
}
