//! Transport failures.

use std::fmt;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    NetworkError,
    /// 5xx from the content API.
    ServerError,
    /// 4xx from the content API; never retried.
    ClientError,
    /// Success status with a body that is not a content API envelope.
    InvalidResponse,
    /// Client could not be built or the request URL could not be formed.
    Configuration,
}

impl TransportErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::ClientError => "client_error",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("content api {kind} after {attempts} attempt(s): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub status_code: Option<u16>,
    pub attempts: u32,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status_code: None,
            attempts: 0,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Configuration, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidResponse, message)
    }

    pub fn status(status_code: u16, message: impl Into<String>) -> Self {
        let kind = if status_code >= 500 {
            TransportErrorKind::ServerError
        } else {
            TransportErrorKind::ClientError
        };
        Self {
            kind,
            status_code: Some(status_code),
            attempts: 0,
            message: message.into(),
        }
    }

    /// Failure while reading a response body that had already started. The
    /// connection broke, so it counts as a network error, not a bad payload.
    pub fn from_body(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else {
            TransportErrorKind::NetworkError
        };
        Self::new(kind, format!("failed to read response body: {err}"))
    }

    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Network failures, timeouts and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Timeout
                | TransportErrorKind::NetworkError
                | TransportErrorKind::ServerError
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_builder() {
            TransportErrorKind::Configuration
        } else if err.is_decode() {
            TransportErrorKind::InvalidResponse
        } else {
            TransportErrorKind::NetworkError
        };
        Self {
            kind,
            status_code: err.status().map(|s| s.as_u16()),
            attempts: 0,
            message: err.to_string(),
        }
    }
}
