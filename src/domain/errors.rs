// src/domain/errors.rs
use std::error::Error as StdError;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Failure of a repository read. The underlying cause is kept opaque so callers
/// depend only on this type, whatever transport sits underneath.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RepositoryError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(
        message: impl Into<String>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message followed by the cause chain, for log lines.
    pub fn detail(&self) -> String {
        let mut detail = self.message.clone();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn detail_includes_cause_chain() {
        let err = RepositoryError::with_cause(
            "failed to load articles",
            io::Error::new(io::ErrorKind::TimedOut, "upstream timed out"),
        );
        assert_eq!(err.to_string(), "failed to load articles");
        assert_eq!(err.detail(), "failed to load articles: upstream timed out");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn detail_without_cause_is_message() {
        let err = RepositoryError::new("mapping failed");
        assert_eq!(err.detail(), "mapping failed");
        assert!(StdError::source(&err).is_none());
    }
}
