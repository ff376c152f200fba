use crate::domain::errors::RepositoryError;
use crate::infrastructure::content_api::TransportError;

/// Wraps a transport failure so callers only see [`RepositoryError`].
pub fn map_transport(action: &str, err: TransportError) -> RepositoryError {
    RepositoryError::with_cause(format!("failed to {action}"), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_transport_error_as_cause() {
        let err = map_transport(
            "load articles",
            TransportError::status(503, "Service Unavailable").with_attempts(3),
        );
        assert_eq!(err.message(), "failed to load articles");
        assert_eq!(
            err.detail(),
            "failed to load articles: content api server_error after 3 attempt(s): Service Unavailable"
        );
    }
}
