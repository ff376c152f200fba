// src/application/commands/cache/invalidate.rs
use super::CacheCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    trace::TraceContext,
};
use serde::Serialize;

/// Notification that content changed upstream (CMS webhook).
#[derive(Debug, Clone, Default)]
pub struct ContentChangedCommand {
    pub token: Option<String>,
    pub event: Option<String>,
    /// Model name (`article`) or UID (`api::article.article`).
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationReport {
    pub invalidated: usize,
    pub patterns: Vec<String>,
}

/// Cache key patterns affected by a change to `model`. `None` means everything.
fn patterns_for(model: Option<&str>) -> Option<Vec<&'static str>> {
    let model = model?.trim().to_ascii_lowercase();
    let name = model
        .strip_prefix("api::")
        .and_then(|uid| uid.split('.').next())
        .unwrap_or(&model);

    match name {
        "article" | "articles" | "speckit" | "speckits" => Some(vec!["articles:*"]),
        // articles embed their category
        "category" | "categories" => Some(vec!["categories:*", "articles:*"]),
        _ => None,
    }
}

fn tokens_match(expected: &str, given: &str) -> bool {
    expected.len() == given.len()
        && expected
            .bytes()
            .zip(given.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

impl CacheCommandService {
    /// Checks a webhook bearer token. Anything goes when no token is configured.
    pub fn authorize_webhook(&self, token: Option<&str>) -> ApplicationResult<()> {
        match self.webhook_token.as_deref() {
            Some(expected) if !tokens_match(expected, token.unwrap_or_default()) => {
                Err(ApplicationError::unauthorized("invalid webhook token"))
            }
            _ => Ok(()),
        }
    }

    pub fn handle_content_changed(
        &self,
        ctx: &TraceContext,
        command: ContentChangedCommand,
    ) -> ApplicationResult<InvalidationReport> {
        self.authorize_webhook(command.token.as_deref())?;

        let patterns = patterns_for(command.model.as_deref()).unwrap_or_else(|| vec!["*"]);
        let invalidated = patterns
            .iter()
            .map(|pattern| {
                self.caches
                    .iter()
                    .map(|cache| cache.invalidate(pattern))
                    .sum::<usize>()
            })
            .sum();
        let report = InvalidationReport {
            invalidated,
            patterns: patterns.into_iter().map(str::to_string).collect(),
        };

        tracing::info!(
            request_id = %ctx.request_id(),
            event = command.event.as_deref().unwrap_or("unknown"),
            model = command.model.as_deref().unwrap_or("unknown"),
            invalidated = report.invalidated,
            "content cache invalidated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_follow_model_name_or_uid() {
        assert_eq!(patterns_for(Some("article")), Some(vec!["articles:*"]));
        assert_eq!(
            patterns_for(Some("api::article.article")),
            Some(vec!["articles:*"])
        );
        assert_eq!(
            patterns_for(Some("Category")),
            Some(vec!["categories:*", "articles:*"])
        );
        assert_eq!(patterns_for(Some("author")), None);
        assert_eq!(patterns_for(None), None);
    }

    #[test]
    fn token_comparison() {
        assert!(tokens_match("secret", "secret"));
        assert!(!tokens_match("secret", "secreT"));
        assert!(!tokens_match("secret", "secret2"));
        assert!(!tokens_match("secret", ""));
    }

    use crate::application::ports::cache::CacheControl;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingCache {
        patterns: Mutex<Vec<String>>,
    }

    impl CacheControl for RecordingCache {
        fn invalidate(&self, pattern: &str) -> usize {
            self.patterns.lock().unwrap().push(pattern.to_string());
            2
        }

        fn clear(&self) {}
    }

    fn service(token: Option<&str>) -> (Arc<RecordingCache>, CacheCommandService) {
        let cache = Arc::new(RecordingCache::default());
        let caches = vec![cache.clone() as Arc<dyn CacheControl>];
        (cache, CacheCommandService::new(caches, token.map(str::to_string)))
    }

    #[test]
    fn rejects_wrong_token() {
        let (cache, service) = service(Some("hook"));
        let err = service
            .handle_content_changed(
                &TraceContext::root(),
                ContentChangedCommand {
                    token: Some("nope".into()),
                    ..ContentChangedCommand::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
        assert!(cache.patterns.lock().unwrap().is_empty());
    }

    #[test]
    fn authorize_webhook_without_configured_token_accepts_anything() {
        let (_, open) = service(None);
        assert!(open.authorize_webhook(None).is_ok());
        assert!(open.authorize_webhook(Some("whatever")).is_ok());

        let (_, guarded) = service(Some("hook"));
        assert!(guarded.authorize_webhook(Some("hook")).is_ok());
        assert!(matches!(
            guarded.authorize_webhook(None),
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[test]
    fn unknown_model_invalidates_everything() {
        let (cache, service) = service(None);
        let report = service
            .handle_content_changed(
                &TraceContext::root(),
                ContentChangedCommand {
                    model: Some("author".into()),
                    ..ContentChangedCommand::default()
                },
            )
            .unwrap();
        assert_eq!(report.invalidated, 2);
        assert_eq!(*cache.patterns.lock().unwrap(), ["*"]);
    }

    #[test]
    fn category_change_busts_articles_too() {
        let (cache, service) = service(Some("hook"));
        let report = service
            .handle_content_changed(
                &TraceContext::root(),
                ContentChangedCommand {
                    token: Some("hook".into()),
                    event: Some("entry.update".into()),
                    model: Some("category".into()),
                },
            )
            .unwrap();
        assert_eq!(report.invalidated, 4);
        assert_eq!(*cache.patterns.lock().unwrap(), ["categories:*", "articles:*"]);
    }
}
