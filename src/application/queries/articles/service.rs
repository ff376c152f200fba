use std::sync::Arc;

use crate::application::ports::files::FileSource;
use crate::domain::article::{ArticleRepository, ContentKind};

pub struct ArticleQueryService {
    pub(super) repo: Arc<dyn ArticleRepository>,
    pub(super) files: Arc<dyn FileSource>,
}

impl ArticleQueryService {
    pub fn new(repo: Arc<dyn ArticleRepository>, files: Arc<dyn FileSource>) -> Self {
        Self { repo, files }
    }
}

/// Human-facing name of a content kind, used in not-found messages.
pub(super) const fn kind_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Speckit => "Speckit",
        ContentKind::Prompt => "Prompt",
        ContentKind::Blog => "Article",
    }
}
