use crate::domain::article::value_objects::ContentKind;
use crate::domain::errors::{DomainError, DomainResult};

pub const MAX_PAGE_SIZE: u32 = 100;
/// Limit applied when only an offset is given.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Recognised listing filters. Every field is optional; an empty filter matches
/// all articles and leaves page sizing to the content API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArticleFilter {
    kind: Option<ContentKind>,
    category: Option<String>,
    search: Option<String>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Category slug; blank values are ignored.
    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        let category = category.as_ref().trim();
        self.category = (!category.is_empty()).then(|| category.to_lowercase());
        self
    }

    /// Free-text search over title and description; blank values are ignored.
    #[must_use]
    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        let search = search.as_ref().trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> DomainResult<Self> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn kind(&self) -> Option<ContentKind> {
        self.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}
