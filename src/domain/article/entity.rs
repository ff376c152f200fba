// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle, ContentKind};
use crate::domain::category::Category;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub description: Option<String>,
    pub body: Option<String>,
    pub kind: ContentKind,
    pub category: Option<Category>,
    pub file: Option<FileAttachment>,
    pub diagram: Option<DiagramData>,
    pub faq: Vec<FaqItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }
}

/// Downloadable asset attached to an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub id: i64,
    pub name: String,
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Diagram document stored on the article; its structure belongs to the frontends.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramData(serde_json::Value);

impl DiagramData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}
