use crate::application::dto::CategoryDto;
use crate::domain::article::{Article, FaqItem, FileAttachment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachmentDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faq: Vec<FaqItemDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            slug: article.slug.into_inner(),
            title: article.title.into_inner(),
            description: article.description,
            body: article.body,
            kind: article.kind.as_str().to_string(),
            category: article.category.map(Into::into),
            file: article.file.map(Into::into),
            diagram: article.diagram.map(|d| d.into_json()),
            faq: article.faq.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachmentDto {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub size: u64,
    pub mime_type: String,
}

impl From<FileAttachment> for FileAttachmentDto {
    fn from(file: FileAttachment) -> Self {
        Self {
            id: file.id,
            name: file.name,
            url: file.url,
            size: file.size,
            mime_type: file.mime_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItemDto {
    pub question: String,
    pub answer: String,
}

impl From<FaqItem> for FaqItemDto {
    fn from(item: FaqItem) -> Self {
        Self {
            question: item.question,
            answer: item.answer,
        }
    }
}
