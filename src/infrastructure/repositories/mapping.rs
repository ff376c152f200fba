//! Wire records to domain entities.
//!
//! The content API serves two shapes. Flat records (`{ id, slug, ... }`) and
//! wrapped ones (`{ id, attributes: { slug, ... } }`) whose relations are nested
//! as `{ data: ... }`. Both are normalised by [`Record`] before any field is
//! read, so the mapping below deals with a single shape.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{
    article::{
        Article, ArticleId, ArticleSlug, ArticleTitle, ContentKind, DiagramData, FaqItem,
        FileAttachment,
    },
    category::Category,
    pagination::Pagination,
};
use crate::infrastructure::content_api::{ApiEnvelope, ApiPagination};
use crate::trace::TraceContext;

/// Reason a record could not be mapped. Carried into the skip warning only.
pub(super) type MapResult<T> = Result<T, String>;

struct Record<'a> {
    id: Option<&'a Value>,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    fn parse(value: &'a Value) -> MapResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| "record is not an object".to_string())?;
        let fields = match object.get("attributes") {
            Some(Value::Object(attributes)) => attributes,
            _ => object,
        };
        Ok(Self {
            id: object.get("id"),
            fields,
        })
    }

    fn id(&self) -> MapResult<i64> {
        self.id
            .and_then(Value::as_i64)
            .ok_or_else(|| "missing or non-numeric `id`".to_string())
    }

    fn str(&self, name: &str) -> Option<&'a str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn required_str(&self, name: &str) -> MapResult<&'a str> {
        self.str(name)
            .ok_or_else(|| format!("missing or non-string `{name}`"))
    }

    fn optional_string(&self, name: &str) -> Option<String> {
        self.str(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.str(name)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// A to-one relation: the object itself, or the object under `data`.
    /// `null`, absent and `{ data: null }` all mean "no relation".
    fn relation(&self, name: &str) -> Option<&'a Value> {
        let value = self.fields.get(name)?;
        let inner = match value {
            Value::Object(object) if object.contains_key("data") && !object.contains_key("id") => {
                object.get("data")?
            }
            other => other,
        };
        (!inner.is_null()).then_some(inner)
    }
}

/// Maps every record in `envelope`, skipping (and logging) the ones that fail.
pub(super) fn collect_records<T>(
    ctx: &TraceContext,
    resource: &str,
    envelope: &ApiEnvelope,
    map: impl Fn(&Value) -> MapResult<T>,
) -> Vec<T> {
    envelope
        .records()
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match map(record) {
            Ok(item) => Some(item),
            Err(reason) => {
                warn!(
                    request_id = %ctx.request_id(),
                    resource,
                    index,
                    record_id = ?record.get("id"),
                    reason = %reason,
                    "skipping malformed record"
                );
                None
            }
        })
        .collect()
}

pub(super) fn map_pagination(pagination: &ApiPagination) -> Pagination {
    Pagination {
        page: pagination.page,
        page_size: pagination.page_size,
        page_count: pagination.page_count,
        start: pagination.start,
        limit: pagination.limit,
        total: pagination.total,
    }
}

pub(super) fn map_article(value: &Value) -> MapResult<Article> {
    let record = Record::parse(value)?;

    let id = ArticleId::new(record.id()?).map_err(|e| e.to_string())?;
    let slug = ArticleSlug::new(record.required_str("slug")?).map_err(|e| e.to_string())?;
    let title = ArticleTitle::new(record.required_str("title")?).map_err(|e| e.to_string())?;
    let kind = record
        .required_str("type")?
        .parse::<ContentKind>()
        .map_err(|e| e.to_string())?;

    // Optional relations degrade to `None` rather than sinking the record.
    let category = record
        .relation("category")
        .and_then(|value| map_category(value).ok());
    let file = record.relation("file").and_then(|value| map_file(value).ok());
    let diagram = record
        .fields
        .get("diagram")
        .filter(|value| !value.is_null())
        .cloned()
        .map(DiagramData::new);

    Ok(Article {
        id,
        slug,
        title,
        description: record.optional_string("description"),
        body: record.optional_string("body"),
        kind,
        category,
        file,
        diagram,
        faq: map_faq(record.fields.get("faq")),
        created_at: record.timestamp("createdAt"),
        updated_at: record.timestamp("updatedAt"),
    })
}

pub(super) fn map_category(value: &Value) -> MapResult<Category> {
    let record = Record::parse(value)?;
    let kind = record.str("type").and_then(|raw| raw.parse().ok());
    Category::new(
        record.id()?,
        record.required_str("slug")?,
        record.required_str("name")?,
        kind,
    )
    .map_err(|e| e.to_string())
}

fn map_file(value: &Value) -> MapResult<FileAttachment> {
    let record = Record::parse(value)?;
    Ok(FileAttachment {
        id: record.id()?,
        name: record.required_str("name")?.to_string(),
        url: record.required_str("url")?.to_string(),
        size: kilobytes_to_bytes(record.fields.get("size")),
        mime_type: record
            .optional_string("mime")
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    })
}

/// Media sizes arrive in decimal kilobytes (`12.5`).
fn kilobytes_to_bytes(size: Option<&Value>) -> u64 {
    let kb = size.and_then(Value::as_f64).unwrap_or(0.0);
    if !kb.is_finite() || kb <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bytes = (kb * 1000.0).round() as u64;
    bytes
}

fn map_faq(value: Option<&Value>) -> Vec<FaqItem> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let question = item.get("question")?.as_str()?.trim();
            let answer = item.get("answer")?.as_str()?.trim();
            (!question.is_empty() && !answer.is_empty()).then(|| FaqItem {
                question: question.to_string(),
                answer: answer.to_string(),
            })
        })
        .collect()
}
