// tests/support/builders.rs
use serde_json::{Value, json};

/// コンテンツ API が返す記事レコード (v5 フラット形式) を組み立てる
pub struct ArticleRecordBuilder {
    id: i64,
    slug: String,
    title: String,
    kind: String,
    description: Option<String>,
    category: Option<Value>,
    file: Option<Value>,
}

impl ArticleRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            slug: "test-article".into(),
            title: "Test Article".into(),
            kind: "blog".into(),
            description: None,
            category: None,
            file: None,
        }
    }

    pub fn speckit(slug: &str) -> Self {
        Self::new().slug(slug).kind("speckit")
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, slug: &str, name: &str) -> Self {
        self.category = Some(json!({ "id": 30, "slug": slug, "name": name }));
        self
    }

    /// `size_kb` はコンテンツ API と同じくキロバイト単位
    pub fn file(mut self, name: &str, url: &str, size_kb: f64, mime: &str) -> Self {
        self.file = Some(json!({
            "id": 50,
            "name": name,
            "url": url,
            "size": size_kb,
            "mime": mime,
        }));
        self
    }

    pub fn build(self) -> Value {
        let mut record = json!({
            "id": self.id,
            "documentId": format!("doc-{}", self.id),
            "slug": self.slug,
            "title": self.title,
            "type": self.kind,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
        });
        let fields = record.as_object_mut().expect("record is an object");
        if let Some(description) = self.description {
            fields.insert("description".into(), json!(description));
        }
        fields.insert("category".into(), self.category.unwrap_or(Value::Null));
        fields.insert("file".into(), self.file.unwrap_or(Value::Null));
        record
    }
}

impl Default for ArticleRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `{ data, meta }` 形式のレスポンスボディ
pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "meta": {} })
}

/// ページネーション付きの一覧レスポンスボディ
pub fn list_envelope(records: Vec<Value>, total: u64) -> Value {
    json!({
        "data": records,
        "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 1, "total": total } }
    })
}

/// コンテンツ API のエラーボディ
pub fn error_envelope(status: u16, name: &str, message: &str) -> Value {
    json!({ "data": null, "error": { "status": status, "name": name, "message": message, "details": {} } })
}
