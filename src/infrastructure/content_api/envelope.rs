//! Wire envelopes: `{ data, meta? }` on success, `{ error }` on failure.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub meta: Option<ApiMeta>,
}

impl ApiEnvelope {
    /// Records in `data`: the array itself, a single object, or nothing for `null`.
    pub fn records(&self) -> Vec<&serde_json::Value> {
        match &self.data {
            serde_json::Value::Array(items) => items.iter().collect(),
            serde_json::Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    pub fn pagination(&self) -> Option<&ApiPagination> {
        self.meta.as_ref().and_then(|meta| meta.pagination.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMeta {
    #[serde(default)]
    pub pagination: Option<ApiPagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPagination {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub page_count: Option<u64>,
    pub start: Option<u64>,
    pub limit: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub status: Option<u16>,
    pub name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
