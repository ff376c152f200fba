use crate::domain::pagination::{Page, Pagination};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<Pagination> for PaginationDto {
    fn from(p: Pagination) -> Self {
        Self {
            page: p.page,
            page_size: p.page_size,
            page_count: p.page_count,
            start: p.start,
            limit: p.limit,
            total: p.total,
        }
    }
}

/// `meta` block of every JSON response; serialises to `{}` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub meta: ResponseMeta,
}

impl<T> ListPage<T> {
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        U: Into<T>,
    {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            meta: ResponseMeta {
                pagination: page.pagination.map(Into::into),
            },
        }
    }

    pub fn unpaged(items: Vec<T>) -> Self {
        Self {
            items,
            meta: ResponseMeta::default(),
        }
    }
}
