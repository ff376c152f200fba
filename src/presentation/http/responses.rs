use crate::application::dto::{ListPage, ResponseMeta};
use serde::Serialize;

/// `{ data, meta }` body shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T> DataResponse<T> {
    pub fn single(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::default(),
        }
    }
}

impl<T> From<ListPage<T>> for DataResponse<Vec<T>> {
    fn from(page: ListPage<T>) -> Self {
        Self {
            data: page.items,
            meta: page.meta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}
