//! HTTP client for the headless-CMS content API.

mod client;
mod config;
mod envelope;
mod error;
mod files;
mod query;

pub use client::{ContentApiClient, Download};
pub use config::{Backoff, ContentApiConfig, RetryPolicy};
pub use envelope::{ApiEnvelope, ApiErrorBody, ApiMeta, ApiPagination};
pub use error::{TransportError, TransportErrorKind, TransportResult};
pub use files::ContentApiFileSource;
pub use query::{ContentQuery, FilterOp, SortOrder};
