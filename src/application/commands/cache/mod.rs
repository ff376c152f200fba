// src/application/commands/cache/mod.rs
mod invalidate;
mod service;

pub use invalidate::{ContentChangedCommand, InvalidationReport};
pub use service::CacheCommandService;
