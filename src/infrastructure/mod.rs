pub mod cache;
pub mod content_api;
pub mod logging;
pub mod repositories;
pub mod time;
