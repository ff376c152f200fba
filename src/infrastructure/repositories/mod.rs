// src/infrastructure/repositories/mod.rs
mod api_article;
mod api_category;
mod cached_article;
mod cached_category;
mod error;
mod mapping;

pub use api_article::ApiArticleRepository;
pub use api_category::ApiCategoryRepository;
pub use cached_article::CachedArticleRepository;
pub use cached_category::CachedCategoryRepository;
