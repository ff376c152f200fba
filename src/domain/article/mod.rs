pub mod entity;
pub mod filter;
pub mod repository;
pub mod value_objects;

pub use entity::{Article, DiagramData, FaqItem, FileAttachment};
pub use filter::{ArticleFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use repository::ArticleRepository;
pub use value_objects::{ArticleId, ArticleSlug, ArticleTitle, ContentKind};
