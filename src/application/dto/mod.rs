pub mod articles;
pub mod categories;
pub mod pagination;

pub use articles::{ArticleDto, FaqItemDto, FileAttachmentDto};
pub use categories::CategoryDto;
pub use pagination::{ListPage, PaginationDto, ResponseMeta};
