mod download;
mod get_by_id;
mod get_by_slug;
mod list;
mod service;

pub use download::{ArticleFileDownload, DownloadArticleFileQuery};
pub use get_by_id::GetArticleByIdQuery;
pub use get_by_slug::GetArticleBySlugQuery;
pub use list::ListArticlesQuery;
pub use service::ArticleQueryService;
