pub mod entity;
pub mod repository;

pub use entity::Category;
pub use repository::CategoryRepository;
