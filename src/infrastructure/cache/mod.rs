//! In-process caching: a TTL store with a stale-while-revalidate window and a
//! read-through helper that refreshes stale entries in the background.

mod memory;
mod pattern;
mod read_through;

pub use memory::{CacheSettings, InMemoryCache};
pub use pattern::matches_pattern;
pub use read_through::ReadThrough;
