//! Reference table access: locate the resource, parse it, cache it.

pub mod cache;
pub mod loader;
pub mod source;

pub use cache::TableCache;
pub use loader::{load_table, parse_table};
pub use source::resolve_data_path;
