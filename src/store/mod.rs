//! Read-only access to Bear's SQLite store and search composition

mod error;
mod location;
pub mod query;
mod repository;
pub mod row;
pub mod schema;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use location::{DB_PATH_ENV, DEFAULT_RELATIVE_PATH, StoreLocation};
pub use query::{DEFAULT_SEARCH_LIMIT, SearchQuery};
pub use repository::{NoteStore, SearchPage, TagTree, validate_identifier};
pub use sqlite::{BearStore, with_store};
