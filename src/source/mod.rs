//! Raw record sources
//!
//! Raw philosopher records arrive through the `RecordSource` trait: an HTTP
//! API, a static JSON file, or a SQLite database. `FallbackLoader` pairs a
//! primary source with a fallback.

mod fallback;
mod file;
mod http;
mod sqlite;
mod traits;

pub use fallback::{FallbackLoader, FetchedRecords, LoadError};
pub use file::FileSource;
pub use http::HttpSource;
pub use sqlite::SqliteSource;
pub use traits::{into_records, RecordSource, SourceError, SourceResult};
