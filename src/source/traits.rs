//! Record source trait definitions

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while fetching raw records
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Unexpected payload: expected an array or object, got {0}")]
    Shape(&'static str),
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Somewhere raw philosopher records can be fetched from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short human-readable name for logs and graph metadata
    fn name(&self) -> &str;

    /// Fetch every raw record this source holds.
    async fn fetch(&self) -> SourceResult<Vec<Value>>;
}

/// Unwrap a payload into records: arrays as-is, a lone object as one record.
pub fn into_records(payload: Value) -> SourceResult<Vec<Value>> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(_) => Ok(vec![payload]),
        Value::Null => Err(SourceError::Shape("null")),
        Value::Bool(_) => Err(SourceError::Shape("boolean")),
        Value::Number(_) => Err(SourceError::Shape("number")),
        Value::String(_) => Err(SourceError::Shape("string")),
    }
}
