//! Static JSON file source

use super::traits::{into_records, RecordSource, SourceResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads a JSON array (or single object) of raw records from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> SourceResult<Vec<Value>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        into_records(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use std::io::Write;

    #[tokio::test]
    async fn reads_record_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "plato", "name": "Plato"}}]"#).unwrap();

        let source = FileSource::new(file.path());
        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(source.name().starts_with("file:"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch().await, Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn invalid_json_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{not json").unwrap();
        let source = FileSource::new(file.path());
        assert!(matches!(source.fetch().await, Err(SourceError::Json(_))));
    }
}
