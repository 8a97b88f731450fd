//! HTTP API source

use super::traits::{into_records, RecordSource, SourceError, SourceResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fetches raw records from an HTTP endpoint returning a JSON array.
pub struct HttpSource {
    client: Client,
    url: String,
    name: String,
}

impl HttpSource {
    /// Create a source with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let url = url.into();
        let name = format!("http:{}", url);
        Ok(Self { client, url, name })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> SourceResult<Vec<Value>> {
        debug!(url = %self.url, "fetching philosopher records");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        into_records(response.json::<Value>().await?)
    }
}
