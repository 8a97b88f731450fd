//! Primary-then-fallback loading
//!
//! The primary source wins whenever it answers. Only when it fails is the
//! fallback tried, once. Results are never merged across sources.

use super::traits::{RecordSource, SourceError};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

/// Every configured source failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("primary source failed ({0}) and no fallback is configured")]
    PrimaryFailed(SourceError),

    #[error("primary source failed ({primary}); fallback failed ({fallback})")]
    AllSourcesFailed {
        primary: SourceError,
        fallback: SourceError,
    },
}

/// Raw records plus the name of the source that produced them.
#[derive(Debug, Clone)]
pub struct FetchedRecords {
    pub records: Vec<Value>,
    pub source: String,
}

/// A primary source with an optional static fallback.
pub struct FallbackLoader {
    primary: Box<dyn RecordSource>,
    fallback: Option<Box<dyn RecordSource>>,
}

impl FallbackLoader {
    pub fn new(primary: Box<dyn RecordSource>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn RecordSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> Option<&str> {
        self.fallback.as_deref().map(|f| f.name())
    }

    /// Fetch from the primary source, falling back once on failure.
    ///
    /// A primary failure that the fallback recovers from is logged, not
    /// returned.
    pub async fn load(&self) -> Result<FetchedRecords, LoadError> {
        let primary_err = match self.primary.fetch().await {
            Ok(records) => {
                info!(source = self.primary.name(), count = records.len(), "loaded philosopher records");
                return Ok(FetchedRecords {
                    records,
                    source: self.primary.name().to_string(),
                });
            }
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            error!(source = self.primary.name(), error = %primary_err, "primary source failed");
            return Err(LoadError::PrimaryFailed(primary_err));
        };

        warn!(
            primary = self.primary.name(),
            fallback = fallback.name(),
            error = %primary_err,
            "primary source failed, using fallback"
        );

        match fallback.fetch().await {
            Ok(records) => {
                info!(source = fallback.name(), count = records.len(), "loaded philosopher records from fallback");
                Ok(FetchedRecords {
                    records,
                    source: fallback.name().to_string(),
                })
            }
            Err(fallback_err) => {
                error!(error = %fallback_err, "fallback source failed too");
                Err(LoadError::AllSourcesFailed {
                    primary: primary_err,
                    fallback: fallback_err,
                })
            }
        }
    }
}
