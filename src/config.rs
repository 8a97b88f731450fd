//! YAML configuration
//!
//! Every field is optional. An absent file means defaults throughout; CLI
//! flags override whatever the file says.

use crate::graph::LayoutConfig;
use crate::source::{FallbackLoader, FileSource, HttpSource, RecordSource, SourceError, SqliteSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to open source: {0}")]
    Source(#[from] SourceError),
}

/// Where raw records come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Sqlite {
        path: PathBuf,
    },
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SourceSpec {
    pub fn http(url: impl Into<String>) -> Self {
        SourceSpec::Http {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Open the described source.
    pub fn build(&self) -> Result<Box<dyn RecordSource>, ConfigError> {
        Ok(match self {
            SourceSpec::File { path } => Box::new(FileSource::new(path)),
            SourceSpec::Http { url, timeout_secs } => {
                Box::new(HttpSource::new(url.clone(), Duration::from_secs(*timeout_secs))?)
            }
            SourceSpec::Sqlite { path } => Box::new(SqliteSource::open(path)?),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub primary: Option<SourceSpec>,
    pub fallback: Option<SourceSpec>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusConfig {
    /// Pinned layout seed; absent means a fresh seed per load
    pub seed: Option<u64>,
    pub layout: LayoutConfig,
    pub sources: SourcesConfig,
}

impl NexusConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_yaml_str(&content)
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate().map_err(ConfigError::Invalid)?;
        for spec in [&self.sources.primary, &self.sources.fallback].into_iter().flatten() {
            if let SourceSpec::Http { timeout_secs: 0, .. } = spec {
                return Err(ConfigError::Invalid("HTTP timeout must be positive".to_string()));
            }
        }
        if self.sources.primary.is_none() && self.sources.fallback.is_some() {
            return Err(ConfigError::Invalid("a fallback source needs a primary source".to_string()));
        }
        Ok(())
    }

    /// Build the loader for the configured sources.
    pub fn build_loader(&self) -> Result<FallbackLoader, ConfigError> {
        let primary = self
            .sources
            .primary
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("no primary source configured".to_string()))?;

        let mut loader = FallbackLoader::new(primary.build()?);
        if let Some(fallback) = &self.sources.fallback {
            loader = loader.with_fallback(fallback.build()?);
        }
        Ok(loader)
    }
}

/// `<config dir>/nexus/nexus.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nexus").join("nexus.yaml"))
}
