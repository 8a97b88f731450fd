//! NexusEngine: raw records in, positioned nodes and edges out

use super::edge::{derive_edges, Edge};
use super::layout::{Layout, LayoutConfig};
use super::node::PositionedNode;
use crate::config::ConfigError;
use crate::normalize::{Normalizer, Rejection};
use crate::source::{FallbackLoader, LoadError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur in Nexus operations
#[derive(Debug, Error)]
pub enum NexusError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Nexus operations
pub type NexusResult<T> = Result<T, NexusError>;

/// One load cycle's output, handed to the renderer by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NexusGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
    /// Seed the layout was drawn with; reuse it to reproduce positions
    pub seed: u64,
    /// Name of the source the raw records came from, if loaded from one
    pub source: Option<String>,
    pub loaded_at: DateTime<Utc>,
    /// Raw records that were skipped or superseded
    #[serde(skip)]
    pub rejections: Vec<Rejection>,
}

impl NexusGraph {
    pub fn empty(seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            seed,
            source: None,
            loaded_at: Utc::now(),
            rejections: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Split into the node and edge lists.
    pub fn into_parts(self) -> (Vec<PositionedNode>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// Render as JSON for the renderer.
    pub fn to_json(&self, pretty: bool) -> NexusResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub(crate) fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id()).collect()
    }
}

/// The Nexus derivation pipeline.
///
/// Normalizes raw records, lays them out, and derives relationship edges.
/// Holds no state between loads; every call rebuilds from scratch.
#[derive(Debug, Clone, Default)]
pub struct NexusEngine {
    normalizer: Normalizer,
    layout: Layout,
    seed: Option<u64>,
}

impl NexusEngine {
    /// Create an engine with the default layout and a fresh seed per load
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom layout. Rejects configs that fail validation.
    pub fn with_layout(mut self, config: LayoutConfig) -> NexusResult<Self> {
        config.validate().map_err(ConfigError::Invalid)?;
        self.layout = Layout::new(config);
        Ok(self)
    }

    /// Pin the layout seed so every load produces the same positions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Derive a graph using the pinned seed, or a fresh one.
    pub fn derive(&self, raw: &[Value]) -> NexusGraph {
        let seed = self.seed.unwrap_or_else(fresh_seed);
        self.derive_with_seed(raw, seed)
    }

    /// Derive a graph with an explicit seed.
    pub fn derive_with_seed(&self, raw: &[Value], seed: u64) -> NexusGraph {
        let batch = self.normalizer.normalize_batch(raw);
        let edges = derive_edges(&batch.records);
        let nodes = self.layout.place(batch.records, seed);

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            rejected = batch.rejections.len(),
            seed,
            "derived philosopher graph"
        );

        NexusGraph {
            nodes,
            edges,
            seed,
            source: None,
            loaded_at: Utc::now(),
            rejections: batch.rejections,
        }
    }

    /// Fetch raw records (primary, then fallback) and derive a graph.
    pub async fn load(&self, loader: &FallbackLoader) -> NexusResult<NexusGraph> {
        let fetched = loader.load().await?;
        let mut graph = self.derive(&fetched.records);
        graph.source = Some(fetched.source);
        Ok(graph)
    }
}

/// A seed from the OS random source.
fn fresh_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            warn!(error = %e, "OS randomness unavailable, seeding layout from clock");
            Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
        }
    }
}
