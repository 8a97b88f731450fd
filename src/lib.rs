//! Nexus: philosopher knowledge orb core
//!
//! Turns heterogeneous raw philosopher records into a positioned graph ready
//! for a 3D renderer.
//!
//! # Core Concepts
//!
//! - **Normalizer**: reconciles camelCase, snake_case, and legacy nested
//!   record shapes into one canonical `PhilosopherRecord`
//! - **Layout**: places each philosopher on the concentric layer of their era,
//!   with height taken from their philosophical genome
//! - **Edges**: influence and critique relationships derived from each
//!   record's strength maps
//! - **Sources**: an HTTP API, a static JSON file, or SQLite, with a
//!   primary-then-fallback loader
//!
//! # Example
//!
//! ```
//! use nexus::NexusEngine;
//! use serde_json::json;
//!
//! let engine = NexusEngine::new().with_seed(7);
//! let graph = engine.derive(&[
//!     json!({"id": "plato", "name": "Plato", "era": "Ancient"}),
//!     json!({"id": "aristotle", "name": "Aristotle", "era": "Ancient", "influenceMap": {"plato": 90}}),
//! ]);
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod config;
mod graph;
pub mod normalize;
pub mod query;
pub mod record;
pub mod source;

pub use config::{ConfigError, NexusConfig, SourceSpec, SourcesConfig};
pub use graph::{
    derive_edges, edges_of, Edge, EdgeKind, EraRadii, Layout, LayoutConfig, NexusEngine, NexusError,
    NexusGraph, NexusResult, Position, PositionedNode,
};
pub use normalize::{normalize_era_position, NormalizeError, NormalizedBatch, Normalizer, Rejection};
pub use query::{dangling_edges, edges_for, find_node, Direction, Facets, FilteredView, NodeFilter};
pub use record::{Era, Genome, GenomeAxis, PhilosopherRecord};
pub use source::{
    FallbackLoader, FetchedRecords, FileSource, HttpSource, LoadError, RecordSource, SourceError,
    SqliteSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
