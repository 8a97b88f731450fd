//! Relationship edges between philosophers

use crate::record::PhilosopherRecord;
use serde::{Deserialize, Serialize};

/// Kind of relationship an edge expresses.
///
/// Only `Influence` and `Critique` are derived from record data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Source influenced target
    Influence,
    /// Source critiques target
    Critique,
    Dialogue,
    BuildUpon,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Influence => "influence",
            EdgeKind::Critique => "critique",
            EdgeKind::Dialogue => "dialogue",
            EdgeKind::BuildUpon => "build_upon",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed relationship.
///
/// Endpoints are philosopher ids and may name philosophers that are not in
/// the loaded node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    /// Always positive
    pub strength: f64,
    pub kind: EdgeKind,
    pub description: String,
}

impl Edge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        strength: f64,
        kind: EdgeKind,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            strength,
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source_id == id || self.target_id == id
    }
}

/// Edges for one record: influences received, then critiques issued.
pub fn edges_of(record: &PhilosopherRecord) -> impl Iterator<Item = Edge> + '_ {
    let influences = record.influence_map.iter().map(move |(source_id, strength)| {
        Edge::new(source_id.as_str(), record.id.as_str(), *strength, EdgeKind::Influence)
            .with_description(format!(
                "Influences {}'s philosophical development",
                record.name
            ))
    });
    let critiques = record.critique_map.iter().map(move |(target_id, strength)| {
        Edge::new(record.id.as_str(), target_id.as_str(), *strength, EdgeKind::Critique)
            .with_description(format!(
                "{} critiques this philosophical position",
                record.name
            ))
    });
    influences.chain(critiques)
}

/// Flatten every record's relationship maps into an edge list.
///
/// Dangling endpoints are kept; filtering them is the consumer's call.
pub fn derive_edges(records: &[PhilosopherRecord]) -> Vec<Edge> {
    records.iter().flat_map(edges_of).collect()
}
