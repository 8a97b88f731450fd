//! Node filtering over a derived graph

use crate::graph::{Edge, NexusGraph, PositionedNode};
use crate::record::{Era, PhilosopherRecord};
use std::collections::HashSet;

/// Which philosophers a view shows.
///
/// Each empty list imposes no constraint. Non-empty lists are OR-ed within
/// themselves and AND-ed with each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeFilter {
    pub eras: Vec<Era>,
    /// Matches the primary domain or any listed domain
    pub domains: Vec<String>,
    pub spiral_stages: Vec<String>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
}

impl NodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_era(mut self, era: Era) -> Self {
        self.eras.push(era);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.push(domain.into());
        self
    }

    pub fn with_spiral_stage(mut self, stage: impl Into<String>) -> Self {
        self.spiral_stages.push(stage.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.eras.is_empty()
            && self.domains.is_empty()
            && self.spiral_stages.is_empty()
            && self.search.is_none()
    }

    pub fn matches(&self, record: &PhilosopherRecord) -> bool {
        let era_ok = self.eras.is_empty() || self.eras.contains(&record.era);
        let domain_ok = self.domains.is_empty() || self.domains.iter().any(|d| record.works_in(d));
        let stage_ok = self.spiral_stages.is_empty()
            || self
                .spiral_stages
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&record.spiral_dynamics_stage));
        let search_ok = match &self.search {
            Some(term) => record
                .name
                .to_lowercase()
                .contains(&term.trim().to_lowercase()),
            None => true,
        };
        era_ok && domain_ok && stage_ok && search_ok
    }

    /// Visible nodes plus the edges whose endpoints are both visible.
    pub fn apply<'a>(&self, graph: &'a NexusGraph) -> FilteredView<'a> {
        let nodes: Vec<&PositionedNode> = graph
            .nodes
            .iter()
            .filter(|n| self.matches(&n.record))
            .collect();
        let visible: HashSet<&str> = nodes.iter().map(|n| n.id()).collect();
        let edges = graph
            .edges
            .iter()
            .filter(|e| visible.contains(e.source_id.as_str()) && visible.contains(e.target_id.as_str()))
            .collect();
        FilteredView { nodes, edges }
    }
}

/// A borrowed subset of a graph.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub nodes: Vec<&'a PositionedNode>,
    pub edges: Vec<&'a Edge>,
}

impl FilteredView<'_> {
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id()).collect()
    }
}
