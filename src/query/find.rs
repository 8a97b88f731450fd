//! Lookups over a derived graph

use crate::graph::{Edge, EdgeKind, NexusGraph, PositionedNode};

/// Which way an edge points relative to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// Find a node by philosopher id.
pub fn find_node<'a>(graph: &'a NexusGraph, id: &str) -> Option<&'a PositionedNode> {
    graph.nodes.iter().find(|n| n.id() == id)
}

/// Edges touching `id` in the given direction, optionally of one kind.
pub fn edges_for<'a>(
    graph: &'a NexusGraph,
    id: &str,
    direction: Direction,
    kind: Option<EdgeKind>,
) -> Vec<&'a Edge> {
    graph
        .edges
        .iter()
        .filter(|e| match direction {
            Direction::Outgoing => e.source_id == id,
            Direction::Incoming => e.target_id == id,
            Direction::Both => e.touches(id),
        })
        .filter(|e| kind.map_or(true, |k| e.kind == k))
        .collect()
}

/// Edges with at least one endpoint outside the loaded node set.
pub fn dangling_edges(graph: &NexusGraph) -> Vec<&Edge> {
    let ids = graph.node_ids();
    graph
        .edges
        .iter()
        .filter(|e| !ids.contains(e.source_id.as_str()) || !ids.contains(e.target_id.as_str()))
        .collect()
}
