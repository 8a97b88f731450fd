//! Read-side helpers over a derived graph
//!
//! Filtering, facets, and lookups for consumers that show subsets of the
//! orb. None of these mutate the graph.

mod facets;
mod filter;
mod find;

pub use facets::Facets;
pub use filter::{FilteredView, NodeFilter};
pub use find::{dangling_edges, edges_for, find_node, Direction};
