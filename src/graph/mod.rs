//! Layout and relationship graph derivation

mod edge;
mod engine;
mod layout;
mod node;


pub use edge::{derive_edges, edges_of, Edge, EdgeKind};
pub use engine::{NexusEngine, NexusError, NexusGraph, NexusResult};
pub use layout::{EraRadii, Layout, LayoutConfig};
pub use node::{Position, PositionedNode};
