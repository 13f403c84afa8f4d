//! Graph representations.
//!
//! - [`Graph`]: adjacency lists over two flat vectors; indices shift on removal.
//! - [`StableGraph`]: the same encoding with tombstones and free lists, so
//!   indices survive removals.
//! - [`GraphMap`]: nodes are the user's own `Copy + Ord + Hash` keys.
//! - [`MatrixGraph`]: a dense adjacency matrix with O(1) edge lookup.
//!
//! All of them implement the [`crate::visit`] contracts.

mod adjacency;
mod direction;
mod frozen;
mod index;
mod iter;
mod map;
mod matrix;
mod stable;

pub use adjacency::{DiGraph, Edge, Graph, IntoWeightedEdge, Node, UnGraph};
pub use direction::{Directed, Direction, EdgeType, Undirected};
pub use frozen::Frozen;
pub use index::{edge_index, node_index, DefaultIx, EdgeIndex, IndexType, NodeIndex};
pub use iter::{
    EdgeReferences, Edges, EdgesConnecting, Externals, GraphEdgeReference, Neighbors,
    WalkNeighbors,
};
pub use map::{DiGraphMap, GraphMap, NodeTrait, UnGraphMap};
pub use matrix::{DiMatrix, MatrixGraph, UnMatrix};
pub use stable::{StableDiGraph, StableGraph, StableUnGraph};

pub(crate) use index::{index_capacity, index_exhausted};
pub(crate) use iter::edges_walker_mut;
