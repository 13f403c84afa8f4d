//! # lindgraph Prelude
//!
//! The types, traits and algorithms most programs need, for a single glob
//! import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The error type of the fallible graph mutators
pub use crate::Error;

/// The result type of the fallible graph mutators
pub use crate::Result;

/// Typed algorithm outcomes
pub use crate::{Cycle, NegativeCycle};

// ================================================================================================
// Graph Representations
// ================================================================================================

/// Adjacency-list graphs
pub use crate::graph::{DiGraph, Graph, UnGraph};

/// Adjacency-list graphs with removal-stable indices
pub use crate::graph::{StableDiGraph, StableGraph, StableUnGraph};

/// Graphs keyed by node values
pub use crate::graph::{DiGraphMap, GraphMap, UnGraphMap};

/// Adjacency-matrix graphs
pub use crate::graph::{DiMatrix, MatrixGraph, UnMatrix};

/// Indices, directions and edge-type markers
pub use crate::graph::{
    Directed, Direction, EdgeIndex, EdgeType, IndexType, NodeIndex, Undirected,
};

/// The two directions, unqualified
pub use crate::graph::Direction::{Incoming, Outgoing};

// ================================================================================================
// Capability Traits and Traversals
// ================================================================================================

/// The capability traits algorithms are written against
pub use crate::visit::{
    Data, EdgeCount, EdgeReference, GraphBase, GraphProp, IntoEdgeReferences, IntoEdges,
    IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
    IntoNodeReferences, NodeCount, NodeIndexable, VisitMap, Visitable,
};

/// Graph walkers and adapters
pub use crate::visit::{Bfs, Dfs, DfsPostOrder, Reversed, Topo, Walker};

// ================================================================================================
// Algorithms
// ================================================================================================

/// Shortest paths
pub use crate::algo::{astar, bellman_ford, dijkstra, k_shortest_path};

/// Connectivity and ordering
pub use crate::algo::{
    all_simple_paths, has_path_connecting, is_cyclic_directed, is_cyclic_undirected,
    kosaraju_scc, tarjan_scc, toposort,
};

// ================================================================================================
// Rendering
// ================================================================================================

/// Graphviz DOT output
pub use crate::dot::{Config, Dot};
