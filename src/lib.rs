// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # lindgraph
//!
//! In-memory graph data structures and the classic algorithms over them.
//!
//! ## Features
//!
//! - **Four representations** - adjacency lists ([`Graph`]), adjacency lists with
//!   removal-stable indices ([`StableGraph`]), graphs keyed by your own node
//!   values ([`GraphMap`]) and a dense adjacency matrix ([`MatrixGraph`])
//! - **Directed and undirected** - chosen at the type level through [`Directed`]
//!   and [`Undirected`]
//! - **Compact indices** - `u8`, `u16`, `u32` or `usize` node and edge indices
//!   through [`IndexType`]
//! - **Generic algorithms** - every algorithm in [`algo`] is written once against
//!   the capability traits in [`visit`] and runs on any representation
//! - **Graphviz output** - [`dot::Dot`] renders any graph as DOT
//!
//! ## Quick Start
//!
//! ```rust
//! use lindgraph::prelude::*;
//!
//! let mut g = DiGraph::<&str, u32>::new();
//! let parse = g.add_node("parse");
//! let check = g.add_node("check");
//! let emit = g.add_node("emit");
//! g.add_edge(parse, check, 2);
//! g.add_edge(check, emit, 3);
//!
//! assert_eq!(toposort(&g), Ok(vec![parse, check, emit]));
//! assert_eq!(dijkstra(&g, parse, None, |e| *e.weight())[&emit], 5);
//!
//! let mut dfs = Dfs::new(&g, parse);
//! let mut order = Vec::new();
//! while let Some(n) = dfs.next(&g) {
//!     order.push(g[n]);
//! }
//! assert_eq!(order, ["parse", "check", "emit"]);
//! ```
//!
//! ## Architecture
//!
//! ### Representations
//!
//! [`Graph`] stores nodes and edges in two vectors. Every node heads two
//! intrusive singly linked lists, one of outgoing and one of incoming edges,
//! threaded through the edge records. Adding is O(1); removing swaps the last
//! element into the hole, so the index of the last node or edge changes.
//! [`StableGraph`] keeps removed slots as vacant entries chained into free
//! lists, so indices never shift.
//!
//! ### Capability traits
//!
//! Algorithms never name a concrete graph. They ask for the traits in
//! [`visit`] they need, such as [`visit::IntoNeighbors`] or
//! [`visit::NodeIndexable`], and take the graph by reference.
//!
//! ### Traversals
//!
//! [`visit::Dfs`], [`visit::Bfs`], [`visit::DfsPostOrder`] and [`visit::Topo`]
//! hold only their own state and borrow the graph per step, so the graph can be
//! mutated between steps.
//!
//! ## Error Handling
//!
//! Structural preconditions (an endpoint that is not a node, an exhausted index
//! type) panic in the plain mutators and return [`Error`] from the `try_*`
//! variants. Algorithm outcomes are typed: [`Cycle`] from
//! [`algo::toposort`], [`NegativeCycle`] from [`algo::bellman_ford`], and
//! `Option` for absence.
//!
//! ```rust
//! use lindgraph::{Error, Graph, NodeIndex};
//!
//! let mut g = Graph::<(), ()>::new();
//! let a = g.add_node(());
//! match g.try_add_edge(a, NodeIndex::new(3), ()) {
//!     Err(Error::NodeOutOfBounds(3)) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `trace` for
//! structural bookkeeping, `debug` for algorithm summaries. Install a
//! subscriber to see them.
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run graph_ops --release
//! ```

pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types, traits and
/// algorithms.
///
/// # Example
///
/// ```rust
/// use lindgraph::prelude::*;
///
/// let g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2)]);
/// assert!(!is_cyclic_undirected(&g));
/// ```
pub mod prelude;

/// Graph algorithms, generic over the [`visit`] traits.
pub mod algo;

/// Graphviz DOT rendering.
pub mod dot;

/// The graph representations and their index and direction types.
pub mod graph;

/// Storage primitives: bit sets, union-find and DOT escaping.
pub mod utils;

/// Capability traits, traversals and graph adapters.
pub mod visit;

/// `lindgraph` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] used by the fallible
/// graph mutators.
///
/// # Examples
///
/// ```rust
/// use lindgraph::{Graph, NodeIndex, Result};
///
/// fn build() -> Result<Graph<u8, ()>> {
///     let mut g = Graph::new();
///     let a = g.try_add_node(1)?;
///     let b = g.try_add_node(2)?;
///     g.try_add_edge(a, b, ())?;
///     Ok(g)
/// }
/// assert_eq!(build().unwrap().edge_count(), 1);
/// ```
pub type Result<T> = std::result::Result<T, Error>;

pub use error::{Cycle, Error, NegativeCycle};

pub use graph::{
    DefaultIx, DiGraph, DiGraphMap, DiMatrix, Directed, Direction, EdgeIndex, EdgeType, Graph,
    GraphMap, IndexType, MatrixGraph, NodeIndex, StableDiGraph, StableGraph, StableUnGraph,
    UnGraph, UnGraphMap, UnMatrix, Undirected,
};

pub use graph::Direction::{Incoming, Outgoing};
