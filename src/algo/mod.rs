//! Graph algorithms.
//!
//! Every algorithm is a free function generic over the [`crate::visit`]
//! traits it needs, so the same code runs on [`crate::Graph`],
//! [`crate::StableGraph`], [`crate::GraphMap`], [`crate::MatrixGraph`] and
//! adapters such as [`crate::visit::Reversed`]. Pass graphs by reference
//! (`&g`); references implement every trait the graph does.
//!
//! # Available Algorithms
//!
//! ## Shortest Paths
//!
//! - [`dijkstra`] - Single-source distances for non-negative weights
//! - [`astar`] - Single path to a goal, guided by a heuristic
//! - [`bellman_ford`] - Single-source distances with negative weights
//! - [`find_negative_cycle`] - One negative cycle reachable from a source
//! - [`k_shortest_path`] - Cost of the k-th shortest walk to each node
//!
//! ## Connectivity
//!
//! - [`tarjan_scc`] / [`TarjanScc`] - Strongly connected components, one pass
//! - [`kosaraju_scc`] - Strongly connected components, two passes
//! - [`has_path_connecting`] - Reachability between two nodes
//! - [`is_cyclic_directed`] / [`is_cyclic_undirected`] - Cycle detection
//!
//! ## Ordering and Structure
//!
//! - [`toposort`] - Topological order, or the node closing a cycle
//! - [`all_simple_paths`] - Lazy enumeration of simple paths
//! - [`dominators::simple_fast`] - Dominator tree of a rooted graph
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | Dijkstra | O((V + E) log V) | Non-negative weights |
//! | A* | O((V + E) log V) worst case | One target with a good estimate |
//! | Bellman-Ford | O(V E) | Negative weights, cycle detection |
//! | Tarjan / Kosaraju | O(V + E) | Recursion detection, condensation |
//! | Toposort | O(V + E) | Dependency ordering |
//! | Dominators | O(V²) worst case | Control flow analysis |
//!
//! # Examples
//!
//! ```rust
//! use lindgraph::algo::{dijkstra, toposort};
//! use lindgraph::DiGraph;
//!
//! let mut g = DiGraph::<&str, u32>::new();
//! let a = g.add_node("a");
//! let b = g.add_node("b");
//! let c = g.add_node("c");
//! g.add_edge(a, b, 4);
//! g.add_edge(b, c, 1);
//! g.add_edge(a, c, 7);
//!
//! let dist = dijkstra(&g, a, None, |e| *e.weight());
//! assert_eq!(dist[&c], 5);
//! assert_eq!(toposort(&g), Ok(vec![a, b, c]));
//! ```

mod astar;
mod bellman_ford;
pub mod dominators;
mod dijkstra;
mod k_shortest_path;
mod measure;
mod scc;
mod scored;
mod simple_paths;
mod toposort;

pub use astar::astar;
pub use bellman_ford::{bellman_ford, find_negative_cycle, Paths};
pub use dijkstra::dijkstra;
pub use dominators::Dominators;
pub use k_shortest_path::k_shortest_path;
pub use measure::{FloatMeasure, Measure};
pub use scc::{kosaraju_scc, tarjan_scc, TarjanScc};
pub use scored::MinScored;
pub use simple_paths::all_simple_paths;
pub use toposort::{has_path_connecting, is_cyclic_directed, is_cyclic_undirected, toposort};
