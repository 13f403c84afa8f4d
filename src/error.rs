use std::fmt;

use thiserror::Error;

/// The generic Error type for structural operations on the graph containers.
///
/// These are the recoverable counterparts of programmer errors: the `try_*`
/// mutators return them, while the plain mutators (`add_node`, `add_edge`, ...)
/// panic with the same message because continuing would leave the adjacency
/// lists in an inconsistent state.
///
/// # Error Categories
///
/// ## Index Space
/// - [`Error::NodeIndexOverflow`] - The index type cannot address another node
/// - [`Error::EdgeIndexOverflow`] - The index type cannot address another edge
///
/// ## Invalid Endpoints
/// - [`Error::NodeOutOfBounds`] - An endpoint index past the end of the node storage
/// - [`Error::VacantNode`] - An endpoint index pointing at a removed [`crate::StableGraph`] slot
/// - [`Error::DuplicateEdge`] - A second edge between the same pair of a [`crate::MatrixGraph`]
///
/// Algorithm outcomes that callers are expected to branch on are not part of
/// this enum; they are reported through [`Cycle`] and [`NegativeCycle`].
///
/// # Examples
///
/// ```rust
/// use lindgraph::{Error, Graph};
///
/// let mut graph = Graph::<(), (), lindgraph::Directed, u8>::default();
/// let a = graph.add_node(());
/// let missing = lindgraph::NodeIndex::new(7);
///
/// match graph.try_add_edge(a, missing, ()) {
///     Err(Error::NodeOutOfBounds(index)) => assert_eq!(index, 7),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The node index type is exhausted.
    ///
    /// The maximum value of the index type is reserved as the end-of-list
    /// sentinel, so a graph indexed by `u8` holds at most 255 nodes.
    /// The associated value is that capacity.
    #[error("node index space exhausted - the index type holds at most {0} nodes")]
    NodeIndexOverflow(usize),

    /// The edge index type is exhausted.
    ///
    /// The associated value is the maximum number of edges of the index type.
    #[error("edge index space exhausted - the index type holds at most {0} edges")]
    EdgeIndexOverflow(usize),

    /// An endpoint refers to a node index beyond the node storage.
    #[error("node index {0} is out of bounds")]
    NodeOutOfBounds(usize),

    /// An endpoint refers to a vacant (removed) slot of a stable graph.
    #[error("node index {0} refers to a vacant slot")]
    VacantNode(usize),

    /// The adjacency matrix already holds an edge between these nodes.
    #[error("an edge between node {0} and node {1} already exists")]
    DuplicateEdge(usize, usize),
}

/// A cycle was found in a graph that was required to be acyclic.
///
/// Returned by [`crate::algo::toposort`]; carries the node that closed the
/// cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cycle<N>(pub(crate) N);

impl<N> Cycle<N> {
    /// Returns the node that closed the cycle.
    #[must_use]
    pub fn node_id(&self) -> N
    where
        N: Copy,
    {
        self.0
    }
}

impl<N: fmt::Debug> fmt::Display for Cycle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph contains a cycle closed at node {:?}", self.0)
    }
}

impl<N: fmt::Debug> std::error::Error for Cycle<N> {}

/// A negative-weight cycle is reachable from the source of a shortest path
/// search, so no finite shortest paths exist.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("a negative cycle is reachable from the source node")]
pub struct NegativeCycle(pub(crate) ());
