//! Capability contracts shared by every graph representation, and the
//! traversals written against them.
//!
//! Algorithms in this crate never name a concrete graph type. Each one is
//! generic over the smallest set of traits it needs:
//!
//! | Trait | Provides |
//! |-------|----------|
//! | [`GraphBase`] | node and edge identifier types |
//! | [`Data`] | node and edge weight types |
//! | [`GraphProp`] | whether edges are directed |
//! | [`NodeCount`], [`EdgeCount`] | live element counts |
//! | [`NodeIndexable`], [`EdgeIndexable`] | dense `0..bound` numbering for side tables |
//! | [`IntoNeighbors`], [`IntoNeighborsDirected`] | adjacent nodes |
//! | [`IntoEdges`], [`IntoEdgesDirected`] | incident edges as [`EdgeReference`]s |
//! | [`IntoNodeIdentifiers`], [`IntoNodeReferences`] | all nodes |
//! | [`IntoEdgeReferences`] | all edges |
//! | [`Visitable`] | a fresh [`VisitMap`] per traversal |
//!
//! [`crate::Graph`], [`crate::StableGraph`], [`crate::GraphMap`] and
//! [`crate::MatrixGraph`] implement all of them; [`Reversed`] re-exposes any
//! bidirectional graph with every edge flipped.
//!
//! # Examples
//!
//! ```rust
//! use lindgraph::visit::{IntoNeighbors, NodeCount};
//! use lindgraph::DiGraph;
//!
//! fn out_degree_sum<G: IntoNeighbors + NodeCount>(g: &G, nodes: &[G::NodeId]) -> usize {
//!     nodes.iter().map(|&n| g.neighbors(n).count()).sum()
//! }
//!
//! let mut g = DiGraph::<(), ()>::new();
//! let a = g.add_node(());
//! let b = g.add_node(());
//! g.add_edge(a, b, ());
//! assert_eq!(out_degree_sum(&g, &[a, b]), 1);
//! ```

mod dfsvisit;
mod reversed;
mod traversal;

use std::{
    collections::HashSet,
    fmt,
    hash::{BuildHasher, Hash},
};

use crate::{
    graph::{Direction, EdgeType, IndexType, NodeIndex},
    utils::BitSet,
};

pub use dfsvisit::{depth_first_search, Control, ControlFlow, DfsEvent, Time};
pub use reversed::Reversed;
pub use traversal::{Bfs, Dfs, DfsPostOrder, Topo, Walker, WalkerIter};

/// Identifier types of a graph.
pub trait GraphBase {
    /// Node identifier.
    type NodeId: Copy + PartialEq;
    /// Edge identifier.
    type EdgeId: Copy + PartialEq;
}

/// Weight types of a graph.
pub trait Data: GraphBase {
    /// Node weight.
    type NodeWeight;
    /// Edge weight.
    type EdgeWeight;
}

/// Edge-type information of a graph.
pub trait GraphProp: GraphBase {
    /// [`crate::Directed`] or [`crate::Undirected`].
    type EdgeType: EdgeType;

    /// Returns `true` if edges are directed.
    fn is_directed(&self) -> bool {
        <Self::EdgeType>::is_directed()
    }
}

/// Number of live nodes.
pub trait NodeCount: GraphBase {
    /// Returns the number of live nodes.
    fn node_count(&self) -> usize;
}

/// Number of live edges.
pub trait EdgeCount: GraphBase {
    /// Returns the number of live edges.
    fn edge_count(&self) -> usize;
}

/// A bijection between node identifiers and `0..node_bound()`.
///
/// Side tables sized by `node_bound` may contain slots for vacant nodes.
pub trait NodeIndexable: GraphBase {
    /// Returns an upper bound on `to_index` over all nodes.
    fn node_bound(&self) -> usize;
    /// Maps a node to its dense position.
    fn to_index(&self, a: Self::NodeId) -> usize;
    /// Maps a dense position back to its node.
    fn from_index(&self, i: usize) -> Self::NodeId;
}

/// A bijection between edge identifiers and `0..edge_bound()`.
pub trait EdgeIndexable: GraphBase {
    /// Returns an upper bound on `to_edge_index` over all edges.
    fn edge_bound(&self) -> usize;
    /// Maps an edge to its dense position.
    fn to_edge_index(&self, e: Self::EdgeId) -> usize;
    /// Maps a dense position back to its edge.
    fn from_edge_index(&self, i: usize) -> Self::EdgeId;
}

/// Access to the neighbors of a node.
///
/// For directed graphs these are the targets of outgoing edges; for
/// undirected graphs all adjacent nodes.
pub trait IntoNeighbors: GraphBase {
    /// Returns the neighbors of `a`; empty for an unknown node.
    fn neighbors(&self, a: Self::NodeId) -> impl Iterator<Item = Self::NodeId>;
}

/// Access to the neighbors of a node in a given direction.
pub trait IntoNeighborsDirected: IntoNeighbors {
    /// Returns the neighbors of `a` along edges in direction `dir`.
    fn neighbors_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = Self::NodeId>;
}

/// Access to every node identifier.
pub trait IntoNodeIdentifiers: GraphBase {
    /// Returns all live node identifiers.
    fn node_identifiers(&self) -> impl Iterator<Item = Self::NodeId>;
}

/// Access to every node with its weight.
pub trait IntoNodeReferences: Data + IntoNodeIdentifiers {
    /// Returns `(id, weight)` for every live node.
    fn node_references(&self) -> impl Iterator<Item = (Self::NodeId, &Self::NodeWeight)>;
}

/// The edge reference type yielded by a graph `G` for the borrow `'a`.
pub type EdgeRefOf<'a, G> = EdgeReference<
    'a,
    <G as GraphBase>::NodeId,
    <G as GraphBase>::EdgeId,
    <G as Data>::EdgeWeight,
>;

/// Access to every edge.
pub trait IntoEdgeReferences: Data {
    /// Returns a reference to every live edge.
    fn edge_references(&self) -> impl Iterator<Item = EdgeRefOf<'_, Self>>;
}

/// Access to the edges of a node.
pub trait IntoEdges: IntoEdgeReferences + IntoNeighbors {
    /// Returns the edges leaving `a`. For undirected graphs every incident
    /// edge is presented with `a` as its source.
    fn edges(&self, a: Self::NodeId) -> impl Iterator<Item = EdgeRefOf<'_, Self>>;
}

/// Access to the edges of a node in a given direction.
pub trait IntoEdgesDirected: IntoEdges + IntoNeighborsDirected {
    /// Returns the edges of `a` in direction `dir`.
    fn edges_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeRefOf<'_, Self>>;
}

/// A graph that can hand out visit maps for its traversals.
pub trait Visitable: GraphBase {
    /// The membership structure.
    type Map: VisitMap<Self::NodeId>;
    /// Creates an empty map covering every current node.
    fn visit_map(&self) -> Self::Map;
    /// Clears `map` and resizes it to cover every current node.
    fn reset_map(&self, map: &mut Self::Map);
}

/// Set of visited nodes.
pub trait VisitMap<N> {
    /// Marks `a` as visited. Returns `true` if it was not visited before.
    fn visit(&mut self, a: N) -> bool;
    /// Returns `true` if `a` has been visited.
    fn is_visited(&self, a: &N) -> bool;
}

// A shared reference to a graph is itself a graph, so walkers and
// algorithms can be handed `&g` (or `Reversed(&g)`) without copying.

impl<G: GraphBase + ?Sized> GraphBase for &G {
    type NodeId = G::NodeId;
    type EdgeId = G::EdgeId;
}

impl<G: Data + ?Sized> Data for &G {
    type NodeWeight = G::NodeWeight;
    type EdgeWeight = G::EdgeWeight;
}

impl<G: GraphProp + ?Sized> GraphProp for &G {
    type EdgeType = G::EdgeType;
}

impl<G: NodeCount + ?Sized> NodeCount for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
}

impl<G: EdgeCount + ?Sized> EdgeCount for &G {
    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }
}

impl<G: NodeIndexable + ?Sized> NodeIndexable for &G {
    fn node_bound(&self) -> usize {
        (**self).node_bound()
    }

    fn to_index(&self, a: Self::NodeId) -> usize {
        (**self).to_index(a)
    }

    fn from_index(&self, i: usize) -> Self::NodeId {
        (**self).from_index(i)
    }
}

impl<G: EdgeIndexable + ?Sized> EdgeIndexable for &G {
    fn edge_bound(&self) -> usize {
        (**self).edge_bound()
    }

    fn to_edge_index(&self, e: Self::EdgeId) -> usize {
        (**self).to_edge_index(e)
    }

    fn from_edge_index(&self, i: usize) -> Self::EdgeId {
        (**self).from_edge_index(i)
    }
}

impl<G: IntoNeighbors + ?Sized> IntoNeighbors for &G {
    fn neighbors(&self, a: Self::NodeId) -> impl Iterator<Item = Self::NodeId> {
        (**self).neighbors(a)
    }
}

impl<G: IntoNeighborsDirected + ?Sized> IntoNeighborsDirected for &G {
    fn neighbors_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = Self::NodeId> {
        (**self).neighbors_directed(a, dir)
    }
}

impl<G: IntoNodeIdentifiers + ?Sized> IntoNodeIdentifiers for &G {
    fn node_identifiers(&self) -> impl Iterator<Item = Self::NodeId> {
        (**self).node_identifiers()
    }
}

impl<G: IntoNodeReferences + ?Sized> IntoNodeReferences for &G {
    fn node_references(&self) -> impl Iterator<Item = (Self::NodeId, &Self::NodeWeight)> {
        (**self).node_references()
    }
}

impl<G: IntoEdgeReferences + ?Sized> IntoEdgeReferences for &G {
    fn edge_references(&self) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        (**self).edge_references()
    }
}

impl<G: IntoEdges + ?Sized> IntoEdges for &G {
    fn edges(&self, a: Self::NodeId) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        (**self).edges(a)
    }
}

impl<G: IntoEdgesDirected + ?Sized> IntoEdgesDirected for &G {
    fn edges_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        (**self).edges_directed(a, dir)
    }
}

impl<G: Visitable + ?Sized> Visitable for &G {
    type Map = G::Map;

    fn visit_map(&self) -> Self::Map {
        (**self).visit_map()
    }

    fn reset_map(&self, map: &mut Self::Map) {
        (**self).reset_map(map);
    }
}

impl<Ix: IndexType> VisitMap<NodeIndex<Ix>> for BitSet {
    fn visit(&mut self, a: NodeIndex<Ix>) -> bool {
        !self.put(a.index())
    }

    fn is_visited(&self, a: &NodeIndex<Ix>) -> bool {
        self.contains(a.index())
    }
}

impl<N: Eq + Hash, S: BuildHasher> VisitMap<N> for HashSet<N, S> {
    fn visit(&mut self, a: N) -> bool {
        self.insert(a)
    }

    fn is_visited(&self, a: &N) -> bool {
        self.contains(a)
    }
}

/// A borrowed edge: its identifier, its endpoints and its weight.
///
/// Every graph in the crate yields this type from `edges`, `edges_directed`
/// and `edge_references`.
pub struct EdgeReference<'a, N, I, W> {
    pub(crate) id: I,
    pub(crate) node: [N; 2],
    pub(crate) weight: &'a W,
}

impl<'a, N: Copy, I: Copy, W> EdgeReference<'a, N, I, W> {
    pub(crate) fn new(id: I, source: N, target: N, weight: &'a W) -> Self {
        EdgeReference {
            id,
            node: [source, target],
            weight,
        }
    }

    /// Returns the source node.
    #[inline]
    pub fn source(&self) -> N {
        self.node[0]
    }

    /// Returns the target node.
    #[inline]
    pub fn target(&self) -> N {
        self.node[1]
    }

    /// Returns the edge weight.
    #[inline]
    pub fn weight(&self) -> &'a W {
        self.weight
    }

    /// Returns the edge identifier.
    #[inline]
    pub fn id(&self) -> I {
        self.id
    }

    /// Returns the same edge with source and target exchanged.
    #[must_use]
    #[inline]
    pub fn reversed(self) -> Self {
        EdgeReference {
            id: self.id,
            node: [self.node[1], self.node[0]],
            weight: self.weight,
        }
    }
}

impl<N: Copy, I: Copy, W> Clone for EdgeReference<'_, N, I, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Copy, I: Copy, W> Copy for EdgeReference<'_, N, I, W> {}

impl<N: PartialEq, I: PartialEq, W> PartialEq for EdgeReference<'_, N, I, W> {
    /// Two references are equal when they name the same stored edge.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.node == other.node && std::ptr::eq(self.weight, other.weight)
    }
}

impl<N: fmt::Debug, I: fmt::Debug, W: fmt::Debug> fmt::Debug for EdgeReference<'_, N, I, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeReference")
            .field("id", &self.id)
            .field("source", &self.node[0])
            .field("target", &self.node[1])
            .field("weight", self.weight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_visit_map() {
        let mut map = BitSet::new(4);
        let n: NodeIndex = NodeIndex::new(2);
        assert!(!map.is_visited(&n));
        assert!(map.visit(n));
        assert!(!map.visit(n));
        assert!(map.is_visited(&n));
        assert!(!map.is_visited(&NodeIndex::<u32>::new(40)));
    }

    #[test]
    fn test_hashset_visit_map() {
        let mut map: HashSet<&str> = HashSet::new();
        assert!(map.visit("a"));
        assert!(!map.visit("a"));
        assert!(map.is_visited(&"a"));
        assert!(!map.is_visited(&"b"));
    }

    #[test]
    fn test_edge_reference_accessors() {
        let weight = 7;
        let edge = EdgeReference::new(0usize, 'a', 'b', &weight);
        assert_eq!(edge.source(), 'a');
        assert_eq!(edge.target(), 'b');
        assert_eq!(*edge.weight(), 7);
        assert_eq!(edge.id(), 0);

        let flipped = edge.reversed();
        assert_eq!((flipped.source(), flipped.target()), ('b', 'a'));
        assert_eq!(flipped.id(), edge.id());
        assert_ne!(flipped, edge);
        assert_eq!(edge, edge.clone());
    }
}
