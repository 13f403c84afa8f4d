//! The adjacency-list graph.
//!
//! [`Graph`] stores nodes and edges in two flat vectors. Adjacency is encoded
//! with intrusive singly-linked lists threaded through the edge records:
//!
//! ```text
//! Node { weight, next: [first outgoing edge, first incoming edge] }
//! Edge { weight, node: [source, target], next: [next out of source, next into target] }
//! ```
//!
//! Every edge is a member of exactly two lists, the outgoing list of its source
//! and the incoming list of its target; a self-loop is in both lists of the
//! same node. New edges are spliced in at the list heads, so adjacency is
//! reported most-recently-added first. Lists end at [`EdgeIndex::end`].
//!
//! Removal swaps the last node or edge into the freed position and rewrites
//! every link that referred to the moved element. Indices are therefore not
//! stable across removals; [`crate::StableGraph`] keeps them stable.

use std::{
    cmp, fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use strum::IntoEnumIterator;
use tracing::trace;

use crate::{
    graph::{
        edges_walker_mut, index_capacity, index_exhausted, DefaultIx, Directed, Direction,
        EdgeIndex, EdgeReferences, EdgeType, Edges, EdgesConnecting, Externals, Frozen,
        GraphEdgeReference, IndexType, Neighbors, NodeIndex, Undirected,
    },
    utils::{
        array::{index_twice, Pair},
        BitSet,
    },
    visit::{
        Data, EdgeCount, EdgeIndexable, GraphBase, GraphProp, IntoEdgeReferences, IntoEdges,
        IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        IntoNodeReferences, NodeCount, NodeIndexable, Visitable,
    },
    Error, Result,
};

/// A node record: the weight and the heads of its two adjacency lists.
#[derive(Clone, Debug)]
pub struct Node<N, Ix = DefaultIx> {
    /// Associated node data.
    pub weight: N,
    /// Head of the outgoing list, head of the incoming list.
    pub(crate) next: [EdgeIndex<Ix>; 2],
}

impl<N, Ix: IndexType> Node<N, Ix> {
    /// Returns the first edge of the list in direction `dir`, or
    /// [`EdgeIndex::end`] when empty.
    pub fn next_edge(&self, dir: Direction) -> EdgeIndex<Ix> {
        self.next[dir.index()]
    }
}

/// An edge record: the weight, both endpoints and the successor in each of
/// the two lists the edge belongs to.
#[derive(Clone, Debug)]
pub struct Edge<E, Ix = DefaultIx> {
    /// Associated edge data.
    pub weight: E,
    /// Next edge in the source's outgoing list, next edge in the target's
    /// incoming list.
    pub(crate) next: [EdgeIndex<Ix>; 2],
    /// Source and target.
    pub(crate) node: [NodeIndex<Ix>; 2],
}

impl<E, Ix: IndexType> Edge<E, Ix> {
    /// Returns the next edge in the list of direction `dir`.
    pub fn next_edge(&self, dir: Direction) -> EdgeIndex<Ix> {
        self.next[dir.index()]
    }

    /// Returns the source node.
    pub fn source(&self) -> NodeIndex<Ix> {
        self.node[0]
    }

    /// Returns the target node.
    pub fn target(&self) -> NodeIndex<Ix> {
        self.node[1]
    }
}

/// An adjacency-list graph with arbitrary node and edge weights.
///
/// * `Ty` is [`Directed`] or [`Undirected`].
/// * `Ix` is the index width; it bounds the number of nodes and edges (the
///   maximum value is reserved as the list sentinel).
///
/// Parallel edges and self-loops are allowed.
///
/// # Examples
///
/// ```rust
/// use lindgraph::{DiGraph, Direction};
///
/// let mut deps = DiGraph::<&str, ()>::new();
/// let core = deps.add_node("core");
/// let io = deps.add_node("io");
/// let app = deps.add_node("app");
/// deps.extend_with_edges([(app, io), (app, core), (io, core)]);
///
/// assert_eq!(deps.neighbors(app).collect::<Vec<_>>(), vec![core, io]);
/// assert_eq!(deps.neighbors_directed(core, Direction::Incoming).count(), 2);
/// assert_eq!(deps.externals(Direction::Incoming).collect::<Vec<_>>(), vec![app]);
/// ```
pub struct Graph<N, E, Ty = Directed, Ix = DefaultIx> {
    pub(crate) nodes: Vec<Node<N, Ix>>,
    pub(crate) edges: Vec<Edge<E, Ix>>,
    pub(crate) ty: PhantomData<Ty>,
}

/// A [`Graph`] with directed edges.
pub type DiGraph<N, E, Ix = DefaultIx> = Graph<N, E, Directed, Ix>;

/// A [`Graph`] with undirected edges.
pub type UnGraph<N, E, Ix = DefaultIx> = Graph<N, E, Undirected, Ix>;

impl<N, E> Graph<N, E, Directed> {
    /// Creates an empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            ty: PhantomData,
        }
    }
}

impl<N, E> Graph<N, E, Undirected> {
    /// Creates an empty undirected graph.
    #[must_use]
    pub fn new_undirected() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            ty: PhantomData,
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Graph<N, E, Ty, Ix> {
    /// Creates an empty graph with room for `nodes` nodes and `edges` edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            ty: PhantomData,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph is directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Returns the allocated `(node, edge)` capacity.
    pub fn capacity(&self) -> (usize, usize) {
        (self.nodes.capacity(), self.edges.capacity())
    }

    /// Reserves room for at least `additional` more nodes.
    pub fn reserve_nodes(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Reserves room for at least `additional` more edges.
    pub fn reserve_edges(&mut self, additional: usize) {
        self.edges.reserve(additional);
    }

    /// Adds a node with weight `weight` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeIndexOverflow`] if `Ix` cannot address another node.
    pub fn try_add_node(&mut self, weight: N) -> Result<NodeIndex<Ix>> {
        if index_exhausted::<Ix>(self.nodes.len()) {
            return Err(Error::NodeIndexOverflow(index_capacity::<Ix>()));
        }
        let node_idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node {
            weight,
            next: [EdgeIndex::end(), EdgeIndex::end()],
        });
        Ok(node_idx)
    }

    /// Adds a node with weight `weight` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if `Ix` cannot address another node; see [`Graph::try_add_node`].
    pub fn add_node(&mut self, weight: N) -> NodeIndex<Ix> {
        match self.try_add_node(weight) {
            Ok(ix) => ix,
            Err(err) => panic!("Graph::add_node: {err}"),
        }
    }

    /// Adds an edge from `a` to `b` and returns its index.
    ///
    /// Does not check for an existing edge between the pair; use
    /// [`Graph::update_edge`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] if either endpoint does not exist and
    /// [`Error::EdgeIndexOverflow`] if `Ix` cannot address another edge.
    pub fn try_add_edge(
        &mut self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
        weight: E,
    ) -> Result<EdgeIndex<Ix>> {
        let bound = self.nodes.len();
        if let Some(missing) = [a, b].into_iter().find(|n| n.index() >= bound) {
            return Err(Error::NodeOutOfBounds(missing.index()));
        }
        if index_exhausted::<Ix>(self.edges.len()) {
            return Err(Error::EdgeIndexOverflow(index_capacity::<Ix>()));
        }
        let edge_idx = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge {
            weight,
            node: [a, b],
            next: [EdgeIndex::end(), EdgeIndex::end()],
        });
        self.link_edge(edge_idx);
        Ok(edge_idx)
    }

    /// Adds an edge from `a` to `b` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint does not exist or the edge index space is
    /// exhausted; see [`Graph::try_add_edge`].
    pub fn add_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> EdgeIndex<Ix> {
        match self.try_add_edge(a, b, weight) {
            Ok(ix) => ix,
            Err(err) => panic!("Graph::add_edge: {err}"),
        }
    }

    /// Splices edge `e` onto the heads of its endpoints' lists.
    pub(crate) fn link_edge(&mut self, e: EdgeIndex<Ix>) {
        let edge = &mut self.edges[e.index()];
        let [a, b] = edge.node;
        match index_twice(&mut self.nodes, a.index(), b.index()) {
            Pair::One(an) => {
                edge.next = an.next;
                an.next = [e, e];
            }
            Pair::Both(an, bn) => {
                edge.next = [an.next[0], bn.next[1]];
                an.next[0] = e;
                bn.next[1] = e;
            }
            Pair::None => unreachable!("edge {e:?} has an endpoint outside the node storage"),
        }
    }

    /// Sets the weight of the edge from `a` to `b`, adding the edge if none
    /// exists. Returns the edge index.
    ///
    /// For undirected graphs `(a, b)` and `(b, a)` name the same edge.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Graph::add_edge`].
    pub fn update_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> EdgeIndex<Ix> {
        if let Some(ix) = self.find_edge(a, b) {
            if let Some(slot) = self.edge_weight_mut(ix) {
                *slot = weight;
                return ix;
            }
        }
        self.add_edge(a, b, weight)
    }

    /// Returns the weight of node `a`.
    pub fn node_weight(&self, a: NodeIndex<Ix>) -> Option<&N> {
        self.nodes.get(a.index()).map(|n| &n.weight)
    }

    /// Returns the weight of node `a` mutably.
    pub fn node_weight_mut(&mut self, a: NodeIndex<Ix>) -> Option<&mut N> {
        self.nodes.get_mut(a.index()).map(|n| &mut n.weight)
    }

    /// Returns the weight of edge `e`.
    pub fn edge_weight(&self, e: EdgeIndex<Ix>) -> Option<&E> {
        self.edges.get(e.index()).map(|e| &e.weight)
    }

    /// Returns the weight of edge `e` mutably.
    pub fn edge_weight_mut(&mut self, e: EdgeIndex<Ix>) -> Option<&mut E> {
        self.edges.get_mut(e.index()).map(|e| &mut e.weight)
    }

    /// Returns the `(source, target)` of edge `e`.
    pub fn edge_endpoints(&self, e: EdgeIndex<Ix>) -> Option<(NodeIndex<Ix>, NodeIndex<Ix>)> {
        self.edges.get(e.index()).map(|ed| (ed.source(), ed.target()))
    }

    /// Returns every node weight mutably, in index order.
    pub fn node_weights_mut(&mut self) -> impl Iterator<Item = &mut N> {
        self.nodes.iter_mut().map(|n| &mut n.weight)
    }

    /// Returns every node weight, in index order.
    pub fn node_weights(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter().map(|n| &n.weight)
    }

    /// Returns every edge weight mutably, in index order.
    pub fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.edges.iter_mut().map(|e| &mut e.weight)
    }

    /// Returns every edge weight, in index order.
    pub fn edge_weights(&self) -> impl Iterator<Item = &E> {
        self.edges.iter().map(|e| &e.weight)
    }

    /// Removes node `a` and every edge incident to it, returning its weight.
    ///
    /// The last node moves into position `a`, and every edge referring to the
    /// moved node is rewritten. Returns `None` if `a` does not exist.
    ///
    /// Runs in O(e') where e' is the number of edges touching either node.
    pub fn remove_node(&mut self, a: NodeIndex<Ix>) -> Option<N> {
        self.nodes.get(a.index())?;
        for d in Direction::iter() {
            let k = d.index();
            loop {
                let next = self.nodes[a.index()].next[k];
                if next == EdgeIndex::end() {
                    break;
                }
                let removed = self.remove_edge(next);
                debug_assert!(removed.is_some());
            }
        }

        let node = self.nodes.swap_remove(a.index());

        // the former last node now lives at `a`; point its edges there
        let moved_lists = match self.nodes.get(a.index()) {
            None => return Some(node.weight),
            Some(moved) => moved.next,
        };
        let old_index = NodeIndex::new(self.nodes.len());
        for d in Direction::iter() {
            let k = d.index();
            let mut edges = edges_walker_mut(&mut self.edges, moved_lists[k], d);
            while let Some(edge) = edges.next_edge() {
                debug_assert_eq!(edge.node[k], old_index);
                edge.node[k] = a;
            }
        }
        trace!(
            removed = a.index(),
            moved_from = old_index.index(),
            "relinked swapped node"
        );
        Some(node.weight)
    }

    /// Replaces the link to `e` in both of its lists with `edge_next`.
    pub(crate) fn change_edge_links(
        &mut self,
        edge_node: [NodeIndex<Ix>; 2],
        e: EdgeIndex<Ix>,
        edge_next: [EdgeIndex<Ix>; 2],
    ) {
        for d in Direction::iter() {
            let k = d.index();
            let Some(node) = self.nodes.get_mut(edge_node[k].index()) else {
                debug_assert!(false, "edge endpoint {:?} is not a node", edge_node[k]);
                return;
            };
            let head = node.next[k];
            if head == e {
                node.next[k] = edge_next[k];
            } else {
                let mut edges = edges_walker_mut(&mut self.edges, head, d);
                while let Some(edge) = edges.next_edge() {
                    if edge.next[k] == e {
                        edge.next[k] = edge_next[k];
                        break;
                    }
                }
            }
        }
    }

    /// Removes edge `e` and returns its weight, or `None` if it does not exist.
    ///
    /// The last edge moves into position `e`.
    ///
    /// Runs in O(e') where e' is the size of the four lists involved.
    pub fn remove_edge(&mut self, e: EdgeIndex<Ix>) -> Option<E> {
        let (edge_node, edge_next) = match self.edges.get(e.index()) {
            None => return None,
            Some(edge) => (edge.node, edge.next),
        };
        self.change_edge_links(edge_node, e, edge_next);
        self.remove_edge_adjust_indices(e)
    }

    fn remove_edge_adjust_indices(&mut self, e: EdgeIndex<Ix>) -> Option<E> {
        let edge = self.edges.swap_remove(e.index());
        let moved_node = match self.edges.get(e.index()) {
            None => return Some(edge.weight),
            Some(moved) => moved.node,
        };
        let moved_from = EdgeIndex::new(self.edges.len());
        self.change_edge_links(moved_node, moved_from, [e, e]);
        Some(edge.weight)
    }

    /// Returns the neighbors of `a`.
    ///
    /// Directed: targets of outgoing edges. Undirected: all adjacent nodes.
    /// A node appears once per connecting edge, most recent edge first.
    pub fn neighbors(&self, a: NodeIndex<Ix>) -> Neighbors<'_, E, Ix> {
        self.neighbors_directed(a, Direction::Outgoing)
    }

    /// Returns the neighbors of `a` along edges in direction `dir`.
    ///
    /// For undirected graphs `dir` is ignored.
    pub fn neighbors_directed(&self, a: NodeIndex<Ix>, dir: Direction) -> Neighbors<'_, E, Ix> {
        let mut iter = self.neighbors_undirected(a);
        if self.is_directed() {
            let k = dir.index();
            iter.next[1 - k] = EdgeIndex::end();
            iter.skip_start = NodeIndex::end();
        }
        iter
    }

    /// Returns every node adjacent to `a` regardless of edge direction.
    pub fn neighbors_undirected(&self, a: NodeIndex<Ix>) -> Neighbors<'_, E, Ix> {
        Neighbors {
            skip_start: a,
            edges: &self.edges,
            next: match self.nodes.get(a.index()) {
                None => [EdgeIndex::end(), EdgeIndex::end()],
                Some(n) => n.next,
            },
        }
    }

    /// Returns the outgoing edges of `a` (all incident edges if undirected).
    pub fn edges(&self, a: NodeIndex<Ix>) -> Edges<'_, E, Ty, Ix> {
        self.edges_directed(a, Direction::Outgoing)
    }

    /// Returns the edges of `a` in direction `dir`.
    ///
    /// Undirected graphs yield every incident edge, with `a` as the source
    /// for [`Direction::Outgoing`] and as the target for
    /// [`Direction::Incoming`].
    pub fn edges_directed(&self, a: NodeIndex<Ix>, dir: Direction) -> Edges<'_, E, Ty, Ix> {
        Edges {
            skip_start: a,
            edges: &self.edges,
            next: match self.nodes.get(a.index()) {
                None => [EdgeIndex::end(), EdgeIndex::end()],
                Some(n) => n.next,
            },
            direction: dir,
            ty: PhantomData,
        }
    }

    /// Returns every edge from `a` to `b` (either orientation if undirected).
    pub fn edges_connecting(
        &self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
    ) -> EdgesConnecting<'_, E, Ty, Ix> {
        EdgesConnecting {
            target_node: b,
            edges: self.edges_directed(a, Direction::Outgoing),
        }
    }

    /// Returns `true` if there is an edge from `a` to `b`.
    pub fn contains_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Returns an edge from `a` to `b`, if any.
    ///
    /// Directed graphs walk the outgoing list of `a` only; undirected graphs
    /// accept either orientation.
    pub fn find_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<EdgeIndex<Ix>> {
        if !self.is_directed() {
            return self.find_edge_undirected(a, b).map(|(ix, _)| ix);
        }
        let node = self.nodes.get(a.index())?;
        let mut edix = node.next[0];
        while let Some(edge) = self.edges.get(edix.index()) {
            if edge.node[1] == b {
                return Some(edix);
            }
            edix = edge.next[0];
        }
        None
    }

    /// Returns an edge between `a` and `b` in either orientation, with the
    /// list of `a` it was found in: [`Direction::Outgoing`] if stored as
    /// `a -> b`.
    pub fn find_edge_undirected(
        &self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
    ) -> Option<(EdgeIndex<Ix>, Direction)> {
        let node = self.nodes.get(a.index())?;
        for d in Direction::iter() {
            let k = d.index();
            let mut edix = node.next[k];
            while let Some(edge) = self.edges.get(edix.index()) {
                if edge.node[1 - k] == b {
                    return Some((edix, d));
                }
                edix = edge.next[k];
            }
        }
        None
    }

    /// Returns the nodes with no edge in direction `dir`: sources for
    /// [`Direction::Incoming`], sinks for [`Direction::Outgoing`]. For
    /// undirected graphs, the isolated nodes.
    pub fn externals(&self, dir: Direction) -> Externals<'_, N, Ty, Ix> {
        Externals {
            iter: self.nodes.iter().enumerate(),
            dir,
            ty: PhantomData,
        }
    }

    /// Returns every node index in ascending order.
    ///
    /// The iterator does not borrow the graph.
    pub fn node_indices(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeIndex<Ix>> + ExactSizeIterator + Clone {
        (0..self.node_count()).map(NodeIndex::new)
    }

    /// Returns every edge index in ascending order.
    ///
    /// The iterator does not borrow the graph.
    pub fn edge_indices(
        &self,
    ) -> impl DoubleEndedIterator<Item = EdgeIndex<Ix>> + ExactSizeIterator + Clone {
        (0..self.edge_count()).map(EdgeIndex::new)
    }

    /// Returns `(index, weight)` for every node.
    pub fn node_references(&self) -> impl DoubleEndedIterator<Item = (NodeIndex<Ix>, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex::new(i), &node.weight))
    }

    /// Returns a reference to every edge in index order.
    pub fn edge_references(&self) -> EdgeReferences<'_, E, Ix> {
        EdgeReferences {
            iter: self.edges.iter().enumerate(),
        }
    }

    /// Returns the node records.
    pub fn raw_nodes(&self) -> &[Node<N, Ix>] {
        &self.nodes
    }

    /// Returns the edge records.
    pub fn raw_edges(&self) -> &[Edge<E, Ix>] {
        &self.edges
    }

    /// Returns the head of the list of `a` in direction `dir`.
    pub fn first_edge(&self, a: NodeIndex<Ix>, dir: Direction) -> Option<EdgeIndex<Ix>> {
        let edix = self.nodes.get(a.index())?.next[dir.index()];
        (edix != EdgeIndex::end()).then_some(edix)
    }

    /// Returns the successor of `e` in its list of direction `dir`.
    pub fn next_edge(&self, e: EdgeIndex<Ix>, dir: Direction) -> Option<EdgeIndex<Ix>> {
        let edix = self.edges.get(e.index())?.next[dir.index()];
        (edix != EdgeIndex::end()).then_some(edix)
    }

    /// Reverses every edge in place.
    pub fn reverse(&mut self) {
        for edge in &mut self.edges {
            edge.node.swap(0, 1);
            edge.next.swap(0, 1);
        }
        for node in &mut self.nodes {
            node.next.swap(0, 1);
        }
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Removes all edges, keeping the nodes.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        for node in &mut self.nodes {
            node.next = [EdgeIndex::end(), EdgeIndex::end()];
        }
    }

    /// Keeps only the nodes for which `visit` returns `true`.
    ///
    /// Nodes are visited from the highest index down, so a removal only ever
    /// moves an already-visited node. The [`Frozen`] view allows weight
    /// updates but no structural changes.
    pub fn retain_nodes<F>(&mut self, mut visit: F)
    where
        F: FnMut(Frozen<'_, Self>, NodeIndex<Ix>) -> bool,
    {
        for index in self.node_indices().rev() {
            if !visit(Frozen::new(self), index) {
                let removed = self.remove_node(index);
                debug_assert!(removed.is_some());
            }
        }
    }

    /// Keeps only the edges for which `visit` returns `true`.
    ///
    /// Edges are visited from the highest index down.
    pub fn retain_edges<F>(&mut self, mut visit: F)
    where
        F: FnMut(Frozen<'_, Self>, EdgeIndex<Ix>) -> bool,
    {
        for index in self.edge_indices().rev() {
            if !visit(Frozen::new(self), index) {
                let removed = self.remove_edge(index);
                debug_assert!(removed.is_some());
            }
        }
    }

    /// Builds a graph with the same structure and mapped weights.
    pub fn map<'a, F, G, N2, E2>(&'a self, mut node_map: F, mut edge_map: G) -> Graph<N2, E2, Ty, Ix>
    where
        F: FnMut(NodeIndex<Ix>, &'a N) -> N2,
        G: FnMut(EdgeIndex<Ix>, &'a E) -> E2,
    {
        let mut g = Graph::with_capacity(0, 0);
        g.nodes.extend(self.nodes.iter().enumerate().map(|(i, node)| Node {
            weight: node_map(NodeIndex::new(i), &node.weight),
            next: node.next,
        }));
        g.edges.extend(self.edges.iter().enumerate().map(|(i, edge)| Edge {
            weight: edge_map(EdgeIndex::new(i), &edge.weight),
            next: edge.next,
            node: edge.node,
        }));
        g
    }

    /// Builds a graph from the nodes and edges for which the mapping closures
    /// return `Some`.
    ///
    /// An edge is dropped along with either endpoint. Surviving nodes are
    /// renumbered densely, keeping their relative order; edges keep their
    /// relative order too.
    pub fn filter_map<'a, F, G, N2, E2>(
        &'a self,
        mut node_map: F,
        mut edge_map: G,
    ) -> Graph<N2, E2, Ty, Ix>
    where
        F: FnMut(NodeIndex<Ix>, &'a N) -> Option<N2>,
        G: FnMut(EdgeIndex<Ix>, &'a E) -> Option<E2>,
    {
        let mut g = Graph::with_capacity(0, 0);
        let mut node_index_map = vec![NodeIndex::end(); self.node_count()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(weight) = node_map(NodeIndex::new(i), &node.weight) {
                node_index_map[i] = g.add_node(weight);
            }
        }
        for (i, edge) in self.edges.iter().enumerate() {
            let source = node_index_map[edge.source().index()];
            let target = node_index_map[edge.target().index()];
            if source != NodeIndex::end() && target != NodeIndex::end() {
                if let Some(weight) = edge_map(EdgeIndex::new(i), &edge.weight) {
                    g.add_edge(source, target, weight);
                }
            }
        }
        g
    }

    /// Reinterprets the graph with another edge type.
    ///
    /// No data moves: the same records read as directed or undirected lists.
    pub fn into_edge_type<NewTy: EdgeType>(self) -> Graph<N, E, NewTy, Ix> {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
            ty: PhantomData,
        }
    }

    /// Builds a graph from edges, adding default-weighted nodes as needed.
    ///
    /// ```rust
    /// use lindgraph::Graph;
    ///
    /// let g: Graph<(), i32> = Graph::from_edges(&[(0, 1, 5), (1, 2, 7), (0, 3, 1)]);
    /// assert_eq!(g.node_count(), 4);
    /// assert_eq!(g.edge_count(), 3);
    /// ```
    pub fn from_edges<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<E>,
        <I::Item as IntoWeightedEdge<E>>::NodeId: Into<NodeIndex<Ix>>,
        N: Default,
    {
        let mut g = Self::with_capacity(0, 0);
        g.extend_with_edges(iterable);
        g
    }

    /// Adds edges, and default-weighted nodes up to the largest endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the index space is exhausted.
    pub fn extend_with_edges<I>(&mut self, iterable: I)
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<E>,
        <I::Item as IntoWeightedEdge<E>>::NodeId: Into<NodeIndex<Ix>>,
        N: Default,
    {
        let iter = iterable.into_iter();
        let (low, _) = iter.size_hint();
        self.edges.reserve(low);
        for elt in iter {
            let (source, target, weight) = elt.into_weighted_edge();
            let (source, target): (NodeIndex<Ix>, NodeIndex<Ix>) = (source.into(), target.into());
            let nx = cmp::max(source, target);
            while nx.index() >= self.node_count() {
                self.add_node(N::default());
            }
            self.add_edge(source, target, weight);
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Default for Graph<N, E, Ty, Ix> {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<N: Clone, E: Clone, Ty, Ix: IndexType> Clone for Graph<N, E, Ty, Ix> {
    fn clone(&self) -> Self {
        Graph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            ty: PhantomData,
        }
    }
}

impl<N, E, Ty, Ix> fmt::Debug for Graph<N, E, Ty, Ix>
where
    N: fmt::Debug,
    E: fmt::Debug,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<_> = self
            .edges
            .iter()
            .map(|e| (e.source().index(), e.target().index(), &e.weight))
            .collect();
        let nodes: Vec<_> = self.nodes.iter().map(|n| &n.weight).collect();
        f.debug_struct("Graph")
            .field(
                "Ty",
                &if Ty::is_directed() {
                    "Directed"
                } else {
                    "Undirected"
                },
            )
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .field("nodes", &nodes)
            .field("edges", &edges)
            .finish()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<NodeIndex<Ix>> for Graph<N, E, Ty, Ix> {
    type Output = N;

    /// # Panics
    ///
    /// Panics if the node does not exist.
    fn index(&self, index: NodeIndex<Ix>) -> &N {
        &self.nodes[index.index()].weight
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<NodeIndex<Ix>> for Graph<N, E, Ty, Ix> {
    fn index_mut(&mut self, index: NodeIndex<Ix>) -> &mut N {
        &mut self.nodes[index.index()].weight
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<EdgeIndex<Ix>> for Graph<N, E, Ty, Ix> {
    type Output = E;

    /// # Panics
    ///
    /// Panics if the edge does not exist.
    fn index(&self, index: EdgeIndex<Ix>) -> &E {
        &self.edges[index.index()].weight
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<EdgeIndex<Ix>> for Graph<N, E, Ty, Ix> {
    fn index_mut(&mut self, index: EdgeIndex<Ix>) -> &mut E {
        &mut self.edges[index.index()].weight
    }
}

/// Conversion of edge descriptions into `(source, target, weight)`.
///
/// Implemented for `(a, b)` (default weight), `(a, b, w)`, and references to
/// both.
pub trait IntoWeightedEdge<E> {
    /// The endpoint type.
    type NodeId;
    /// Converts into `(source, target, weight)`.
    fn into_weighted_edge(self) -> (Self::NodeId, Self::NodeId, E);
}

impl<Ix, E: Default> IntoWeightedEdge<E> for (Ix, Ix) {
    type NodeId = Ix;

    fn into_weighted_edge(self) -> (Ix, Ix, E) {
        (self.0, self.1, E::default())
    }
}

impl<Ix, E> IntoWeightedEdge<E> for (Ix, Ix, E) {
    type NodeId = Ix;

    fn into_weighted_edge(self) -> (Ix, Ix, E) {
        self
    }
}

impl<Ix: Copy, E: Default> IntoWeightedEdge<E> for &(Ix, Ix) {
    type NodeId = Ix;

    fn into_weighted_edge(self) -> (Ix, Ix, E) {
        (self.0, self.1, E::default())
    }
}

impl<Ix: Copy, E: Clone> IntoWeightedEdge<E> for &(Ix, Ix, E) {
    type NodeId = Ix;

    fn into_weighted_edge(self) -> (Ix, Ix, E) {
        (self.0, self.1, self.2.clone())
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphBase for Graph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;
    type EdgeId = EdgeIndex<Ix>;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Data for Graph<N, E, Ty, Ix> {
    type NodeWeight = N;
    type EdgeWeight = E;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphProp for Graph<N, E, Ty, Ix> {
    type EdgeType = Ty;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeCount for Graph<N, E, Ty, Ix> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> EdgeCount for Graph<N, E, Ty, Ix> {
    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeIndexable for Graph<N, E, Ty, Ix> {
    fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    fn to_index(&self, a: NodeIndex<Ix>) -> usize {
        a.index()
    }

    fn from_index(&self, i: usize) -> NodeIndex<Ix> {
        NodeIndex::new(i)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> EdgeIndexable for Graph<N, E, Ty, Ix> {
    fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn to_edge_index(&self, e: EdgeIndex<Ix>) -> usize {
        e.index()
    }

    fn from_edge_index(&self, i: usize) -> EdgeIndex<Ix> {
        EdgeIndex::new(i)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighbors for Graph<N, E, Ty, Ix> {
    fn neighbors(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> {
        Graph::neighbors(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighborsDirected for Graph<N, E, Ty, Ix> {
    fn neighbors_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = NodeIndex<Ix>> {
        Graph::neighbors_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeIdentifiers for Graph<N, E, Ty, Ix> {
    fn node_identifiers(&self) -> impl Iterator<Item = NodeIndex<Ix>> {
        self.node_indices()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeReferences for Graph<N, E, Ty, Ix> {
    fn node_references(&self) -> impl Iterator<Item = (NodeIndex<Ix>, &N)> {
        Graph::node_references(self)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgeReferences for Graph<N, E, Ty, Ix> {
    fn edge_references(&self) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        Graph::edge_references(self)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdges for Graph<N, E, Ty, Ix> {
    fn edges(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        Graph::edges(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgesDirected for Graph<N, E, Ty, Ix> {
    fn edges_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        Graph::edges_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Visitable for Graph<N, E, Ty, Ix> {
    type Map = BitSet;

    fn visit_map(&self) -> BitSet {
        BitSet::new(self.node_count())
    }

    fn reset_map(&self, map: &mut BitSet) {
        map.clear();
        map.grow(self.node_count());
    }
}
