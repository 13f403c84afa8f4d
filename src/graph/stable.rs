//! A graph whose indices survive removals.
//!
//! [`StableGraph`] reuses the [`Graph`] encoding with `Option` weights. A slot
//! whose weight is `None` is vacant; its link fields are repurposed as a free
//! list instead of adjacency:
//!
//! - vacant nodes form a doubly linked list, `next[0]` pointing at the next
//!   vacant node and `next[1]` at the previous one, so any vacant slot can be
//!   unlinked in O(1) when [`StableGraph::extend_with_edges`] reoccupies it;
//! - vacant edges form a singly linked list through `next[0]` and have both
//!   endpoints set to [`NodeIndex::end`].
//!
//! Vacant edges are never on an adjacency list, so adjacency walks only ever
//! see live edges. Vacant nodes are skipped by checking the weight.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use strum::IntoEnumIterator;
use tracing::trace;

use crate::{
    graph::{
        index_capacity, index_exhausted, DefaultIx, Directed, Direction, Edge, EdgeIndex,
        EdgeType, Frozen, Graph, GraphEdgeReference, IndexType, IntoWeightedEdge, Neighbors, Node,
        NodeIndex, Undirected,
    },
    utils::BitSet,
    visit::{
        Data, EdgeCount, EdgeIndexable, EdgeReference, GraphBase, GraphProp, IntoEdgeReferences,
        IntoEdges, IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        IntoNodeReferences, NodeCount, NodeIndexable, Visitable,
    },
    Error, Result,
};

/// An adjacency-list graph with stable node and edge indices.
///
/// Removing a node or edge leaves a vacant slot that a later insertion
/// reuses (most recently vacated first). Indices of untouched elements never
/// change.
///
/// # Examples
///
/// ```rust
/// use lindgraph::StableDiGraph;
///
/// let mut g = StableDiGraph::<&str, u32>::new();
/// let a = g.add_node("a");
/// let b = g.add_node("b");
/// let c = g.add_node("c");
/// g.add_edge(a, c, 1);
///
/// g.remove_node(b);
/// assert_eq!(g[c], "c");
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.node_bound(), 3);
///
/// // the vacated slot is reused
/// assert_eq!(g.add_node("d"), b);
/// ```
pub struct StableGraph<N, E, Ty = Directed, Ix = DefaultIx> {
    g: Graph<Option<N>, Option<E>, Ty, Ix>,
    node_count: usize,
    edge_count: usize,
    free_node: NodeIndex<Ix>,
    free_edge: EdgeIndex<Ix>,
}

/// A [`StableGraph`] with directed edges.
pub type StableDiGraph<N, E, Ix = DefaultIx> = StableGraph<N, E, Directed, Ix>;

/// A [`StableGraph`] with undirected edges.
pub type StableUnGraph<N, E, Ix = DefaultIx> = StableGraph<N, E, Undirected, Ix>;

impl<N, E> StableGraph<N, E, Directed> {
    /// Creates an empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<N, E> StableGraph<N, E, Undirected> {
    /// Creates an empty undirected graph.
    #[must_use]
    pub fn new_undirected() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> StableGraph<N, E, Ty, Ix> {
    /// Creates an empty graph with room for `nodes` nodes and `edges` edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        StableGraph {
            g: Graph::with_capacity(nodes, edges),
            node_count: 0,
            edge_count: 0,
            free_node: NodeIndex::end(),
            free_edge: EdgeIndex::end(),
        }
    }

    /// Returns the allocated `(node, edge)` slot capacity.
    pub fn capacity(&self) -> (usize, usize) {
        self.g.capacity()
    }

    /// Reserves room for at least `additional` more node slots.
    pub fn reserve_nodes(&mut self, additional: usize) {
        self.g.reserve_nodes(additional);
    }

    /// Reserves room for at least `additional` more edge slots.
    pub fn reserve_edges(&mut self, additional: usize) {
        self.g.reserve_edges(additional);
    }

    /// Returns the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the number of node slots, live or vacant.
    ///
    /// Every live node index is below this bound.
    pub fn node_bound(&self) -> usize {
        self.g.node_count()
    }

    /// Returns the number of edge slots, live or vacant.
    pub fn edge_bound(&self) -> usize {
        self.g.edge_count()
    }

    /// Returns `true` if the graph is directed.
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.g.clear();
        self.node_count = 0;
        self.edge_count = 0;
        self.free_node = NodeIndex::end();
        self.free_edge = EdgeIndex::end();
    }

    /// Removes all edges, keeping the nodes and their indices.
    pub fn clear_edges(&mut self) {
        self.g.edges.clear();
        self.edge_count = 0;
        self.free_edge = EdgeIndex::end();
        for node in &mut self.g.nodes {
            if node.weight.is_some() {
                node.next = [EdgeIndex::end(), EdgeIndex::end()];
            }
        }
    }

    /// Adds a node, reusing the most recently vacated slot if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeIndexOverflow`] if no slot is vacant and `Ix`
    /// cannot address another node.
    pub fn try_add_node(&mut self, weight: N) -> Result<NodeIndex<Ix>> {
        if self.free_node != NodeIndex::end() {
            let node_idx = self.free_node;
            trace!(node = node_idx.index(), "reusing vacant node slot");
            self.occupy_vacant_node(node_idx, weight);
            Ok(node_idx)
        } else {
            let node_idx = self.g.try_add_node(Some(weight))?;
            self.node_count += 1;
            Ok(node_idx)
        }
    }

    /// Adds a node and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if the node index space is exhausted; see
    /// [`StableGraph::try_add_node`].
    pub fn add_node(&mut self, weight: N) -> NodeIndex<Ix> {
        match self.try_add_node(weight) {
            Ok(ix) => ix,
            Err(err) => panic!("StableGraph::add_node: {err}"),
        }
    }

    /// Appends a vacant node slot and pushes it onto `free_node`.
    fn add_vacant_node(&mut self, free_node: &mut NodeIndex<Ix>) {
        let node_idx = NodeIndex::new(self.g.nodes.len());
        self.g.nodes.push(Node {
            weight: None,
            next: [free_node.into_edge(), EdgeIndex::end()],
        });
        if *free_node != NodeIndex::end() {
            self.g.nodes[free_node.index()].next[1] = node_idx.into_edge();
        }
        *free_node = node_idx;
    }

    /// Unlinks the vacant slot `node_idx` from the free list and stores
    /// `weight` in it.
    fn occupy_vacant_node(&mut self, node_idx: NodeIndex<Ix>, weight: N) {
        let node_slot = &mut self.g.nodes[node_idx.index()];
        debug_assert!(node_slot.weight.is_none());
        node_slot.weight = Some(weight);
        let next_node = node_slot.next[0].into_node();
        let previous_node = node_slot.next[1].into_node();
        node_slot.next = [EdgeIndex::end(), EdgeIndex::end()];

        if previous_node != NodeIndex::end() {
            self.g.nodes[previous_node.index()].next[0] = next_node.into_edge();
        }
        if next_node != NodeIndex::end() {
            self.g.nodes[next_node.index()].next[1] = previous_node.into_edge();
        }
        if self.free_node == node_idx {
            self.free_node = next_node;
        }
        self.node_count += 1;
    }

    /// Removes node `a` and its edges, returning its weight.
    ///
    /// Returns `None` if `a` is vacant or out of bounds. No other index
    /// changes.
    pub fn remove_node(&mut self, a: NodeIndex<Ix>) -> Option<N> {
        let node_weight = self.g.nodes.get_mut(a.index())?.weight.take()?;
        for d in Direction::iter() {
            let k = d.index();
            loop {
                let next = self.g.nodes[a.index()].next[k];
                if next == EdgeIndex::end() {
                    break;
                }
                let removed = self.remove_edge(next);
                debug_assert!(removed.is_some());
            }
        }

        self.g.nodes[a.index()].next = [self.free_node.into_edge(), EdgeIndex::end()];
        if self.free_node != NodeIndex::end() {
            self.g.nodes[self.free_node.index()].next[1] = a.into_edge();
        }
        self.free_node = a;
        self.node_count -= 1;
        Some(node_weight)
    }

    /// Returns `true` if `a` names a live node.
    pub fn contains_node(&self, a: NodeIndex<Ix>) -> bool {
        self.node_weight(a).is_some()
    }

    fn check_endpoint(&self, a: NodeIndex<Ix>) -> Result<()> {
        match self.g.nodes.get(a.index()) {
            None => Err(Error::NodeOutOfBounds(a.index())),
            Some(node) if node.weight.is_none() => Err(Error::VacantNode(a.index())),
            Some(_) => Ok(()),
        }
    }

    /// Adds an edge from `a` to `b`, reusing a vacant edge slot if there is
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] or [`Error::VacantNode`] if an
    /// endpoint is not a live node, and [`Error::EdgeIndexOverflow`] if no
    /// slot is vacant and `Ix` cannot address another edge.
    pub fn try_add_edge(
        &mut self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
        weight: E,
    ) -> Result<EdgeIndex<Ix>> {
        self.check_endpoint(a)?;
        self.check_endpoint(b)?;

        let edge_idx = if self.free_edge != EdgeIndex::end() {
            let edge_idx = self.free_edge;
            trace!(edge = edge_idx.index(), "reusing vacant edge slot");
            let edge = &mut self.g.edges[edge_idx.index()];
            edge.weight = Some(weight);
            edge.node = [a, b];
            self.free_edge = edge.next[0];
            self.g.link_edge(edge_idx);
            edge_idx
        } else {
            if index_exhausted::<Ix>(self.g.edges.len()) {
                return Err(Error::EdgeIndexOverflow(index_capacity::<Ix>()));
            }
            self.g.try_add_edge(a, b, Some(weight))?
        };
        self.edge_count += 1;
        Ok(edge_idx)
    }

    /// Adds an edge from `a` to `b` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a live node or the edge index space
    /// is exhausted; see [`StableGraph::try_add_edge`].
    pub fn add_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> EdgeIndex<Ix> {
        match self.try_add_edge(a, b, weight) {
            Ok(ix) => ix,
            Err(err) => panic!("StableGraph::add_edge: {err}"),
        }
    }

    fn add_vacant_edge(&mut self, free_edge: &mut EdgeIndex<Ix>) {
        let edge_idx = EdgeIndex::new(self.g.edges.len());
        self.g.edges.push(Edge {
            weight: None,
            node: [NodeIndex::end(), NodeIndex::end()],
            next: [*free_edge, EdgeIndex::end()],
        });
        *free_edge = edge_idx;
    }

    /// Sets the weight of the edge from `a` to `b`, adding the edge if none
    /// exists.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`StableGraph::add_edge`].
    pub fn update_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> EdgeIndex<Ix> {
        if let Some(ix) = self.find_edge(a, b) {
            if let Some(slot) = self.edge_weight_mut(ix) {
                *slot = weight;
                return ix;
            }
        }
        self.add_edge(a, b, weight)
    }

    /// Removes edge `e` and returns its weight, or `None` if it is vacant or
    /// out of bounds.
    pub fn remove_edge(&mut self, e: EdgeIndex<Ix>) -> Option<E> {
        let (edge_node, edge_next) = match self.g.edges.get(e.index()) {
            Some(edge) if edge.weight.is_some() => (edge.node, edge.next),
            _ => return None,
        };
        self.g.change_edge_links(edge_node, e, edge_next);

        let edge = &mut self.g.edges[e.index()];
        edge.next = [self.free_edge, EdgeIndex::end()];
        edge.node = [NodeIndex::end(), NodeIndex::end()];
        self.free_edge = e;
        self.edge_count -= 1;
        edge.weight.take()
    }

    /// Returns the weight of node `a`.
    pub fn node_weight(&self, a: NodeIndex<Ix>) -> Option<&N> {
        self.g.nodes.get(a.index())?.weight.as_ref()
    }

    /// Returns the weight of node `a` mutably.
    pub fn node_weight_mut(&mut self, a: NodeIndex<Ix>) -> Option<&mut N> {
        self.g.nodes.get_mut(a.index())?.weight.as_mut()
    }

    /// Returns the weight of edge `e`.
    pub fn edge_weight(&self, e: EdgeIndex<Ix>) -> Option<&E> {
        self.g.edges.get(e.index())?.weight.as_ref()
    }

    /// Returns the weight of edge `e` mutably.
    pub fn edge_weight_mut(&mut self, e: EdgeIndex<Ix>) -> Option<&mut E> {
        self.g.edges.get_mut(e.index())?.weight.as_mut()
    }

    /// Returns the `(source, target)` of edge `e`.
    pub fn edge_endpoints(&self, e: EdgeIndex<Ix>) -> Option<(NodeIndex<Ix>, NodeIndex<Ix>)> {
        match self.g.edges.get(e.index()) {
            Some(edge) if edge.weight.is_some() => Some((edge.source(), edge.target())),
            _ => None,
        }
    }

    /// Returns the weight of every live node, in index order.
    pub fn node_weights(&self) -> impl Iterator<Item = &N> {
        self.g.nodes.iter().filter_map(|n| n.weight.as_ref())
    }

    /// Returns the weight of every live node mutably, in index order.
    pub fn node_weights_mut(&mut self) -> impl Iterator<Item = &mut N> {
        self.g.nodes.iter_mut().filter_map(|n| n.weight.as_mut())
    }

    /// Returns the weight of every live edge, in index order.
    pub fn edge_weights(&self) -> impl Iterator<Item = &E> {
        self.g.edges.iter().filter_map(|e| e.weight.as_ref())
    }

    /// Returns the weight of every live edge mutably, in index order.
    pub fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.g.edges.iter_mut().filter_map(|e| e.weight.as_mut())
    }

    /// Returns the index of every live node in ascending order.
    pub fn node_indices(&self) -> impl DoubleEndedIterator<Item = NodeIndex<Ix>> + '_ {
        self.g
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.weight.is_some())
            .map(|(i, _)| NodeIndex::new(i))
    }

    /// Returns the index of every live edge in ascending order.
    pub fn edge_indices(&self) -> impl DoubleEndedIterator<Item = EdgeIndex<Ix>> + '_ {
        self.g
            .edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.weight.is_some())
            .map(|(i, _)| EdgeIndex::new(i))
    }

    /// Returns `(index, weight)` for every live node.
    pub fn node_references(&self) -> impl DoubleEndedIterator<Item = (NodeIndex<Ix>, &N)> {
        self.g
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.weight.as_ref().map(|w| (NodeIndex::new(i), w)))
    }

    /// Returns every live edge in index order.
    pub fn edge_references(
        &self,
    ) -> impl DoubleEndedIterator<Item = GraphEdgeReference<'_, E, Ix>> {
        self.g.edges.iter().enumerate().filter_map(|(i, edge)| {
            edge.weight
                .as_ref()
                .map(|w| EdgeReference::new(EdgeIndex::new(i), edge.node[0], edge.node[1], w))
        })
    }

    /// Returns the adjacency list heads of `a`, or empty heads if `a` is
    /// vacant (whose link fields belong to the free list).
    fn live_heads(&self, a: NodeIndex<Ix>) -> [EdgeIndex<Ix>; 2] {
        match self.g.nodes.get(a.index()) {
            Some(node) if node.weight.is_some() => node.next,
            _ => [EdgeIndex::end(), EdgeIndex::end()],
        }
    }

    /// Returns the neighbors of `a`; see [`Graph::neighbors`].
    pub fn neighbors(&self, a: NodeIndex<Ix>) -> Neighbors<'_, Option<E>, Ix> {
        self.neighbors_directed(a, Direction::Outgoing)
    }

    /// Returns the neighbors of `a` along edges in direction `dir`; see
    /// [`Graph::neighbors_directed`].
    pub fn neighbors_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> Neighbors<'_, Option<E>, Ix> {
        let mut iter = self.neighbors_undirected(a);
        if self.is_directed() {
            iter.next[1 - dir.index()] = EdgeIndex::end();
            iter.skip_start = NodeIndex::end();
        }
        iter
    }

    /// Returns every node adjacent to `a` regardless of edge direction.
    pub fn neighbors_undirected(&self, a: NodeIndex<Ix>) -> Neighbors<'_, Option<E>, Ix> {
        Neighbors {
            skip_start: a,
            edges: &self.g.edges,
            next: self.live_heads(a),
        }
    }

    /// Returns the outgoing edges of `a` (all incident edges if undirected).
    pub fn edges(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        self.edges_directed(a, Direction::Outgoing)
    }

    /// Returns the edges of `a` in direction `dir`; see
    /// [`Graph::edges_directed`].
    pub fn edges_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        let inner = crate::graph::Edges::<'_, Option<E>, Ty, Ix> {
            skip_start: a,
            edges: &self.g.edges,
            next: self.live_heads(a),
            direction: dir,
            ty: PhantomData,
        };
        inner.filter_map(|edge| {
            edge.weight
                .as_ref()
                .map(|w| EdgeReference::new(edge.id, edge.node[0], edge.node[1], w))
        })
    }

    /// Returns every edge from `a` to `b` (either orientation if undirected).
    pub fn edges_connecting(
        &self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
    ) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        self.edges_directed(a, Direction::Outgoing)
            .filter(move |edge| edge.target() == b)
    }

    /// Returns an edge from `a` to `b`, if any; see [`Graph::find_edge`].
    pub fn find_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<EdgeIndex<Ix>> {
        if !self.contains_node(a) {
            return None;
        }
        self.g.find_edge(a, b)
    }

    /// Returns an edge between `a` and `b` in either orientation; see
    /// [`Graph::find_edge_undirected`].
    pub fn find_edge_undirected(
        &self,
        a: NodeIndex<Ix>,
        b: NodeIndex<Ix>,
    ) -> Option<(EdgeIndex<Ix>, Direction)> {
        if !self.contains_node(a) {
            return None;
        }
        self.g.find_edge_undirected(a, b)
    }

    /// Returns `true` if there is an edge from `a` to `b`.
    pub fn contains_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Returns the live nodes with no edge in direction `dir`; see
    /// [`Graph::externals`].
    pub fn externals(&self, dir: Direction) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        let k = dir.index();
        self.g
            .nodes
            .iter()
            .enumerate()
            .filter_map(move |(index, node)| {
                let external = node.weight.is_some()
                    && node.next[k] == EdgeIndex::end()
                    && (Ty::is_directed() || node.next[1 - k] == EdgeIndex::end());
                external.then(|| NodeIndex::new(index))
            })
    }

    /// Reverses every live edge in place.
    pub fn reverse(&mut self) {
        for edge in &mut self.g.edges {
            if edge.weight.is_some() {
                edge.node.swap(0, 1);
                edge.next.swap(0, 1);
            }
        }
        for node in &mut self.g.nodes {
            if node.weight.is_some() {
                node.next.swap(0, 1);
            }
        }
    }

    /// Keeps only the nodes for which `visit` returns `true`.
    ///
    /// Removal does not disturb other indices, so the visiting order is
    /// simply ascending.
    pub fn retain_nodes<F>(&mut self, mut visit: F)
    where
        F: FnMut(Frozen<'_, Self>, NodeIndex<Ix>) -> bool,
    {
        for i in 0..self.node_bound() {
            let ix = NodeIndex::new(i);
            if self.contains_node(ix) && !visit(Frozen::new(self), ix) {
                self.remove_node(ix);
            }
        }
    }

    /// Keeps only the edges for which `visit` returns `true`.
    pub fn retain_edges<F>(&mut self, mut visit: F)
    where
        F: FnMut(Frozen<'_, Self>, EdgeIndex<Ix>) -> bool,
    {
        for i in 0..self.edge_bound() {
            let ix = EdgeIndex::new(i);
            if self.edge_weight(ix).is_some() && !visit(Frozen::new(self), ix) {
                self.remove_edge(ix);
            }
        }
    }

    /// Builds a graph with the same slots, indices and free lists, with
    /// mapped weights.
    pub fn map<'a, F, G, N2, E2>(
        &'a self,
        mut node_map: F,
        mut edge_map: G,
    ) -> StableGraph<N2, E2, Ty, Ix>
    where
        F: FnMut(NodeIndex<Ix>, &'a N) -> N2,
        G: FnMut(EdgeIndex<Ix>, &'a E) -> E2,
    {
        StableGraph {
            g: self.g.map(
                |i, w| w.as_ref().map(|w| node_map(i, w)),
                |i, w| w.as_ref().map(|w| edge_map(i, w)),
            ),
            node_count: self.node_count,
            edge_count: self.edge_count,
            free_node: self.free_node,
            free_edge: self.free_edge,
        }
    }

    /// Builds a graph from the nodes and edges for which the mapping closures
    /// return `Some`, preserving the indices of everything kept.
    ///
    /// An edge is dropped along with either endpoint. Dropped elements
    /// become vacant slots.
    pub fn filter_map<'a, F, G, N2, E2>(
        &'a self,
        mut node_map: F,
        mut edge_map: G,
    ) -> StableGraph<N2, E2, Ty, Ix>
    where
        F: FnMut(NodeIndex<Ix>, &'a N) -> Option<N2>,
        G: FnMut(EdgeIndex<Ix>, &'a E) -> Option<E2>,
    {
        let mut result = StableGraph::with_capacity(self.node_bound(), self.edge_bound());
        let mut free_node = NodeIndex::end();
        let mut free_edge = EdgeIndex::end();

        for (i, node) in self.g.nodes.iter().enumerate() {
            let mapped = node
                .weight
                .as_ref()
                .and_then(|w| node_map(NodeIndex::new(i), w));
            match mapped {
                Some(weight) => {
                    result.g.nodes.push(Node {
                        weight: Some(weight),
                        next: [EdgeIndex::end(), EdgeIndex::end()],
                    });
                    result.node_count += 1;
                }
                None => result.add_vacant_node(&mut free_node),
            }
        }
        for (i, edge) in self.g.edges.iter().enumerate() {
            let [source, target] = edge.node;
            let mapped = edge
                .weight
                .as_ref()
                .filter(|_| result.contains_node(source) && result.contains_node(target))
                .and_then(|w| edge_map(EdgeIndex::new(i), w));
            match mapped {
                Some(weight) => {
                    let ix = EdgeIndex::new(result.g.edges.len());
                    result.g.edges.push(Edge {
                        weight: Some(weight),
                        node: [source, target],
                        next: [EdgeIndex::end(), EdgeIndex::end()],
                    });
                    result.g.link_edge(ix);
                    result.edge_count += 1;
                }
                None => result.add_vacant_edge(&mut free_edge),
            }
        }
        result.free_node = free_node;
        result.free_edge = free_edge;
        result.check_free_lists();
        result
    }

    /// Verifies the free lists against the live counts (debug builds only).
    fn check_free_lists(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let mut free_node_len = 0;
        let mut prev = NodeIndex::end();
        let mut cursor = self.free_node;
        while let Some(node) = self.g.nodes.get(cursor.index()) {
            debug_assert!(node.weight.is_none());
            debug_assert_eq!(node.next[1].into_node(), prev);
            free_node_len += 1;
            prev = cursor;
            cursor = node.next[0].into_node();
        }
        debug_assert_eq!(self.node_count + free_node_len, self.node_bound());

        let mut free_edge_len = 0;
        let mut cursor = self.free_edge;
        while let Some(edge) = self.g.edges.get(cursor.index()) {
            debug_assert!(edge.weight.is_none());
            free_edge_len += 1;
            cursor = edge.next[0];
        }
        debug_assert_eq!(self.edge_count + free_edge_len, self.edge_bound());
    }

    /// Reinterprets the graph with another edge type.
    pub fn into_edge_type<NewTy: EdgeType>(self) -> StableGraph<N, E, NewTy, Ix> {
        StableGraph {
            g: self.g.into_edge_type(),
            node_count: self.node_count,
            edge_count: self.edge_count,
            free_node: self.free_node,
            free_edge: self.free_edge,
        }
    }

    /// Occupies slot `node_ix` with a default weight unless it is live,
    /// appending vacant slots as needed.
    fn ensure_node_exists(&mut self, node_ix: NodeIndex<Ix>)
    where
        N: Default,
    {
        if self.contains_node(node_ix) {
            return;
        }
        let mut free_node = self.free_node;
        while node_ix.index() >= self.g.nodes.len() {
            if index_exhausted::<Ix>(self.g.nodes.len()) {
                panic!(
                    "StableGraph::extend_with_edges: {}",
                    Error::NodeIndexOverflow(index_capacity::<Ix>())
                );
            }
            self.add_vacant_node(&mut free_node);
        }
        self.free_node = free_node;
        self.occupy_vacant_node(node_ix, N::default());
    }

    /// Builds a graph from edges, creating default-weighted nodes for every
    /// referenced index. Unreferenced indices below the largest one stay
    /// vacant.
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

    /// Adds edges, occupying every referenced node slot with a default weight
    /// if it is not live.
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
        for elt in iterable {
            let (source, target, weight) = elt.into_weighted_edge();
            let (source, target): (NodeIndex<Ix>, NodeIndex<Ix>) = (source.into(), target.into());
            self.ensure_node_exists(source);
            self.ensure_node_exists(target);
            self.add_edge(source, target, weight);
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Default for StableGraph<N, E, Ty, Ix> {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<N: Clone, E: Clone, Ty, Ix: IndexType> Clone for StableGraph<N, E, Ty, Ix> {
    fn clone(&self) -> Self {
        StableGraph {
            g: self.g.clone(),
            node_count: self.node_count,
            edge_count: self.edge_count,
            free_node: self.free_node,
            free_edge: self.free_edge,
        }
    }
}

impl<N, E, Ty, Ix> fmt::Debug for StableGraph<N, E, Ty, Ix>
where
    N: fmt::Debug,
    E: fmt::Debug,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<_> = self
            .node_references()
            .map(|(ix, w)| (ix.index(), w))
            .collect();
        let edges: Vec<_> = self
            .edge_references()
            .map(|e| (e.id().index(), e.source().index(), e.target().index(), e.weight()))
            .collect();
        let mut s = f.debug_struct("StableGraph");
        s.field(
            "Ty",
            &if Ty::is_directed() {
                "Directed"
            } else {
                "Undirected"
            },
        )
        .field("node_count", &self.node_count)
        .field("edge_count", &self.edge_count)
        .field("nodes", &nodes)
        .field("edges", &edges);
        if self.free_node != NodeIndex::end() {
            s.field("free_node", &self.free_node);
        }
        if self.free_edge != EdgeIndex::end() {
            s.field("free_edge", &self.free_edge);
        }
        s.finish()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<NodeIndex<Ix>> for StableGraph<N, E, Ty, Ix> {
    type Output = N;

    /// # Panics
    ///
    /// Panics if the node is vacant or out of bounds.
    fn index(&self, index: NodeIndex<Ix>) -> &N {
        match self.node_weight(index) {
            Some(weight) => weight,
            None => panic!("StableGraph: {index:?} is not a live node"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<NodeIndex<Ix>> for StableGraph<N, E, Ty, Ix> {
    fn index_mut(&mut self, index: NodeIndex<Ix>) -> &mut N {
        match self.node_weight_mut(index) {
            Some(weight) => weight,
            None => panic!("StableGraph: {index:?} is not a live node"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<EdgeIndex<Ix>> for StableGraph<N, E, Ty, Ix> {
    type Output = E;

    /// # Panics
    ///
    /// Panics if the edge is vacant or out of bounds.
    fn index(&self, index: EdgeIndex<Ix>) -> &E {
        match self.edge_weight(index) {
            Some(weight) => weight,
            None => panic!("StableGraph: {index:?} is not a live edge"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<EdgeIndex<Ix>> for StableGraph<N, E, Ty, Ix> {
    fn index_mut(&mut self, index: EdgeIndex<Ix>) -> &mut E {
        match self.edge_weight_mut(index) {
            Some(weight) => weight,
            None => panic!("StableGraph: {index:?} is not a live edge"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> From<Graph<N, E, Ty, Ix>> for StableGraph<N, E, Ty, Ix> {
    /// Wraps a graph; every slot is live and indices are unchanged.
    fn from(g: Graph<N, E, Ty, Ix>) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();
        StableGraph {
            g: Graph {
                nodes: g
                    .nodes
                    .into_iter()
                    .map(|node| Node {
                        weight: Some(node.weight),
                        next: node.next,
                    })
                    .collect(),
                edges: g
                    .edges
                    .into_iter()
                    .map(|edge| Edge {
                        weight: Some(edge.weight),
                        node: edge.node,
                        next: edge.next,
                    })
                    .collect(),
                ty: PhantomData,
            },
            node_count,
            edge_count,
            free_node: NodeIndex::end(),
            free_edge: EdgeIndex::end(),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> From<StableGraph<N, E, Ty, Ix>> for Graph<N, E, Ty, Ix> {
    /// Compacts the graph. Live nodes and edges keep their relative order
    /// and are renumbered densely.
    fn from(stable: StableGraph<N, E, Ty, Ix>) -> Self {
        let mut result = Graph::with_capacity(stable.node_count, stable.edge_count);
        let mut node_index_map = vec![NodeIndex::end(); stable.node_bound()];
        for (i, node) in stable.g.nodes.into_iter().enumerate() {
            if let Some(weight) = node.weight {
                node_index_map[i] = result.add_node(weight);
            }
        }
        for edge in stable.g.edges {
            if let Some(weight) = edge.weight {
                let source = node_index_map[edge.node[0].index()];
                let target = node_index_map[edge.node[1].index()];
                result.add_edge(source, target, weight);
            }
        }
        result
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphBase for StableGraph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;
    type EdgeId = EdgeIndex<Ix>;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Data for StableGraph<N, E, Ty, Ix> {
    type NodeWeight = N;
    type EdgeWeight = E;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphProp for StableGraph<N, E, Ty, Ix> {
    type EdgeType = Ty;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeCount for StableGraph<N, E, Ty, Ix> {
    fn node_count(&self) -> usize {
        self.node_count
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> EdgeCount for StableGraph<N, E, Ty, Ix> {
    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeIndexable for StableGraph<N, E, Ty, Ix> {
    fn node_bound(&self) -> usize {
        StableGraph::node_bound(self)
    }

    fn to_index(&self, a: NodeIndex<Ix>) -> usize {
        a.index()
    }

    fn from_index(&self, i: usize) -> NodeIndex<Ix> {
        NodeIndex::new(i)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> EdgeIndexable for StableGraph<N, E, Ty, Ix> {
    fn edge_bound(&self) -> usize {
        StableGraph::edge_bound(self)
    }

    fn to_edge_index(&self, e: EdgeIndex<Ix>) -> usize {
        e.index()
    }

    fn from_edge_index(&self, i: usize) -> EdgeIndex<Ix> {
        EdgeIndex::new(i)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighbors for StableGraph<N, E, Ty, Ix> {
    fn neighbors(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> {
        StableGraph::neighbors(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighborsDirected for StableGraph<N, E, Ty, Ix> {
    fn neighbors_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = NodeIndex<Ix>> {
        StableGraph::neighbors_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeIdentifiers for StableGraph<N, E, Ty, Ix> {
    fn node_identifiers(&self) -> impl Iterator<Item = NodeIndex<Ix>> {
        self.node_indices()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeReferences for StableGraph<N, E, Ty, Ix> {
    fn node_references(&self) -> impl Iterator<Item = (NodeIndex<Ix>, &N)> {
        StableGraph::node_references(self)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgeReferences for StableGraph<N, E, Ty, Ix> {
    fn edge_references(&self) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        StableGraph::edge_references(self)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdges for StableGraph<N, E, Ty, Ix> {
    fn edges(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        StableGraph::edges(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgesDirected for StableGraph<N, E, Ty, Ix> {
    fn edges_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = GraphEdgeReference<'_, E, Ix>> {
        StableGraph::edges_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Visitable for StableGraph<N, E, Ty, Ix> {
    type Map = BitSet;

    fn visit_map(&self) -> BitSet {
        BitSet::new(self.node_bound())
    }

    fn reset_map(&self, map: &mut BitSet) {
        map.clear();
        map.grow(self.node_bound());
    }
}
