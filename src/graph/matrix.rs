//! An adjacency-matrix graph.
//!
//! Edge slots are `Option<E>` cells of a linearized matrix:
//!
//! - directed graphs use a flat row-major square, cell `(a, b)` at
//!   `a * capacity + b`;
//! - undirected graphs use a packed lower triangle, cell `(a, b)` with
//!   `a >= b` at `a * (a + 1) / 2 + b`.
//!
//! Capacity grows to the next power of two (at least 4) above the largest
//! node id. The square is re-laid-out row by row on growth; the triangle only
//! needs to be extended, since its existing cells never move.

use std::{
    cmp,
    collections::BTreeSet,
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use tracing::trace;

use crate::{
    graph::{
        index_capacity, index_exhausted, DefaultIx, Directed, Direction, EdgeType, IndexType,
        IntoWeightedEdge, NodeIndex, Undirected,
    },
    utils::BitSet,
    visit::{
        Data, EdgeCount, EdgeReference, GraphBase, GraphProp, IntoEdgeReferences, IntoEdges,
        IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        IntoNodeReferences, NodeCount, NodeIndexable, Visitable,
    },
    Error, Result,
};

const MIN_CAPACITY: usize = 4;

/// Node weights addressed by small ids; freed ids are handed out again,
/// lowest first.
#[derive(Clone, Debug)]
struct IdStorage<T> {
    elements: Vec<Option<T>>,
    upper_bound: usize,
    removed_ids: BTreeSet<usize>,
    len: usize,
}

impl<T> IdStorage<T> {
    fn with_capacity(capacity: usize) -> Self {
        IdStorage {
            elements: Vec::with_capacity(capacity),
            upper_bound: 0,
            removed_ids: BTreeSet::new(),
            len: 0,
        }
    }

    fn next_id(&self) -> usize {
        self.removed_ids.first().copied().unwrap_or(self.upper_bound)
    }

    fn add(&mut self, element: T) -> usize {
        let id = match self.removed_ids.pop_first() {
            Some(id) => id,
            None => {
                let id = self.upper_bound;
                self.upper_bound += 1;
                self.elements.resize_with(self.upper_bound, || None);
                id
            }
        };
        self.elements[id] = Some(element);
        self.len += 1;
        id
    }

    /// Stores `element` under the vacant id `id`, opening any ids skipped
    /// on the way as vacant.
    fn insert_at(&mut self, id: usize, element: T) {
        if id >= self.upper_bound {
            self.removed_ids.extend(self.upper_bound..id);
            self.upper_bound = id + 1;
            self.elements.resize_with(self.upper_bound, || None);
        } else {
            self.removed_ids.remove(&id);
        }
        debug_assert!(self.elements[id].is_none());
        self.elements[id] = Some(element);
        self.len += 1;
    }

    fn remove(&mut self, id: usize) -> Option<T> {
        let element = self.elements.get_mut(id)?.take()?;
        self.removed_ids.insert(id);
        self.len -= 1;
        Some(element)
    }

    fn get(&self, id: usize) -> Option<&T> {
        self.elements.get(id)?.as_ref()
    }

    fn get_mut(&mut self, id: usize) -> Option<&mut T> {
        self.elements.get_mut(id)?.as_mut()
    }

    fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(id, element)| element.as_ref().map(|e| (id, e)))
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.upper_bound = 0;
        self.removed_ids.clear();
        self.len = 0;
    }
}

#[inline]
fn to_flat_square_matrix_position(row: usize, column: usize, width: usize) -> usize {
    row * width + column
}

#[inline]
fn to_lower_triangular_matrix_position(row: usize, column: usize) -> usize {
    let (row, column) = if row > column {
        (row, column)
    } else {
        (column, row)
    };
    (row * (row + 1)) / 2 + column
}

/// An adjacency-matrix graph with at most one edge per node pair.
///
/// Edge lookup, insertion and removal are O(1); neighbor iteration scans a
/// full row, O(capacity), and reports neighbors in ascending id order.
/// Memory is O(capacity²) (halved for undirected graphs).
///
/// # Examples
///
/// ```rust
/// use lindgraph::DiMatrix;
///
/// let mut m = DiMatrix::<&str, u32>::new();
/// let a = m.add_node("a");
/// let b = m.add_node("b");
/// m.add_edge(a, b, 5);
///
/// assert!(m.has_edge(a, b));
/// assert!(!m.has_edge(b, a));
/// assert_eq!(m.edge_weight(a, b), Some(&5));
/// assert_eq!(m.update_edge(a, b, 6), Some(5));
/// ```
pub struct MatrixGraph<N, E, Ty = Directed, Ix = DefaultIx> {
    node_adjacencies: Vec<Option<E>>,
    node_capacity: usize,
    nodes: IdStorage<N>,
    nb_edges: usize,
    ty: PhantomData<Ty>,
    ix: PhantomData<Ix>,
}

/// A [`MatrixGraph`] with directed edges.
pub type DiMatrix<N, E, Ix = DefaultIx> = MatrixGraph<N, E, Directed, Ix>;

/// A [`MatrixGraph`] with undirected edges.
pub type UnMatrix<N, E, Ix = DefaultIx> = MatrixGraph<N, E, Undirected, Ix>;

impl<N, E> MatrixGraph<N, E, Directed> {
    /// Creates an empty directed matrix graph.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<N, E> MatrixGraph<N, E, Undirected> {
    /// Creates an empty undirected matrix graph.
    #[must_use]
    pub fn new_undirected() -> Self {
        Self::with_capacity(0)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> MatrixGraph<N, E, Ty, Ix> {
    /// Creates an empty graph whose matrix already covers `node_capacity`
    /// nodes.
    #[must_use]
    pub fn with_capacity(node_capacity: usize) -> Self {
        let mut graph = MatrixGraph {
            node_adjacencies: Vec::new(),
            node_capacity: 0,
            nodes: IdStorage::with_capacity(node_capacity),
            nb_edges: 0,
            ty: PhantomData,
            ix: PhantomData,
        };
        if node_capacity > 0 {
            graph.extend_capacity_for_node(node_capacity - 1, true);
        }
        graph
    }

    /// Returns the number of nodes the matrix currently covers.
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nb_edges
    }

    /// Returns `true` if the graph is directed.
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Removes all nodes and edges, keeping the allocated matrix.
    pub fn clear(&mut self) {
        for edge in &mut self.node_adjacencies {
            *edge = None;
        }
        self.nodes.clear();
        self.nb_edges = 0;
    }

    #[inline]
    fn to_edge_position(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<usize> {
        if cmp::max(a.index(), b.index()) >= self.node_capacity {
            return None;
        }
        Some(if Ty::is_directed() {
            to_flat_square_matrix_position(a.index(), b.index(), self.node_capacity)
        } else {
            to_lower_triangular_matrix_position(a.index(), b.index())
        })
    }

    fn extend_capacity_for_node(&mut self, min_node: usize, exact: bool) {
        let requested = min_node + 1;
        let old_capacity = self.node_capacity;
        if old_capacity >= requested {
            return;
        }
        let new_capacity = if exact {
            requested
        } else {
            cmp::max(requested.next_power_of_two(), MIN_CAPACITY)
        };

        if Ty::is_directed() {
            self.node_adjacencies
                .resize_with(new_capacity * new_capacity, || None);
            // move rows last to first; each row only moves towards the end
            for row in (1..old_capacity).rev() {
                let pos = row * old_capacity;
                let new_pos = row * new_capacity;
                for i in (0..old_capacity).rev() {
                    self.node_adjacencies.swap(pos + i, new_pos + i);
                }
            }
        } else {
            let max_node = new_capacity - 1;
            let max_pos = to_lower_triangular_matrix_position(max_node, max_node);
            self.node_adjacencies.resize_with(max_pos + 1, || None);
        }
        self.node_capacity = new_capacity;
        trace!(
            from = old_capacity,
            to = new_capacity,
            directed = Ty::is_directed(),
            "grew adjacency matrix"
        );
    }

    /// Adds a node and returns its id, reusing the lowest removed id.
    ///
    /// # Panics
    ///
    /// Panics if `Ix` cannot address another node.
    pub fn add_node(&mut self, weight: N) -> NodeIndex<Ix> {
        let next = self.nodes.next_id();
        if index_exhausted::<Ix>(next) {
            panic!(
                "MatrixGraph::add_node: {}",
                Error::NodeIndexOverflow(index_capacity::<Ix>())
            );
        }
        let id = self.nodes.add(weight);
        self.extend_capacity_for_node(id, false);
        NodeIndex::new(id)
    }

    /// Removes node `a` and its edges, returning its weight, or `None` if
    /// `a` is not a node.
    pub fn remove_node(&mut self, a: NodeIndex<Ix>) -> Option<N> {
        self.nodes.get(a.index())?;
        for id in 0..self.nodes.upper_bound {
            let other = NodeIndex::new(id);
            self.remove_edge(a, other);
            if Ty::is_directed() {
                self.remove_edge(other, a);
            }
        }
        self.nodes.remove(a.index())
    }

    fn check_endpoint(&self, a: NodeIndex<Ix>) -> Result<()> {
        if a.index() >= self.nodes.upper_bound {
            Err(Error::NodeOutOfBounds(a.index()))
        } else if self.nodes.get(a.index()).is_none() {
            Err(Error::VacantNode(a.index()))
        } else {
            Ok(())
        }
    }

    /// Adds an edge from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEdge`] if the pair is already connected, and
    /// [`Error::NodeOutOfBounds`] / [`Error::VacantNode`] if an endpoint is not
    /// a node.
    pub fn try_add_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> Result<()> {
        self.check_endpoint(a)?;
        self.check_endpoint(b)?;
        let Some(pos) = self.to_edge_position(a, b) else {
            return Err(Error::NodeOutOfBounds(cmp::max(a.index(), b.index())));
        };
        let slot = &mut self.node_adjacencies[pos];
        if slot.is_some() {
            return Err(Error::DuplicateEdge(a.index(), b.index()));
        }
        *slot = Some(weight);
        self.nb_edges += 1;
        Ok(())
    }

    /// Adds an edge from `a` to `b`.
    ///
    /// # Panics
    ///
    /// Panics if the edge already exists or an endpoint is not a node; see
    /// [`MatrixGraph::try_add_edge`].
    pub fn add_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) {
        if let Err(err) = self.try_add_edge(a, b, weight) {
            panic!("MatrixGraph::add_edge: {err}");
        }
    }

    /// Sets the weight of the edge from `a` to `b`, adding it if absent.
    /// Returns the previous weight.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not a node.
    pub fn update_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>, weight: E) -> Option<E> {
        if let Err(err) = self.check_endpoint(a).and(self.check_endpoint(b)) {
            panic!("MatrixGraph::update_edge: {err}");
        }
        let pos = self.to_edge_position(a, b)?;
        let old = self.node_adjacencies[pos].replace(weight);
        if old.is_none() {
            self.nb_edges += 1;
        }
        old
    }

    /// Removes the edge from `a` to `b` and returns its weight.
    pub fn remove_edge(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<E> {
        let pos = self.to_edge_position(a, b)?;
        let old = self.node_adjacencies[pos].take();
        if old.is_some() {
            self.nb_edges -= 1;
        }
        old
    }

    /// Returns `true` if there is an edge from `a` to `b`.
    pub fn has_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Returns the weight of node `a`.
    pub fn node_weight(&self, a: NodeIndex<Ix>) -> Option<&N> {
        self.nodes.get(a.index())
    }

    /// Returns the weight of node `a` mutably.
    pub fn node_weight_mut(&mut self, a: NodeIndex<Ix>) -> Option<&mut N> {
        self.nodes.get_mut(a.index())
    }

    /// Returns the weight of the edge from `a` to `b`.
    pub fn edge_weight(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<&E> {
        let pos = self.to_edge_position(a, b)?;
        self.node_adjacencies[pos].as_ref()
    }

    /// Returns the weight of the edge from `a` to `b` mutably.
    pub fn edge_weight_mut(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Option<&mut E> {
        let pos = self.to_edge_position(a, b)?;
        self.node_adjacencies[pos].as_mut()
    }

    /// Returns every node id in ascending order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.nodes.iter().map(|(id, _)| NodeIndex::new(id))
    }

    /// Returns the cells of `a`'s row (`Outgoing`) or column (`Incoming`)
    /// that hold an edge, as `(neighbor, weight)`.
    fn adjacent(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = (NodeIndex<Ix>, &E)> {
        (0..self.node_capacity).filter_map(move |j| {
            let other = NodeIndex::new(j);
            let pos = match dir {
                Direction::Outgoing => self.to_edge_position(a, other),
                Direction::Incoming => self.to_edge_position(other, a),
            }?;
            self.node_adjacencies[pos].as_ref().map(|w| (other, w))
        })
    }

    /// Returns the neighbors of `a` in ascending id order: targets of
    /// outgoing edges if directed, every adjacent node otherwise.
    pub fn neighbors(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.neighbors_directed(a, Direction::Outgoing)
    }

    /// Returns the neighbors of `a` along edges in direction `dir`.
    pub fn neighbors_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.adjacent(a, dir).map(|(n, _)| n)
    }

    /// Returns the edges of `a`, each presented as `a -> neighbor`.
    pub fn edges(
        &self,
        a: NodeIndex<Ix>,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        self.edges_directed(a, Direction::Outgoing)
    }

    /// Returns the edges of `a` in direction `dir`; incoming edges are
    /// presented as `neighbor -> a`.
    pub fn edges_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        self.adjacent(a, dir).map(move |(n, w)| {
            let (source, target) = match dir {
                Direction::Outgoing => (a, n),
                Direction::Incoming => (n, a),
            };
            EdgeReference::new((source, target), source, target, w)
        })
    }

    /// Returns every edge, row by row. Undirected edges are reported once,
    /// with the larger id as the source.
    pub fn edge_references(
        &self,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        (0..self.node_capacity).flat_map(move |row| {
            let columns = if Ty::is_directed() {
                self.node_capacity
            } else {
                row + 1
            };
            (0..columns).filter_map(move |column| {
                let (a, b) = (NodeIndex::new(row), NodeIndex::new(column));
                let pos = self.to_edge_position(a, b)?;
                self.node_adjacencies[pos]
                    .as_ref()
                    .map(|w| EdgeReference::new((a, b), a, b, w))
            })
        })
    }

    /// Makes `a` a node with a default weight unless it is one.
    fn ensure_node_exists(&mut self, a: NodeIndex<Ix>)
    where
        N: Default,
    {
        if self.nodes.get(a.index()).is_some() {
            return;
        }
        if index_exhausted::<Ix>(a.index()) {
            panic!(
                "MatrixGraph::extend_with_edges: {}",
                Error::NodeIndexOverflow(index_capacity::<Ix>())
            );
        }
        self.nodes.insert_at(a.index(), N::default());
        self.extend_capacity_for_node(a.index(), false);
    }

    /// Builds a graph from edges, creating default-weighted nodes for every
    /// referenced id. A repeated pair overwrites the earlier weight.
    pub fn from_edges<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<E>,
        <I::Item as IntoWeightedEdge<E>>::NodeId: Into<NodeIndex<Ix>>,
        N: Default,
    {
        let mut g = Self::with_capacity(0);
        g.extend_with_edges(iterable);
        g
    }

    /// Adds or updates edges, creating default-weighted nodes for every
    /// referenced id that is not a node.
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
            self.update_edge(source, target, weight);
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Default for MatrixGraph<N, E, Ty, Ix> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<N: Clone, E: Clone, Ty, Ix> Clone for MatrixGraph<N, E, Ty, Ix> {
    fn clone(&self) -> Self {
        MatrixGraph {
            node_adjacencies: self.node_adjacencies.clone(),
            node_capacity: self.node_capacity,
            nodes: self.nodes.clone(),
            nb_edges: self.nb_edges,
            ty: PhantomData,
            ix: PhantomData,
        }
    }
}

impl<N: fmt::Debug, E: fmt::Debug, Ty: EdgeType, Ix: IndexType> fmt::Debug
    for MatrixGraph<N, E, Ty, Ix>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<_> = self
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), e.weight()))
            .collect();
        f.debug_struct("MatrixGraph")
            .field("directed", &Ty::is_directed())
            .field("node_capacity", &self.node_capacity)
            .field("nodes", &self.nodes.iter().collect::<Vec<_>>())
            .field("edges", &edges)
            .finish()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<NodeIndex<Ix>> for MatrixGraph<N, E, Ty, Ix> {
    type Output = N;

    /// # Panics
    ///
    /// Panics if `index` is not a node.
    fn index(&self, index: NodeIndex<Ix>) -> &N {
        match self.node_weight(index) {
            Some(weight) => weight,
            None => panic!("MatrixGraph: {index:?} is not a node"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<NodeIndex<Ix>> for MatrixGraph<N, E, Ty, Ix> {
    fn index_mut(&mut self, index: NodeIndex<Ix>) -> &mut N {
        match self.node_weight_mut(index) {
            Some(weight) => weight,
            None => panic!("MatrixGraph: {index:?} is not a node"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Index<(NodeIndex<Ix>, NodeIndex<Ix>)>
    for MatrixGraph<N, E, Ty, Ix>
{
    type Output = E;

    /// # Panics
    ///
    /// Panics if there is no such edge.
    fn index(&self, (a, b): (NodeIndex<Ix>, NodeIndex<Ix>)) -> &E {
        match self.edge_weight(a, b) {
            Some(weight) => weight,
            None => panic!("MatrixGraph: no edge from {a:?} to {b:?}"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IndexMut<(NodeIndex<Ix>, NodeIndex<Ix>)>
    for MatrixGraph<N, E, Ty, Ix>
{
    fn index_mut(&mut self, (a, b): (NodeIndex<Ix>, NodeIndex<Ix>)) -> &mut E {
        match self.edge_weight_mut(a, b) {
            Some(weight) => weight,
            None => panic!("MatrixGraph: no edge from {a:?} to {b:?}"),
        }
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphBase for MatrixGraph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;
    type EdgeId = (NodeIndex<Ix>, NodeIndex<Ix>);
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Data for MatrixGraph<N, E, Ty, Ix> {
    type NodeWeight = N;
    type EdgeWeight = E;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> GraphProp for MatrixGraph<N, E, Ty, Ix> {
    type EdgeType = Ty;
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeCount for MatrixGraph<N, E, Ty, Ix> {
    fn node_count(&self) -> usize {
        self.nodes.len
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> EdgeCount for MatrixGraph<N, E, Ty, Ix> {
    fn edge_count(&self) -> usize {
        self.nb_edges
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> NodeIndexable for MatrixGraph<N, E, Ty, Ix> {
    fn node_bound(&self) -> usize {
        self.nodes.upper_bound
    }

    fn to_index(&self, a: NodeIndex<Ix>) -> usize {
        a.index()
    }

    fn from_index(&self, i: usize) -> NodeIndex<Ix> {
        NodeIndex::new(i)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighbors for MatrixGraph<N, E, Ty, Ix> {
    fn neighbors(&self, a: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> {
        MatrixGraph::neighbors(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNeighborsDirected for MatrixGraph<N, E, Ty, Ix> {
    fn neighbors_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = NodeIndex<Ix>> {
        MatrixGraph::neighbors_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeIdentifiers for MatrixGraph<N, E, Ty, Ix> {
    fn node_identifiers(&self) -> impl Iterator<Item = NodeIndex<Ix>> {
        self.node_indices()
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoNodeReferences for MatrixGraph<N, E, Ty, Ix> {
    fn node_references(&self) -> impl Iterator<Item = (NodeIndex<Ix>, &N)> {
        self.nodes.iter().map(|(id, w)| (NodeIndex::new(id), w))
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgeReferences for MatrixGraph<N, E, Ty, Ix> {
    fn edge_references(
        &self,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        MatrixGraph::edge_references(self)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdges for MatrixGraph<N, E, Ty, Ix> {
    fn edges(
        &self,
        a: NodeIndex<Ix>,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        MatrixGraph::edges(self, a)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> IntoEdgesDirected for MatrixGraph<N, E, Ty, Ix> {
    fn edges_directed(
        &self,
        a: NodeIndex<Ix>,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, NodeIndex<Ix>, (NodeIndex<Ix>, NodeIndex<Ix>), E>>
    {
        MatrixGraph::edges_directed(self, a, dir)
    }
}

impl<N, E, Ty: EdgeType, Ix: IndexType> Visitable for MatrixGraph<N, E, Ty, Ix> {
    type Map = BitSet;

    fn visit_map(&self) -> BitSet {
        BitSet::new(self.nodes.upper_bound)
    }

    fn reset_map(&self, map: &mut BitSet) {
        map.clear();
        map.grow(self.nodes.upper_bound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        assert_eq!(to_flat_square_matrix_position(2, 3, 4), 11);
        assert_eq!(to_lower_triangular_matrix_position(0, 0), 0);
        assert_eq!(to_lower_triangular_matrix_position(2, 1), 4);
        assert_eq!(to_lower_triangular_matrix_position(1, 2), 4);
        assert_eq!(to_lower_triangular_matrix_position(3, 3), 9);
    }

    #[test]
    fn test_growth_is_power_of_two() {
        let mut m = DiMatrix::<u32, ()>::new();
        assert_eq!(m.node_capacity(), 0);
        m.add_node(0);
        assert_eq!(m.node_capacity(), 4);
        for i in 1..5 {
            m.add_node(i);
        }
        assert_eq!(m.node_capacity(), 8);
        assert_eq!(DiMatrix::<(), ()>::with_capacity(5).node_capacity(), 5);
    }

    #[test]
    fn test_directed_relayout_keeps_edges() {
        let mut m = DiMatrix::<u32, u32>::new();
        let nodes: Vec<_> = (0..4).map(|i| m.add_node(i)).collect();
        m.add_edge(nodes[3], nodes[1], 31);
        m.add_edge(nodes[1], nodes[2], 12);
        m.add_edge(nodes[2], nodes[2], 22);
        assert_eq!(m.node_capacity(), 4);

        let extra: Vec<_> = (4..9).map(|i| m.add_node(i)).collect();
        assert_eq!(m.node_capacity(), 16);
        assert_eq!(m.edge_weight(nodes[3], nodes[1]), Some(&31));
        assert_eq!(m.edge_weight(nodes[1], nodes[2]), Some(&12));
        assert_eq!(m.edge_weight(nodes[2], nodes[2]), Some(&22));
        assert_eq!(m.edge_weight(nodes[1], nodes[3]), None);
        assert_eq!(m.edge_count(), 3);
        m.add_edge(extra[4], nodes[0], 80);
        assert_eq!(
            m.neighbors_directed(nodes[0], Direction::Incoming)
                .collect::<Vec<_>>(),
            vec![extra[4]]
        );
    }

    #[test]
    fn test_undirected_edges_are_symmetric() {
        let mut m = UnMatrix::<(), char>::new_undirected();
        let a = m.add_node(());
        let b = m.add_node(());
        let c = m.add_node(());
        m.add_edge(b, a, 'x');
        m.add_edge(c, c, 'y');

        assert!(m.has_edge(a, b));
        assert_eq!(m[(a, b)], 'x');
        assert_eq!(m.neighbors(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(m.neighbors(c).collect::<Vec<_>>(), vec![c]);
        assert_eq!(m.try_add_edge(a, b, 'z'), Err(Error::DuplicateEdge(0, 1)));
        assert_eq!(m.edge_references().count(), 2);
        for _ in 0..10 {
            m.add_node(());
        }
        assert_eq!(m.edge_weight(a, b), Some(&'x'));
    }

    #[test]
    fn test_remove_node_frees_lowest_id_first() {
        let mut m = DiMatrix::<&str, ()>::new();
        let a = m.add_node("a");
        let b = m.add_node("b");
        let c = m.add_node("c");
        m.add_edge(a, b, ());
        m.add_edge(b, b, ());
        m.add_edge(c, b, ());

        assert_eq!(m.remove_node(b), Some("b"));
        assert_eq!(m.edge_count(), 0);
        assert_eq!(m.remove_node(b), None);
        assert_eq!(m.remove_node(a), Some("a"));
        assert_eq!(m.node_count(), 1);

        assert_eq!(m.add_node("x"), a);
        assert_eq!(m.add_node("y"), b);
        assert_eq!(m.add_node("z").index(), 3);
        let w = m.add_node("w");
        assert_eq!(m.neighbors(w).count(), 0);
    }

    #[test]
    fn test_edge_errors() {
        let mut m = DiMatrix::<(), ()>::new();
        let a = m.add_node(());
        let b = m.add_node(());
        m.remove_node(b);
        assert_eq!(m.try_add_edge(a, b, ()), Err(Error::VacantNode(1)));
        assert_eq!(m.try_add_edge(a, NodeIndex::new(7), ()), Err(Error::NodeOutOfBounds(7)));
        assert_eq!(m.remove_edge(a, NodeIndex::new(70)), None);
    }

    #[test]
    fn test_from_edges_and_update() {
        let mut m = DiMatrix::<u8, i32>::from_edges([(0, 5, 1), (5, 2, 2), (0, 5, 3)]);
        assert_eq!(m.node_count(), 3);
        assert_eq!(m.edge_count(), 2);
        assert_eq!(m.edge_weight(NodeIndex::new(0), NodeIndex::new(5)), Some(&3));
        // ids skipped by from_edges are handed out first
        assert_eq!(m.add_node(9), NodeIndex::new(1));
        assert_eq!(m.update_edge(NodeIndex::new(1), NodeIndex::new(2), 4), None);
        assert_eq!(m.edge_count(), 3);
        let out: Vec<_> = m
            .edges(NodeIndex::new(5))
            .map(|e| (e.target().index(), *e.weight()))
            .collect();
        assert_eq!(out, vec![(2, 2)]);
    }

    #[test]
    fn test_clear() {
        let mut m = UnMatrix::<(), ()>::from_edges([(0, 1), (1, 2)]);
        m.clear();
        assert_eq!(m.node_count(), 0);
        assert_eq!(m.edge_count(), 0);
        let a = m.add_node(());
        assert_eq!(a.index(), 0);
        assert_eq!(m.neighbors(a).count(), 0);
    }
}
