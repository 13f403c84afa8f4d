//! A graph keyed by the node values themselves.
//!
//! [`GraphMap`] keeps an insertion-ordered adjacency table and an edge table
//! in [`IndexMap`]s. Nodes are small `Copy` keys (integers, interned ids,
//! `&str`), edges are looked up by their endpoint pair in O(1), and there is
//! at most one edge per pair.

use std::{
    fmt,
    hash::Hash,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use indexmap::IndexMap;

use crate::{
    graph::{
        Directed, Direction, EdgeType, Graph, IndexType, IntoWeightedEdge, NodeIndex, Undirected,
    },
    visit::{
        Data, EdgeCount, EdgeIndexable, EdgeReference, GraphBase, GraphProp, IntoEdgeReferences,
        IntoEdges, IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        IntoNodeReferences, NodeCount, NodeIndexable, Visitable,
    },
};

/// Requirements on a [`GraphMap`] node key.
pub trait NodeTrait: Copy + Ord + Hash {}

impl<N: Copy + Ord + Hash> NodeTrait for N {}

/// Which side of a stored edge an adjacency entry describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompactDirection {
    Outgoing,
    Incoming,
}

impl CompactDirection {
    fn opposite(self) -> CompactDirection {
        match self {
            CompactDirection::Outgoing => CompactDirection::Incoming,
            CompactDirection::Incoming => CompactDirection::Outgoing,
        }
    }
}

impl From<Direction> for CompactDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Outgoing => CompactDirection::Outgoing,
            Direction::Incoming => CompactDirection::Incoming,
        }
    }
}

/// A graph whose node identifiers are the node values.
///
/// - Undirected edges are stored under `(min, max)` so both orientations find
///   the same entry.
/// - A self-loop is a single adjacency entry.
/// - `remove_node` uses swap-removal, so node iteration order is insertion
///   order only until the first removal.
///
/// # Examples
///
/// ```rust
/// use lindgraph::UnGraphMap;
///
/// let mut roads = UnGraphMap::<&str, u32>::new();
/// roads.add_edge("berlin", "hamburg", 289);
/// roads.add_edge("berlin", "dresden", 193);
///
/// assert_eq!(roads.edge_weight("hamburg", "berlin"), Some(&289));
/// assert_eq!(roads.neighbors("berlin").count(), 2);
/// assert_eq!(roads.add_edge("dresden", "berlin", 190), Some(193));
/// ```
pub struct GraphMap<N, E, Ty = Directed> {
    nodes: IndexMap<N, Vec<(N, CompactDirection)>>,
    edges: IndexMap<(N, N), E>,
    ty: PhantomData<Ty>,
}

/// A [`GraphMap`] with directed edges.
pub type DiGraphMap<N, E> = GraphMap<N, E, Directed>;

/// A [`GraphMap`] with undirected edges.
pub type UnGraphMap<N, E> = GraphMap<N, E, Undirected>;

impl<N: NodeTrait, E, Ty: EdgeType> GraphMap<N, E, Ty> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `nodes` nodes and `edges` edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        GraphMap {
            nodes: IndexMap::with_capacity(nodes),
            edges: IndexMap::with_capacity(edges),
            ty: PhantomData,
        }
    }

    /// Returns the allocated `(node, edge)` capacity.
    pub fn capacity(&self) -> (usize, usize) {
        (self.nodes.capacity(), self.edges.capacity())
    }

    #[inline]
    fn edge_key(a: N, b: N) -> (N, N) {
        if Ty::is_directed() || a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Returns `true` if the graph is directed.
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Builds a graph from edges, adding their endpoints as nodes.
    ///
    /// A repeated pair overwrites the earlier weight.
    ///
    /// ```rust
    /// use lindgraph::DiGraphMap;
    ///
    /// let g = DiGraphMap::<_, ()>::from_edges(&[(0, 1), (0, 2), (1, 2), (0, 1)]);
    /// assert_eq!(g.node_count(), 3);
    /// assert_eq!(g.edge_count(), 3);
    /// ```
    pub fn from_edges<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<E, NodeId = N>,
    {
        let mut g = Self::new();
        g.extend(iterable);
        g
    }

    /// Copies a [`Graph`] whose node weights are usable as keys.
    ///
    /// Duplicate node weights collapse into one node, and parallel edges into
    /// one edge carrying the weight of the last.
    pub fn from_graph<Ix: IndexType>(graph: Graph<N, E, Ty, Ix>) -> Self
    where
        E: Clone,
    {
        let mut new_graph = Self::with_capacity(graph.node_count(), graph.edge_count());
        for node in graph.node_weights() {
            new_graph.add_node(*node);
        }
        for edge in graph.edge_references() {
            new_graph.add_edge(graph[edge.source()], graph[edge.target()], edge.weight().clone());
        }
        new_graph
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Adds node `n` if absent and returns it.
    pub fn add_node(&mut self, n: N) -> N {
        self.nodes.entry(n).or_default();
        n
    }

    /// Removes node `n` and its edges. Returns `false` if it was absent.
    pub fn remove_node(&mut self, n: N) -> bool {
        let Some(links) = self.nodes.swap_remove(&n) else {
            return false;
        };
        for (succ, dir) in links {
            let edge = match dir {
                CompactDirection::Outgoing => (n, succ),
                CompactDirection::Incoming => (succ, n),
            };
            self.remove_single_edge(succ, n, dir.opposite());
            self.edges.swap_remove(&Self::edge_key(edge.0, edge.1));
        }
        true
    }

    /// Returns `true` if `n` is a node.
    pub fn contains_node(&self, n: N) -> bool {
        self.nodes.contains_key(&n)
    }

    /// Adds an edge from `a` to `b`, adding missing endpoints.
    ///
    /// Returns the previous weight if the edge already existed; its weight is
    /// replaced and no second edge is created.
    pub fn add_edge(&mut self, a: N, b: N, weight: E) -> Option<E> {
        if let old @ Some(_) = self.edges.insert(Self::edge_key(a, b), weight) {
            return old;
        }
        self.nodes
            .entry(a)
            .or_insert_with(|| Vec::with_capacity(1))
            .push((b, CompactDirection::Outgoing));
        if a != b {
            self.nodes
                .entry(b)
                .or_insert_with(|| Vec::with_capacity(1))
                .push((a, CompactDirection::Incoming));
        }
        None
    }

    /// Removes the adjacency entry for `b` from the list of `a`.
    fn remove_single_edge(&mut self, a: N, b: N, dir: CompactDirection) -> bool {
        let Some(links) = self.nodes.get_mut(&a) else {
            return false;
        };
        let position = if Ty::is_directed() {
            links.iter().position(|&entry| entry == (b, dir))
        } else {
            links.iter().position(|&(n, _)| n == b)
        };
        match position {
            Some(index) => {
                links.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the edge from `a` to `b` and returns its weight.
    pub fn remove_edge(&mut self, a: N, b: N) -> Option<E> {
        let exist1 = self.remove_single_edge(a, b, CompactDirection::Outgoing);
        let exist2 = if a != b {
            self.remove_single_edge(b, a, CompactDirection::Incoming)
        } else {
            exist1
        };
        let weight = self.edges.swap_remove(&Self::edge_key(a, b));
        debug_assert!(exist1 == exist2 && exist1 == weight.is_some());
        weight
    }

    /// Returns `true` if there is an edge from `a` to `b`.
    pub fn contains_edge(&self, a: N, b: N) -> bool {
        self.edges.contains_key(&Self::edge_key(a, b))
    }

    /// Returns every node in table order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = N> + ExactSizeIterator + '_ {
        self.nodes.keys().copied()
    }

    fn adjacency(&self, a: N) -> &[(N, CompactDirection)] {
        match self.nodes.get(&a) {
            Some(links) => links,
            None => &[],
        }
    }

    /// Returns the neighbors of `a`: targets of outgoing edges if directed,
    /// every adjacent node otherwise. Empty if `a` is absent.
    pub fn neighbors(&self, a: N) -> impl Iterator<Item = N> + '_ {
        self.adjacency(a).iter().filter_map(|&(n, dir)| {
            (!Ty::is_directed() || dir == CompactDirection::Outgoing).then_some(n)
        })
    }

    /// Returns the neighbors of `a` along edges in direction `dir`.
    ///
    /// A directed self-loop counts in both directions. Undirected graphs
    /// ignore `dir`.
    pub fn neighbors_directed(&self, a: N, dir: Direction) -> impl Iterator<Item = N> + '_ {
        let dir = CompactDirection::from(dir);
        self.adjacency(a).iter().filter_map(move |&(n, d)| {
            (!Ty::is_directed() || d == dir || n == a).then_some(n)
        })
    }

    /// Returns the edges from `a`, each presented as `a -> neighbor`.
    pub fn edges(&self, a: N) -> impl Iterator<Item = EdgeReference<'_, N, (N, N), E>> {
        self.neighbors(a).filter_map(move |b| self.edge_ref(a, b))
    }

    /// Returns the edges of `a` in direction `dir`.
    ///
    /// Outgoing edges are presented as `a -> neighbor`, incoming ones as
    /// `neighbor -> a`, for both edge types.
    pub fn edges_directed(
        &self,
        a: N,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, N, (N, N), E>> {
        self.neighbors_directed(a, dir).filter_map(move |n| match dir {
            Direction::Outgoing => self.edge_ref(a, n),
            Direction::Incoming => self.edge_ref(n, a),
        })
    }

    fn edge_ref(&self, a: N, b: N) -> Option<EdgeReference<'_, N, (N, N), E>> {
        let key = Self::edge_key(a, b);
        self.edges
            .get(&key)
            .map(|weight| EdgeReference::new(key, a, b, weight))
    }

    /// Returns the weight of the edge from `a` to `b`.
    pub fn edge_weight(&self, a: N, b: N) -> Option<&E> {
        self.edges.get(&Self::edge_key(a, b))
    }

    /// Returns the weight of the edge from `a` to `b` mutably.
    pub fn edge_weight_mut(&mut self, a: N, b: N) -> Option<&mut E> {
        self.edges.get_mut(&Self::edge_key(a, b))
    }

    /// Returns every edge as `(source, target, weight)` in table order.
    ///
    /// Undirected edges are reported in their stored `(min, max)` orientation.
    pub fn all_edges(&self) -> impl DoubleEndedIterator<Item = (N, N, &E)> + ExactSizeIterator {
        self.edges.iter().map(|(&(a, b), w)| (a, b, w))
    }

    /// Returns every edge mutably, as [`GraphMap::all_edges`].
    pub fn all_edges_mut(&mut self) -> impl Iterator<Item = (N, N, &mut E)> {
        self.edges.iter_mut().map(|(&(a, b), w)| (a, b, w))
    }

    /// Converts into a [`Graph`], numbering nodes in table order.
    ///
    /// # Panics
    ///
    /// Panics if `Ix` cannot address every node and edge.
    pub fn into_graph<Ix: IndexType>(self) -> Graph<N, E, Ty, Ix> {
        let GraphMap { nodes, edges, .. } = self;
        let mut graph = Graph::with_capacity(nodes.len(), edges.len());
        for &node in nodes.keys() {
            graph.add_node(node);
        }
        for ((a, b), weight) in edges {
            match (nodes.get_index_of(&a), nodes.get_index_of(&b)) {
                (Some(ai), Some(bi)) => {
                    graph.add_edge(NodeIndex::new(ai), NodeIndex::new(bi), weight);
                }
                _ => unreachable!("edge endpoint missing from the node table"),
            }
        }
        graph
    }
}

impl<N: NodeTrait, E, Ty: EdgeType, Item> Extend<Item> for GraphMap<N, E, Ty>
where
    Item: IntoWeightedEdge<E, NodeId = N>,
{
    /// Adds the edges and their endpoints.
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iterable: I) {
        let iter = iterable.into_iter();
        let (low, _) = iter.size_hint();
        self.edges.reserve(low);
        for elt in iter {
            let (source, target, weight) = elt.into_weighted_edge();
            self.add_edge(source, target, weight);
        }
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> Default for GraphMap<N, E, Ty> {
    fn default() -> Self {
        GraphMap::with_capacity(0, 0)
    }
}

impl<N: Clone, E: Clone, Ty> Clone for GraphMap<N, E, Ty> {
    fn clone(&self) -> Self {
        GraphMap {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            ty: PhantomData,
        }
    }
}

impl<N: NodeTrait + fmt::Debug, E: fmt::Debug, Ty: EdgeType> fmt::Debug for GraphMap<N, E, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphMap")
            .field("directed", &Ty::is_directed())
            .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .finish()
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> Index<(N, N)> for GraphMap<N, E, Ty> {
    type Output = E;

    /// # Panics
    ///
    /// Panics if there is no such edge.
    fn index(&self, index: (N, N)) -> &E {
        match self.edges.get(&Self::edge_key(index.0, index.1)) {
            Some(weight) => weight,
            None => panic!("GraphMap: no such edge"),
        }
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IndexMut<(N, N)> for GraphMap<N, E, Ty> {
    fn index_mut(&mut self, index: (N, N)) -> &mut E {
        match self.edges.get_mut(&Self::edge_key(index.0, index.1)) {
            Some(weight) => weight,
            None => panic!("GraphMap: no such edge"),
        }
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> GraphBase for GraphMap<N, E, Ty> {
    type NodeId = N;
    type EdgeId = (N, N);
}

impl<N: NodeTrait, E, Ty: EdgeType> Data for GraphMap<N, E, Ty> {
    type NodeWeight = N;
    type EdgeWeight = E;
}

impl<N: NodeTrait, E, Ty: EdgeType> GraphProp for GraphMap<N, E, Ty> {
    type EdgeType = Ty;
}

impl<N: NodeTrait, E, Ty: EdgeType> NodeCount for GraphMap<N, E, Ty> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> EdgeCount for GraphMap<N, E, Ty> {
    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> NodeIndexable for GraphMap<N, E, Ty> {
    fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// # Panics
    ///
    /// Panics if `a` is not a node.
    fn to_index(&self, a: N) -> usize {
        match self.nodes.get_index_of(&a) {
            Some(i) => i,
            None => panic!("GraphMap::to_index: not a node"),
        }
    }

    /// # Panics
    ///
    /// Panics if `i >= node_bound()`.
    fn from_index(&self, i: usize) -> N {
        match self.nodes.get_index(i) {
            Some((&n, _)) => n,
            None => panic!("GraphMap::from_index: {i} is out of bounds"),
        }
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> EdgeIndexable for GraphMap<N, E, Ty> {
    fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn to_edge_index(&self, e: (N, N)) -> usize {
        match self.edges.get_index_of(&Self::edge_key(e.0, e.1)) {
            Some(i) => i,
            None => panic!("GraphMap::to_edge_index: not an edge"),
        }
    }

    fn from_edge_index(&self, i: usize) -> (N, N) {
        match self.edges.get_index(i) {
            Some((&key, _)) => key,
            None => panic!("GraphMap::from_edge_index: {i} is out of bounds"),
        }
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoNeighbors for GraphMap<N, E, Ty> {
    fn neighbors(&self, a: N) -> impl Iterator<Item = N> {
        GraphMap::neighbors(self, a)
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoNeighborsDirected for GraphMap<N, E, Ty> {
    fn neighbors_directed(&self, a: N, dir: Direction) -> impl Iterator<Item = N> {
        GraphMap::neighbors_directed(self, a, dir)
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoNodeIdentifiers for GraphMap<N, E, Ty> {
    fn node_identifiers(&self) -> impl Iterator<Item = N> {
        self.nodes()
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoNodeReferences for GraphMap<N, E, Ty> {
    fn node_references(&self) -> impl Iterator<Item = (N, &N)> {
        self.nodes.keys().map(|n| (*n, n))
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoEdgeReferences for GraphMap<N, E, Ty> {
    fn edge_references(&self) -> impl Iterator<Item = EdgeReference<'_, N, (N, N), E>> {
        self.edges
            .iter()
            .map(|(&(a, b), w)| EdgeReference::new((a, b), a, b, w))
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoEdges for GraphMap<N, E, Ty> {
    fn edges(&self, a: N) -> impl Iterator<Item = EdgeReference<'_, N, (N, N), E>> {
        GraphMap::edges(self, a)
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> IntoEdgesDirected for GraphMap<N, E, Ty> {
    fn edges_directed(
        &self,
        a: N,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, N, (N, N), E>> {
        GraphMap::edges_directed(self, a, dir)
    }
}

impl<N: NodeTrait, E, Ty: EdgeType> Visitable for GraphMap<N, E, Ty> {
    type Map = std::collections::HashSet<N>;

    fn visit_map(&self) -> Self::Map {
        std::collections::HashSet::with_capacity(self.node_count())
    }

    fn reset_map(&self, map: &mut Self::Map) {
        map.clear();
    }
}
