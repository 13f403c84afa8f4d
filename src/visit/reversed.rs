use crate::{
    graph::Direction,
    visit::{
        Data, EdgeCount, EdgeIndexable, EdgeRefOf, GraphBase, GraphProp, IntoEdgeReferences,
        IntoEdges, IntoEdgesDirected, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        IntoNodeReferences, NodeCount, NodeIndexable, Visitable,
    },
};

/// A view of a graph with every edge reversed.
///
/// `Reversed(&g).neighbors(n)` equals `g.neighbors_directed(n, Incoming)`,
/// and edge references come out with source and target exchanged. Wrap a
/// reference to avoid moving the graph.
///
/// # Examples
///
/// ```rust
/// use lindgraph::visit::{IntoNeighbors, Reversed};
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), ()>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// g.add_edge(a, b, ());
///
/// let rev = Reversed(&g);
/// assert_eq!(rev.neighbors(b).collect::<Vec<_>>(), vec![a]);
/// assert_eq!(rev.neighbors(a).count(), 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Reversed<G>(pub G);

impl<G: GraphBase> GraphBase for Reversed<G> {
    type NodeId = G::NodeId;
    type EdgeId = G::EdgeId;
}

impl<G: Data> Data for Reversed<G> {
    type NodeWeight = G::NodeWeight;
    type EdgeWeight = G::EdgeWeight;
}

impl<G: GraphProp> GraphProp for Reversed<G> {
    type EdgeType = G::EdgeType;
}

impl<G: NodeCount> NodeCount for Reversed<G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }
}

impl<G: EdgeCount> EdgeCount for Reversed<G> {
    fn edge_count(&self) -> usize {
        self.0.edge_count()
    }
}

impl<G: NodeIndexable> NodeIndexable for Reversed<G> {
    fn node_bound(&self) -> usize {
        self.0.node_bound()
    }

    fn to_index(&self, a: Self::NodeId) -> usize {
        self.0.to_index(a)
    }

    fn from_index(&self, i: usize) -> Self::NodeId {
        self.0.from_index(i)
    }
}

impl<G: EdgeIndexable> EdgeIndexable for Reversed<G> {
    fn edge_bound(&self) -> usize {
        self.0.edge_bound()
    }

    fn to_edge_index(&self, e: Self::EdgeId) -> usize {
        self.0.to_edge_index(e)
    }

    fn from_edge_index(&self, i: usize) -> Self::EdgeId {
        self.0.from_edge_index(i)
    }
}

impl<G: IntoNeighborsDirected> IntoNeighbors for Reversed<G> {
    fn neighbors(&self, a: Self::NodeId) -> impl Iterator<Item = Self::NodeId> {
        self.0.neighbors_directed(a, Direction::Incoming)
    }
}

impl<G: IntoNeighborsDirected> IntoNeighborsDirected for Reversed<G> {
    fn neighbors_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = Self::NodeId> {
        self.0.neighbors_directed(a, dir.opposite())
    }
}

impl<G: IntoNodeIdentifiers> IntoNodeIdentifiers for Reversed<G> {
    fn node_identifiers(&self) -> impl Iterator<Item = Self::NodeId> {
        self.0.node_identifiers()
    }
}

impl<G: IntoNodeReferences> IntoNodeReferences for Reversed<G> {
    fn node_references(&self) -> impl Iterator<Item = (Self::NodeId, &Self::NodeWeight)> {
        self.0.node_references()
    }
}

impl<G: IntoEdgeReferences> IntoEdgeReferences for Reversed<G> {
    fn edge_references(&self) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        self.0.edge_references().map(|edge| edge.reversed())
    }
}

impl<G: IntoEdgesDirected> IntoEdges for Reversed<G> {
    fn edges(&self, a: Self::NodeId) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        self.0
            .edges_directed(a, Direction::Incoming)
            .map(|edge| edge.reversed())
    }
}

impl<G: IntoEdgesDirected> IntoEdgesDirected for Reversed<G> {
    fn edges_directed(
        &self,
        a: Self::NodeId,
        dir: Direction,
    ) -> impl Iterator<Item = EdgeRefOf<'_, Self>> {
        self.0
            .edges_directed(a, dir.opposite())
            .map(|edge| edge.reversed())
    }
}

impl<G: Visitable> Visitable for Reversed<G> {
    type Map = G::Map;

    fn visit_map(&self) -> Self::Map {
        self.0.visit_map()
    }

    fn reset_map(&self, map: &mut Self::Map) {
        self.0.reset_map(map);
    }
}
