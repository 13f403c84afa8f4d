//! Lazy iterators over the intrusive adjacency lists of [`Graph`].

use std::{iter::Enumerate, marker::PhantomData, slice};

use crate::{
    graph::{Direction, Edge, EdgeIndex, EdgeType, Graph, IndexType, Node, NodeIndex},
    visit::EdgeReference,
};

/// An edge of a [`Graph`] as yielded by its edge iterators.
pub type GraphEdgeReference<'a, E, Ix> = EdgeReference<'a, NodeIndex<Ix>, EdgeIndex<Ix>, E>;

/// Iterator over the neighbors of a node.
///
/// Yields the targets of the outgoing list, then the sources of the incoming
/// list. `skip_start` suppresses the incoming copy of an undirected
/// self-loop; directed iteration disables one list entirely instead.
pub struct Neighbors<'a, E, Ix: IndexType> {
    pub(crate) skip_start: NodeIndex<Ix>,
    pub(crate) edges: &'a [Edge<E, Ix>],
    pub(crate) next: [EdgeIndex<Ix>; 2],
}

impl<E, Ix: IndexType> Iterator for Neighbors<'_, E, Ix> {
    type Item = NodeIndex<Ix>;

    fn next(&mut self) -> Option<NodeIndex<Ix>> {
        if let Some(edge) = self.edges.get(self.next[0].index()) {
            self.next[0] = edge.next[0];
            return Some(edge.node[1]);
        }
        while let Some(edge) = self.edges.get(self.next[1].index()) {
            self.next[1] = edge.next[1];
            if edge.node[0] != self.skip_start {
                return Some(edge.node[0]);
            }
        }
        None
    }
}

impl<E, Ix: IndexType> Clone for Neighbors<'_, E, Ix> {
    fn clone(&self) -> Self {
        Neighbors {
            skip_start: self.skip_start,
            edges: self.edges,
            next: self.next,
        }
    }
}

impl<E, Ix: IndexType> Neighbors<'_, E, Ix> {
    /// Detaches the cursor from the graph borrow.
    ///
    /// The returned [`WalkNeighbors`] steps through the same lists but takes
    /// the graph as an argument on each step, so the graph may be mutated
    /// between steps.
    #[must_use]
    pub fn detach(&self) -> WalkNeighbors<Ix> {
        WalkNeighbors {
            skip_start: self.skip_start,
            next: self.next,
        }
    }
}

/// A neighbor cursor that does not borrow the graph.
///
/// Edge weights may be changed and nodes added between steps. Removing
/// elements invalidates the cursor's position.
///
/// # Examples
///
/// ```rust
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<u32, u32>::new();
/// let a = g.add_node(0);
/// let b = g.add_node(0);
/// let c = g.add_node(0);
/// g.add_edge(a, b, 1);
/// g.add_edge(a, c, 2);
///
/// let mut walk = g.neighbors(a).detach();
/// while let Some((edge, target)) = walk.next(&g) {
///     let w = g[edge];
///     g[target] += w;
/// }
/// assert_eq!((g[b], g[c]), (1, 2));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct WalkNeighbors<Ix> {
    skip_start: NodeIndex<Ix>,
    next: [EdgeIndex<Ix>; 2],
}

impl<Ix: IndexType> WalkNeighbors<Ix> {
    /// Steps to the next `(edge, neighbor)` pair.
    pub fn next<N, E, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, E, Ty, Ix>,
    ) -> Option<(EdgeIndex<Ix>, NodeIndex<Ix>)> {
        if let Some(edge) = g.edges.get(self.next[0].index()) {
            let ix = self.next[0];
            self.next[0] = edge.next[0];
            return Some((ix, edge.node[1]));
        }
        while let Some(edge) = g.edges.get(self.next[1].index()) {
            let ix = self.next[1];
            self.next[1] = edge.next[1];
            if edge.node[0] != self.skip_start {
                return Some((ix, edge.node[0]));
            }
        }
        None
    }

    /// Steps to the next neighbor.
    pub fn next_node<N, E, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, E, Ty, Ix>,
    ) -> Option<NodeIndex<Ix>> {
        self.next(g).map(|(_, n)| n)
    }

    /// Steps to the next incident edge.
    pub fn next_edge<N, E, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, E, Ty, Ix>,
    ) -> Option<EdgeIndex<Ix>> {
        self.next(g).map(|(e, _)| e)
    }
}

/// Iterator over the edges of a node.
///
/// For undirected graphs the endpoints are swapped on read where needed so
/// that the queried node is the source of outgoing edges and the target of
/// incoming ones.
pub struct Edges<'a, E, Ty, Ix: IndexType> {
    pub(crate) skip_start: NodeIndex<Ix>,
    pub(crate) edges: &'a [Edge<E, Ix>],
    pub(crate) next: [EdgeIndex<Ix>; 2],
    pub(crate) direction: Direction,
    pub(crate) ty: PhantomData<Ty>,
}

impl<'a, E, Ty: EdgeType, Ix: IndexType> Iterator for Edges<'a, E, Ty, Ix> {
    type Item = GraphEdgeReference<'a, E, Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        // directed: only the list matching `direction`, stored orientation
        // undirected: both lists, presented from the queried node's side
        let (iterate_over, reverse) = if Ty::is_directed() {
            (Some(self.direction), None)
        } else {
            (None, Some(self.direction.opposite()))
        };

        if iterate_over.unwrap_or(Direction::Outgoing) == Direction::Outgoing {
            let i = self.next[0];
            if let Some(edge) = self.edges.get(i.index()) {
                self.next[0] = edge.next[0];
                let node = if reverse == Some(Direction::Outgoing) {
                    [edge.node[1], edge.node[0]]
                } else {
                    edge.node
                };
                return Some(EdgeReference {
                    id: i,
                    node,
                    weight: &edge.weight,
                });
            }
        }

        if iterate_over.unwrap_or(Direction::Incoming) == Direction::Incoming {
            while let Some(edge) = self.edges.get(self.next[1].index()) {
                let i = self.next[1];
                self.next[1] = edge.next[1];
                // undirected self-loop already yielded from the outgoing list
                if iterate_over.is_none() && edge.node[0] == self.skip_start {
                    continue;
                }
                let node = if reverse == Some(Direction::Incoming) {
                    [edge.node[1], edge.node[0]]
                } else {
                    edge.node
                };
                return Some(EdgeReference {
                    id: i,
                    node,
                    weight: &edge.weight,
                });
            }
        }

        None
    }
}

impl<E, Ty, Ix: IndexType> Clone for Edges<'_, E, Ty, Ix> {
    fn clone(&self) -> Self {
        Edges {
            skip_start: self.skip_start,
            edges: self.edges,
            next: self.next,
            direction: self.direction,
            ty: PhantomData,
        }
    }
}

/// Iterator over every edge joining two nodes.
pub struct EdgesConnecting<'a, E, Ty, Ix: IndexType> {
    pub(crate) target_node: NodeIndex<Ix>,
    pub(crate) edges: Edges<'a, E, Ty, Ix>,
}

impl<'a, E, Ty: EdgeType, Ix: IndexType> Iterator for EdgesConnecting<'a, E, Ty, Ix> {
    type Item = GraphEdgeReference<'a, E, Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        let target_node = self.target_node;
        self.edges.by_ref().find(|edge| edge.node[1] == target_node)
    }
}

/// Iterator over every edge of a graph in index order.
pub struct EdgeReferences<'a, E, Ix: IndexType> {
    pub(crate) iter: Enumerate<slice::Iter<'a, Edge<E, Ix>>>,
}

impl<'a, E, Ix: IndexType> Iterator for EdgeReferences<'a, E, Ix> {
    type Item = GraphEdgeReference<'a, E, Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(i, edge)| EdgeReference {
            id: EdgeIndex::new(i),
            node: edge.node,
            weight: &edge.weight,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<E, Ix: IndexType> DoubleEndedIterator for EdgeReferences<'_, E, Ix> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(i, edge)| EdgeReference {
            id: EdgeIndex::new(i),
            node: edge.node,
            weight: &edge.weight,
        })
    }
}

impl<E, Ix: IndexType> ExactSizeIterator for EdgeReferences<'_, E, Ix> {}

/// Iterator over the nodes without edges in one direction.
pub struct Externals<'a, N, Ty, Ix: IndexType> {
    pub(crate) iter: Enumerate<slice::Iter<'a, Node<N, Ix>>>,
    pub(crate) dir: Direction,
    pub(crate) ty: PhantomData<Ty>,
}

impl<N, Ty: EdgeType, Ix: IndexType> Iterator for Externals<'_, N, Ty, Ix> {
    type Item = NodeIndex<Ix>;

    fn next(&mut self) -> Option<NodeIndex<Ix>> {
        let k = self.dir.index();
        self.iter.by_ref().find_map(|(index, node)| {
            let external = node.next[k] == EdgeIndex::end()
                && (Ty::is_directed() || node.next[1 - k] == EdgeIndex::end());
            external.then(|| NodeIndex::new(index))
        })
    }
}

/// Mutable walk along one adjacency list, used to relink after removals.
pub(crate) struct EdgesWalkerMut<'a, E, Ix: IndexType> {
    edges: &'a mut [Edge<E, Ix>],
    next: EdgeIndex<Ix>,
    dir: Direction,
}

pub(crate) fn edges_walker_mut<E, Ix: IndexType>(
    edges: &mut [Edge<E, Ix>],
    next: EdgeIndex<Ix>,
    dir: Direction,
) -> EdgesWalkerMut<'_, E, Ix> {
    EdgesWalkerMut { edges, next, dir }
}

impl<E, Ix: IndexType> EdgesWalkerMut<'_, E, Ix> {
    pub(crate) fn next_edge(&mut self) -> Option<&mut Edge<E, Ix>> {
        let k = self.dir.index();
        let edge = self.edges.get_mut(self.next.index())?;
        self.next = edge.next[k];
        Some(edge)
    }
}
