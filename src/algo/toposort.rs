use tracing::debug;

use crate::{
    error::Cycle,
    utils::UnionFind,
    visit::{
        depth_first_search, Control, Dfs, DfsEvent, IntoEdgeReferences, IntoNeighbors,
        IntoNeighborsDirected, IntoNodeIdentifiers, NodeIndexable, Visitable, Walker,
    },
};

/// Returns the nodes of `g` in topological order.
///
/// Every node appears after all of its predecessors. The order is the
/// reverse of the depth-first finish order over all nodes.
///
/// # Errors
///
/// Returns [`Cycle`] carrying the node that closed a cycle, i.e. a node that
/// was reached again while its own descendants were still being explored.
/// A self-loop is a cycle.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::toposort;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<&str, ()>::new();
/// let socks = g.add_node("socks");
/// let shoes = g.add_node("shoes");
/// g.add_edge(socks, shoes, ());
/// assert_eq!(toposort(&g), Ok(vec![socks, shoes]));
///
/// g.add_edge(shoes, socks, ());
/// assert!(toposort(&g).is_err());
/// ```
pub fn toposort<G>(g: G) -> Result<Vec<G::NodeId>, Cycle<G::NodeId>>
where
    G: IntoNeighborsDirected + IntoNodeIdentifiers + Visitable,
{
    let mut finished = Vec::new();
    let verdict = depth_first_search(&g, g.node_identifiers(), |event| match event {
        DfsEvent::BackEdge(_, closing) => Control::Break(closing),
        DfsEvent::Finish(node, _) => {
            finished.push(node);
            Control::Continue
        }
        _ => Control::Continue,
    });

    if let Some(closing) = verdict.break_value() {
        debug!(ordered = finished.len(), "toposort: cycle detected");
        return Err(Cycle(closing));
    }
    finished.reverse();
    Ok(finished)
}

/// Returns `true` if the directed graph `g` contains a cycle, self-loops
/// included.
pub fn is_cyclic_directed<G>(g: G) -> bool
where
    G: IntoNeighborsDirected + IntoNodeIdentifiers + Visitable,
{
    toposort(g).is_err()
}

/// Returns `true` if the undirected graph `g` contains a cycle.
///
/// Joins the endpoints of every edge in a union-find; an edge whose
/// endpoints are already joined closes a cycle. Parallel edges and
/// self-loops count as cycles.
///
/// # Complexity
///
/// O(E α(V)) time, O(V) space.
pub fn is_cyclic_undirected<G>(g: G) -> bool
where
    G: NodeIndexable + IntoEdgeReferences,
{
    let mut edge_sets = UnionFind::<usize>::new(g.node_bound());
    g.edge_references().any(|edge| {
        let (a, b) = (edge.source(), edge.target());
        !edge_sets.union(g.to_index(a), g.to_index(b))
    })
}

/// Returns `true` if `to` can be reached from `from` by following edges.
///
/// A node always reaches itself.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::has_path_connecting;
/// use lindgraph::DiGraph;
///
/// let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2)]);
/// assert!(has_path_connecting(&g, 0.into(), 2.into()));
/// assert!(!has_path_connecting(&g, 2.into(), 0.into()));
/// ```
pub fn has_path_connecting<G>(g: G, from: G::NodeId, to: G::NodeId) -> bool
where
    G: IntoNeighbors + Visitable,
{
    Dfs::new(&g, from).iter(&g).any(|x| x == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{DiGraph, NodeIndex, StableDiGraph, UnGraph},
        GraphMap, Undirected,
    };

    #[test]
    fn test_toposort_orders_all_nodes() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 3), (2, 3), (4, 2)]);
        let order = toposort(&g).unwrap();
        assert_eq!(order.len(), 5);
        for edge in g.edge_references() {
            let src = order.iter().position(|&n| n == edge.source());
            let dst = order.iter().position(|&n| n == edge.target());
            assert!(src < dst);
        }
    }

    #[test]
    fn test_toposort_reports_closing_node() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 1)]);
        let cycle = toposort(&g).unwrap_err();
        assert!([NodeIndex::new(1), NodeIndex::new(2)].contains(&cycle.node_id()));

        let mut looped = DiGraph::<(), ()>::new();
        let a = looped.add_node(());
        looped.add_edge(a, a, ());
        assert_eq!(toposort(&looped), Err(Cycle(a)));
        assert!(is_cyclic_directed(&looped));
    }

    #[test]
    fn test_toposort_stable_graph_skips_vacant() {
        let mut g = StableDiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        assert!(is_cyclic_directed(&g));
        g.remove_node(NodeIndex::new(1));
        assert_eq!(
            toposort(&g),
            Ok(vec![NodeIndex::new(2), NodeIndex::new(0)])
        );
    }

    #[test]
    fn test_is_cyclic_undirected() {
        let mut g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (3, 4)]);
        assert!(!is_cyclic_undirected(&g));
        g.add_edge(NodeIndex::new(2), NodeIndex::new(0), ());
        assert!(is_cyclic_undirected(&g));

        let mut parallel = UnGraph::<(), ()>::from_edges([(0, 1)]);
        parallel.add_edge(NodeIndex::new(1), NodeIndex::new(0), ());
        assert!(is_cyclic_undirected(&parallel));

        let mut map = GraphMap::<u8, (), Undirected>::new();
        map.add_edge(1, 2, ());
        map.add_edge(2, 3, ());
        assert!(!is_cyclic_undirected(&map));
        map.add_edge(3, 1, ());
        assert!(is_cyclic_undirected(&map));
    }

    #[test]
    fn test_has_path_connecting() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (3, 2)]);
        let n = NodeIndex::new;
        assert!(has_path_connecting(&g, n(0), n(2)));
        assert!(has_path_connecting(&g, n(3), n(3)));
        assert!(!has_path_connecting(&g, n(0), n(3)));
        assert!(!has_path_connecting(&g, n(2), n(0)));
    }
}
