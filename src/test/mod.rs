//! Graph factories and invariant checks shared by the unit tests.

use strum::IntoEnumIterator;

use crate::graph::{DiGraph, Direction, EdgeType, Graph, IndexType};

/// Nine nodes forming three strongly connected components
/// `{0, 3, 6}`, `{2, 5, 8}` and `{1, 4, 7}`, joined by `8 -> 6` and
/// `7 -> 5`.
pub fn scc_graph() -> DiGraph<(), ()> {
    let g = DiGraph::from_edges([
        (6, 0),
        (0, 3),
        (3, 6),
        (8, 6),
        (8, 2),
        (2, 5),
        (5, 8),
        (7, 5),
        (1, 7),
        (7, 4),
        (4, 1),
    ]);
    assert_eq!(g.node_count(), 9);
    g
}

/// Walks every intrusive list of `g` and asserts that each edge is linked
/// exactly once into the outgoing list of its source and the incoming list
/// of its target, and that no list runs past the edge count.
pub fn assert_adjacency_consistent<N, E, Ty: EdgeType, Ix: IndexType>(g: &Graph<N, E, Ty, Ix>) {
    let mut seen = vec![[0usize; 2]; g.edge_count()];

    for a in g.node_indices() {
        for dir in Direction::iter() {
            let k = dir.index();
            let mut steps = 0;
            let mut next = g.first_edge(a, dir);
            while let Some(e) = next {
                let edge = &g.raw_edges()[e.index()];
                assert_eq!(
                    edge.node[k], a,
                    "edge {e:?} linked into list {k} of {a:?} but its endpoint is {:?}",
                    edge.node[k]
                );
                seen[e.index()][k] += 1;
                steps += 1;
                assert!(steps <= g.edge_count(), "list {k} of {a:?} does not terminate");
                next = g.next_edge(e, dir);
            }
        }
    }

    for (i, counts) in seen.iter().enumerate() {
        assert_eq!(counts, &[1, 1], "edge {i} is linked {counts:?} times");
    }
    for edge in g.raw_edges() {
        for endpoint in edge.node {
            assert!(endpoint.index() < g.node_count());
        }
    }
}
