#![no_main]

use libfuzzer_sys::fuzz_target;
use lindgraph::{Direction, EdgeIndex, Graph, IndexType, NodeIndex, StableGraph, Undirected};

/// Walks every intrusive list and checks each edge is linked exactly once
/// from its source's outgoing list and its target's incoming list.
fn check_lists<N, E, Ty: lindgraph::EdgeType, Ix: IndexType>(g: &Graph<N, E, Ty, Ix>) {
    let mut seen = vec![[0u8; 2]; g.edge_count()];
    for a in g.node_indices() {
        for dir in [Direction::Outgoing, Direction::Incoming] {
            let mut next = g.first_edge(a, dir);
            let mut steps = 0;
            while let Some(e) = next {
                let (source, target) = g.edge_endpoints(e).unwrap();
                let endpoint = if dir == Direction::Outgoing { source } else { target };
                assert_eq!(endpoint, a);
                seen[e.index()][dir.index()] += 1;
                steps += 1;
                assert!(steps <= g.edge_count());
                next = g.next_edge(e, dir);
            }
        }
    }
    assert!(seen.iter().all(|counts| *counts == [1, 1]));
}

fuzz_target!(|data: &[u8]| {
    let mut graph = Graph::<u8, u8, Undirected, u8>::default();
    let mut stable = StableGraph::<u8, u8, Undirected, u8>::default();

    for op in data.chunks(3) {
        let [kind, x, y] = match *op {
            [k, x, y] => [k, x, y],
            _ => break,
        };
        match kind % 4 {
            0 => {
                let _ = graph.try_add_node(x);
                let _ = stable.try_add_node(x);
            }
            1 => {
                let (a, b) = (NodeIndex::new(x as usize), NodeIndex::new(y as usize));
                let _ = graph.try_add_edge(a, b, kind);
                let _ = stable.try_add_edge(a, b, kind);
            }
            2 => {
                graph.remove_node(NodeIndex::new(x as usize));
                stable.remove_node(NodeIndex::new(x as usize));
            }
            _ => {
                graph.remove_edge(EdgeIndex::new(y as usize));
                stable.remove_edge(EdgeIndex::new(y as usize));
            }
        }
        check_lists(&graph);
        for n in stable.node_indices() {
            for m in stable.neighbors(n) {
                assert!(stable.contains_node(m));
            }
        }
    }
});
