//! Property tests for the structural invariants of the graph containers.

use std::collections::{BTreeSet, HashSet};

use lindgraph::{
    algo::{kosaraju_scc, tarjan_scc},
    DiGraph, EdgeIndex, NodeIndex, StableDiGraph, UnGraph,
};
use proptest::prelude::*;

const MAX_NODES: usize = 12;

fn edge_list() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((0..MAX_NODES, 0..MAX_NODES), 0..40)
}

fn build_directed(edges: &[(usize, usize)]) -> DiGraph<(), ()> {
    let mut g = DiGraph::with_capacity(MAX_NODES, edges.len());
    for _ in 0..MAX_NODES {
        g.add_node(());
    }
    for &(a, b) in edges {
        g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    g
}

fn build_undirected(edges: &[(usize, usize)]) -> UnGraph<(), ()> {
    let mut g = UnGraph::with_capacity(MAX_NODES, edges.len());
    for _ in 0..MAX_NODES {
        g.add_node(());
    }
    for &(a, b) in edges {
        g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    g
}

proptest! {
    #[test]
    fn self_loop_adds_exactly_one_edge(edges in edge_list(), a in 0..MAX_NODES) {
        let mut g = build_directed(&edges);
        let a = NodeIndex::new(a);
        let before = g.edge_count();
        let e = g.add_edge(a, a, ());
        prop_assert_eq!(g.edge_count(), before + 1);
        prop_assert!(g.find_edge(a, a).is_some());
        g.remove_edge(e);
        let had_loop = edges.iter().any(|&(x, y)| x == y && x == a.index());
        prop_assert_eq!(g.find_edge(a, a).is_some(), had_loop);
    }

    #[test]
    fn undirected_find_edge_is_symmetric(edges in edge_list()) {
        // parallel edges allowed: either order finds some edge
        let g = build_undirected(&edges);
        for a in g.node_indices() {
            for b in g.node_indices() {
                prop_assert_eq!(g.find_edge(a, b).is_some(), g.find_edge(b, a).is_some());
            }
        }
    }

    #[test]
    fn undirected_simple_graph_finds_same_edge(edges in edge_list()) {
        let unique: BTreeSet<(usize, usize)> =
            edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
        let unique: Vec<_> = unique.into_iter().collect();
        let g = build_undirected(&unique);
        for (i, &(a, b)) in unique.iter().enumerate() {
            let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
            prop_assert_eq!(g.find_edge(a, b), Some(EdgeIndex::new(i)));
            prop_assert_eq!(g.find_edge(b, a), Some(EdgeIndex::new(i)));
        }
    }

    #[test]
    fn removed_node_disappears_from_neighbors(edges in edge_list(), victim in 0..MAX_NODES) {
        let mut g = DiGraph::<usize, ()>::new();
        for i in 0..MAX_NODES {
            g.add_node(i);
        }
        for &(a, b) in &edges {
            g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        let removed = g.remove_node(NodeIndex::new(victim));
        prop_assert_eq!(removed, Some(victim));
        for x in g.node_indices() {
            prop_assert!(g.neighbors(x).all(|n| g[n] != victim));
            prop_assert!(g.neighbors_directed(x, lindgraph::Incoming).all(|n| g[n] != victim));
        }
        let surviving = edges.iter().filter(|&&(a, b)| a != victim && b != victim).count();
        prop_assert_eq!(g.edge_count(), surviving);
    }

    #[test]
    fn update_edge_is_idempotent_in_count(edges in edge_list(), a in 0..MAX_NODES, b in 0..MAX_NODES) {
        let mut g = DiGraph::<(), u8>::new();
        for _ in 0..MAX_NODES {
            g.add_node(());
        }
        for &(x, y) in &edges {
            g.add_edge(NodeIndex::new(x), NodeIndex::new(y), 0);
        }
        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        g.update_edge(a, b, 1);
        let count = g.edge_count();
        let id = g.update_edge(a, b, 2);
        prop_assert_eq!(g.edge_count(), count);
        prop_assert_eq!(g.edge_weight(id), Some(&2));
    }

    #[test]
    fn stable_graph_reuses_removed_index(edges in edge_list(), victim in 0..MAX_NODES) {
        let mut g = StableDiGraph::<(), ()>::new();
        for _ in 0..MAX_NODES {
            g.add_node(());
        }
        for &(a, b) in &edges {
            g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        let victim = NodeIndex::new(victim);
        g.remove_node(victim);
        prop_assert_eq!(g.add_node(()), victim);
        prop_assert_eq!(g.node_bound(), MAX_NODES);
        g.clear();
        prop_assert_eq!(g.node_bound(), 0);
    }

    #[test]
    fn scc_algorithms_partition_the_same_way(edges in edge_list()) {
        let g = build_directed(&edges);
        let normalize = |sccs: Vec<Vec<NodeIndex>>| -> HashSet<Vec<NodeIndex>> {
            sccs.into_iter()
                .map(|mut c| {
                    c.sort();
                    c
                })
                .collect()
        };
        let tarjan = tarjan_scc(&g);
        prop_assert_eq!(tarjan.iter().map(Vec::len).sum::<usize>(), MAX_NODES);
        prop_assert_eq!(normalize(tarjan), normalize(kosaraju_scc(&g)));
    }
}
