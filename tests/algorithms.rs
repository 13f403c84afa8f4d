//! Algorithm integration tests over the public API.
//!
//! Each test builds a small graph with known answers and checks an
//! algorithm against it, across several graph representations where the
//! algorithm is representation-agnostic.

use std::collections::{BTreeSet, HashMap};

use lindgraph::{
    algo::{
        all_simple_paths, astar, bellman_ford, dijkstra, dominators::simple_fast,
        find_negative_cycle, has_path_connecting, is_cyclic_directed, is_cyclic_undirected,
        k_shortest_path, kosaraju_scc, tarjan_scc, toposort, TarjanScc,
    },
    visit::{Bfs, Reversed, Topo, Walker},
    DiGraph, DiGraphMap, DiMatrix, Graph, NodeIndex, UnGraph,
};

const EDGES: [(&str, &str, u32); 9] = [
    ("A", "B", 7),
    ("C", "A", 9),
    ("A", "D", 14),
    ("B", "C", 10),
    ("D", "C", 2),
    ("D", "E", 9),
    ("B", "F", 15),
    ("C", "F", 11),
    ("E", "F", 6),
];

/// Build the six-node weighted graph A..F from `EDGES`.
fn lettered<Ty: lindgraph::EdgeType>(
    mut g: Graph<&'static str, u32, Ty>,
) -> (Graph<&'static str, u32, Ty>, HashMap<&'static str, NodeIndex>) {
    let mut ids = HashMap::new();
    for name in ["A", "B", "C", "D", "E", "F"] {
        ids.insert(name, g.add_node(name));
    }
    for (a, b, w) in EDGES {
        g.add_edge(ids[a], ids[b], w);
    }
    (g, ids)
}

fn sorted_components(sccs: Vec<Vec<NodeIndex>>) -> BTreeSet<Vec<usize>> {
    sccs.into_iter()
        .map(|c| {
            let mut c: Vec<usize> = c.into_iter().map(|n| n.index()).collect();
            c.sort_unstable();
            c
        })
        .collect()
}

#[test]
fn dijkstra_undirected_distances() {
    let (g, ids) = lettered(UnGraph::new_undirected());
    let scores = dijkstra(&g, ids["A"], None, |e| *e.weight());
    let by_name: HashMap<&str, u32> = scores.iter().map(|(n, d)| (g[*n], *d)).collect();
    let expected = HashMap::from([
        ("A", 0),
        ("B", 7),
        ("C", 9),
        ("D", 11),
        ("E", 20),
        ("F", 20),
    ]);
    assert_eq!(by_name, expected);
}

#[test]
fn astar_directed_path() {
    let (g, ids) = lettered(DiGraph::new());
    let goal = ids["E"];
    let path = astar(&g, ids["A"], |n| n == goal, |e| *e.weight(), |_| 0);
    assert_eq!(path, Some((23, vec![ids["A"], ids["D"], ids["E"]])));

    let unreachable = astar(&g, ids["F"], |n| n == ids["A"], |e| *e.weight(), |_| 0);
    assert_eq!(unreachable, None);
}

#[test]
fn astar_calls_edge_cost_lazily() {
    let mut g = DiGraph::<(), u32>::new();
    let a = g.add_node(());
    let b = g.add_node(());
    let c = g.add_node(());
    let d = g.add_node(());
    let e = g.add_node(());
    g.extend_with_edges([(a, b, 1), (b, c, 1), (c, e, 1), (a, d, 10), (d, e, 1)]);

    let mut calls = 0;
    let found = astar(
        &g,
        a,
        |n| n == e,
        |edge| {
            calls += 1;
            *edge.weight()
        },
        |_| 0,
    );
    assert_eq!(found, Some((3, vec![a, b, c, e])));
    // a->b, a->d, b->c, c->e; d is never expanded
    assert_eq!(calls, 4);
}

#[test]
fn shortest_paths_agree_across_representations() {
    let (g, ids) = lettered(DiGraph::new());
    let from_graph = dijkstra(&g, ids["A"], None, |e| *e.weight());

    let mut map = DiGraphMap::<&str, u32>::new();
    for (a, b, w) in EDGES {
        map.add_edge(a, b, w);
    }
    let from_map = dijkstra(&map, "A", None, |e| *e.weight());

    let mut matrix = DiMatrix::<&str, u32>::new();
    let mut mids = HashMap::new();
    for name in ["A", "B", "C", "D", "E", "F"] {
        mids.insert(name, matrix.add_node(name));
    }
    for (a, b, w) in EDGES {
        matrix.add_edge(mids[a], mids[b], w);
    }
    let from_matrix = dijkstra(&matrix, mids["A"], None, |e| *e.weight());

    for name in ["A", "B", "C", "D", "E", "F"] {
        let expected = from_graph.get(&ids[name]);
        assert_eq!(from_map.get(name), expected, "GraphMap distance to {name}");
        assert_eq!(from_matrix.get(&mids[name]), expected, "MatrixGraph distance to {name}");
    }
}

#[test]
fn bellman_ford_with_negative_edge() {
    let mut g = DiGraph::<(), f64>::new();
    let nodes: Vec<_> = (0..4).map(|_| g.add_node(())).collect();
    g.extend_with_edges([
        (nodes[0], nodes[1], 4.0),
        (nodes[0], nodes[2], 2.0),
        (nodes[2], nodes[1], -1.0),
        (nodes[1], nodes[3], 3.0),
    ]);
    let paths = bellman_ford(&g, nodes[0]).unwrap();
    assert_eq!(paths.distances[&nodes[1]], 1.0);
    assert_eq!(paths.distances[&nodes[3]], 4.0);
    assert_eq!(paths.path_to(nodes[3]), Some(vec![nodes[0], nodes[2], nodes[1], nodes[3]]));
    assert_eq!(find_negative_cycle(&g, nodes[0]), None);

    g.add_edge(nodes[3], nodes[2], -5.0);
    assert!(bellman_ford(&g, nodes[0]).is_err());
    let cycle = find_negative_cycle(&g, nodes[0]).unwrap();
    assert_eq!(
        cycle.iter().copied().collect::<BTreeSet<_>>(),
        BTreeSet::from([nodes[1], nodes[2], nodes[3]])
    );
}

#[test]
fn k_shortest_second_route() {
    let (g, ids) = lettered(DiGraph::new());
    let first = k_shortest_path(&g, ids["A"], None, 1, |e| *e.weight());
    let dijkstra_scores = dijkstra(&g, ids["A"], None, |e| *e.weight());
    assert_eq!(first, dijkstra_scores);

    let second = k_shortest_path(&g, ids["A"], Some(ids["F"]), 2, |e| *e.weight());
    // A-B-F (22) is shortest; A-D-C-F (27) is the runner-up
    assert_eq!(dijkstra_scores[&ids["F"]], 22);
    assert_eq!(second[&ids["F"]], 27);
}

#[test]
fn scc_three_cycles_in_32_nodes() {
    let mut g = DiGraph::<(), ()>::with_capacity(32, 11);
    for _ in 0..32 {
        g.add_node(());
    }
    g.extend_with_edges([
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
    let expected: BTreeSet<Vec<usize>> =
        [vec![0, 3, 6], vec![2, 5, 8], vec![1, 4, 7]].into_iter().collect();

    let nontrivial = |sccs: Vec<Vec<NodeIndex>>| -> BTreeSet<Vec<usize>> {
        sorted_components(sccs)
            .into_iter()
            .filter(|c| c.len() > 1)
            .collect()
    };

    let kosaraju = kosaraju_scc(&g);
    assert_eq!(kosaraju.len(), 32 - 9 + 3);
    assert_eq!(nontrivial(kosaraju), expected);

    let mut from_run = Vec::new();
    TarjanScc::new().run(&g, |scc| from_run.push(scc.to_vec()));
    assert_eq!(nontrivial(from_run), expected);
    assert_eq!(nontrivial(tarjan_scc(&g)), expected);
}

#[test]
fn scc_of_reversed_graph_matches() {
    let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)]);
    assert_eq!(
        sorted_components(tarjan_scc(&g)),
        sorted_components(tarjan_scc(Reversed(&g)))
    );
}

#[test]
fn dominator_chain() {
    let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 0)]);
    let n = NodeIndex::new;
    let doms = simple_fast(&g, n(0));

    assert_eq!(doms.root(), n(0));
    assert_eq!(doms.dominators(n(2)).unwrap().collect::<Vec<_>>(), vec![n(2), n(1), n(0)]);
    assert_eq!(doms.strict_dominators(n(2)).unwrap().collect::<Vec<_>>(), vec![n(1), n(0)]);
    assert_eq!(doms.immediately_dominated_by(n(1)).collect::<Vec<_>>(), vec![n(2)]);

    assert!(doms.dominators(n(99)).is_none());
    assert!(doms.strict_dominators(n(99)).is_none());
    assert_eq!(doms.immediate_dominator(n(99)), None);
    assert_eq!(doms.immediately_dominated_by(n(99)).count(), 0);
}

#[test]
fn toposort_and_topo_walker_agree() {
    let g = DiGraph::<(), ()>::from_edges([(0, 2), (1, 2), (2, 3), (3, 4), (1, 4)]);
    let sorted = toposort(&g).unwrap();
    let walked: Vec<_> = Topo::new(&g).iter(&g).collect();
    for order in [&sorted, &walked] {
        let pos = |n: usize| order.iter().position(|x| x.index() == n).unwrap();
        for edge in g.edge_references() {
            assert!(pos(edge.source().index()) < pos(edge.target().index()));
        }
    }
    assert!(!is_cyclic_directed(&g));
}

#[test]
fn cycle_detection() {
    let mut g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2)]);
    assert!(!is_cyclic_directed(&g));
    g.add_edge(NodeIndex::new(2), NodeIndex::new(0), ());
    assert!(is_cyclic_directed(&g));
    assert!(toposort(&g).is_err());

    let tree = UnGraph::<(), ()>::from_edges([(0, 1), (0, 2), (2, 3)]);
    assert!(!is_cyclic_undirected(&tree));
}

#[test]
fn reachability_and_simple_paths() {
    let g = DiGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (5, 4)]);
    let n = NodeIndex::new;
    assert!(has_path_connecting(&g, n(0), n(4)));
    assert!(!has_path_connecting(&g, n(0), n(5)));

    let reachable: BTreeSet<_> = Bfs::new(&g, n(0)).iter(&g).map(|x| x.index()).collect();
    assert_eq!(reachable, BTreeSet::from([0, 1, 2, 3, 4]));

    let paths: BTreeSet<Vec<usize>> = all_simple_paths::<Vec<_>, _>(&g, n(0), n(4), 0, None)
        .map(|p| p.into_iter().map(|x| x.index()).collect())
        .collect();
    assert_eq!(paths, BTreeSet::from([vec![0, 1, 3, 4], vec![0, 2, 3, 4]]));
}
