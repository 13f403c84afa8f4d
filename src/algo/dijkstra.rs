use std::{
    collections::{hash_map::Entry, BinaryHeap, HashMap},
    hash::Hash,
};

use crate::{
    algo::{Measure, MinScored},
    visit::{EdgeRefOf, IntoEdges, VisitMap, Visitable},
};

/// Computes the length of the shortest path from `start` to every reachable
/// node.
///
/// Edge costs come from `edge_cost` and must be non-negative. The queue has
/// no decrease-key: an improved distance is pushed again and stale entries
/// are skipped when popped. With a `goal`, the search stops as soon as the
/// goal is popped; distances of other nodes may then be tentative.
///
/// # Arguments
///
/// * `graph` - The graph to search
/// * `start` - The source node
/// * `goal` - Optional node at which to stop
/// * `edge_cost` - Cost of traversing an edge
///
/// # Returns
///
/// A map from every reached node to its distance. Unreachable nodes are
/// absent.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::dijkstra;
/// use lindgraph::UnGraph;
///
/// let mut g = UnGraph::<(), u32>::new_undirected();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// let far = g.add_node(());
/// g.add_edge(a, b, 2);
/// g.add_edge(b, c, 2);
/// g.add_edge(a, c, 5);
///
/// let dist = dijkstra(&g, a, None, |e| *e.weight());
/// assert_eq!(dist[&c], 4);
/// assert!(!dist.contains_key(&far));
/// ```
pub fn dijkstra<G, F, K>(
    graph: G,
    start: G::NodeId,
    goal: Option<G::NodeId>,
    mut edge_cost: F,
) -> HashMap<G::NodeId, K>
where
    G: IntoEdges + Visitable,
    G::NodeId: Eq + Hash,
    F: FnMut(EdgeRefOf<'_, G>) -> K,
    K: Measure + Copy,
{
    let mut visited = graph.visit_map();
    let mut scores = HashMap::new();
    let mut visit_next = BinaryHeap::new();
    let zero_score = K::default();
    scores.insert(start, zero_score);
    visit_next.push(MinScored(zero_score, start));

    while let Some(MinScored(node_score, node)) = visit_next.pop() {
        if visited.is_visited(&node) {
            continue;
        }
        if goal.as_ref() == Some(&node) {
            break;
        }
        for edge in graph.edges(node) {
            let next = edge.target();
            if visited.is_visited(&next) {
                continue;
            }
            let next_score = node_score + edge_cost(edge);
            match scores.entry(next) {
                Entry::Occupied(mut ent) => {
                    if next_score < *ent.get() {
                        ent.insert(next_score);
                        visit_next.push(MinScored(next_score, next));
                    }
                }
                Entry::Vacant(ent) => {
                    ent.insert(next_score);
                    visit_next.push(MinScored(next_score, next));
                }
            }
        }
        visited.visit(node);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{DiGraph, NodeIndex, UnGraph},
        GraphMap, Undirected,
    };

    fn city_graph() -> (UnGraph<&'static str, u32>, Vec<NodeIndex>) {
        let mut g = UnGraph::new_undirected();
        let nodes: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .into_iter()
            .map(|name| g.add_node(name))
            .collect();
        let [a, b, c, d, e, f] = [nodes[0], nodes[1], nodes[2], nodes[3], nodes[4], nodes[5]];
        g.extend_with_edges([
            (a, b, 7),
            (c, a, 9),
            (a, d, 14),
            (b, c, 10),
            (d, c, 2),
            (d, e, 9),
            (b, f, 15),
            (c, f, 11),
            (e, f, 6),
        ]);
        (g, nodes)
    }

    #[test]
    fn test_dijkstra_distances() {
        let (g, nodes) = city_graph();
        let scores = dijkstra(&g, nodes[0], None, |e| *e.weight());
        let mut by_name: Vec<_> = scores.into_iter().map(|(n, s)| (g[n], s)).collect();
        by_name.sort_unstable();
        assert_eq!(
            by_name,
            vec![("A", 0), ("B", 7), ("C", 9), ("D", 11), ("E", 20), ("F", 20)]
        );
    }

    #[test]
    fn test_dijkstra_goal_stops_early() {
        let mut g = DiGraph::<(), u32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, 1);
        g.add_edge(b, c, 1);
        let scores = dijkstra(&g, a, Some(b), |e| *e.weight());
        assert_eq!(scores.get(&b), Some(&1));
        assert!(!scores.contains_key(&c));
    }

    #[test]
    fn test_dijkstra_directed_unreachable() {
        let mut g = DiGraph::<(), f64>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(b, a, 1.5);
        let scores = dijkstra(&g, a, None, |e| *e.weight());
        assert_eq!(scores.len(), 1);
        let back = dijkstra(&g, b, None, |e| *e.weight());
        assert_eq!(back[&a], 1.5);
    }

    #[test]
    fn test_dijkstra_graphmap_unit_cost() {
        let mut g = GraphMap::<&str, (), Undirected>::new();
        g.add_edge("x", "y", ());
        g.add_edge("y", "z", ());
        let scores = dijkstra(&g, "x", None, |_| 1usize);
        assert_eq!(scores["z"], 2);
    }
}
