use std::{
    collections::{BinaryHeap, HashMap},
    hash::Hash,
};

use crate::{
    algo::{Measure, MinScored},
    visit::{EdgeRefOf, IntoEdges, NodeIndexable},
};

/// Computes the cost of the k-th shortest walk from `start` to every node.
///
/// Walks may repeat nodes and edges. A node's cost is recorded when it is
/// popped from the queue for the k-th time. With a `goal`, the search stops
/// once the goal has been popped k times.
///
/// # Arguments
///
/// * `graph` - The graph to search
/// * `start` - The source node
/// * `goal` - Optional node at which to stop
/// * `k` - Rank of the walk to report; `1` gives shortest distances
/// * `edge_cost` - Cost of traversing an edge, non-negative
///
/// # Returns
///
/// A map from every node reached at least `k` times to the cost of its
/// k-th shortest walk.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::k_shortest_path;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), u32>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// g.add_edge(a, c, 1);
/// g.add_edge(a, b, 1);
/// g.add_edge(b, c, 1);
///
/// let second = k_shortest_path(&g, a, None, 2, |e| *e.weight());
/// assert_eq!(second.get(&c), Some(&2));
/// assert_eq!(second.get(&b), None);
/// ```
pub fn k_shortest_path<G, F, K>(
    graph: G,
    start: G::NodeId,
    goal: Option<G::NodeId>,
    k: usize,
    mut edge_cost: F,
) -> HashMap<G::NodeId, K>
where
    G: IntoEdges + NodeIndexable,
    G::NodeId: Eq + Hash,
    F: FnMut(EdgeRefOf<'_, G>) -> K,
    K: Measure + Copy,
{
    let mut counter = vec![0usize; graph.node_bound()];
    let mut scores = HashMap::new();
    let mut visit_next = BinaryHeap::new();
    visit_next.push(MinScored(K::default(), start));

    while let Some(MinScored(node_score, node)) = visit_next.pop() {
        let slot = &mut counter[graph.to_index(node)];
        *slot += 1;
        let current_counter = *slot;

        if current_counter > k {
            continue;
        }
        if current_counter == k {
            scores.insert(node, node_score);
        }
        if current_counter == k && goal.as_ref() == Some(&node) {
            break;
        }

        for edge in graph.edges(node) {
            visit_next.push(MinScored(node_score + edge_cost(edge), edge.target()));
        }
    }
    scores
}
