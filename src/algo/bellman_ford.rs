use std::{collections::HashMap, hash::Hash};

use tracing::debug;

use crate::{
    algo::FloatMeasure,
    error::NegativeCycle,
    visit::{Data, GraphBase, IntoEdges, IntoNodeIdentifiers, NodeCount, NodeIndexable},
};

/// Shortest-path tree computed by [`bellman_ford`].
#[derive(Debug, Clone)]
pub struct Paths<N, K> {
    /// Distance from the source to every reachable node, the source included.
    pub distances: HashMap<N, K>,
    /// Predecessor on a shortest path for every reachable node other than
    /// the source.
    pub predecessors: HashMap<N, N>,
}

impl<N: Eq + Hash, K: PartialEq> PartialEq for Paths<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.distances == other.distances && self.predecessors == other.predecessors
    }
}

impl<N: Copy + Eq + Hash, K> Paths<N, K> {
    /// Returns the shortest path from the source to `target`, both included,
    /// or `None` if `target` is unreachable.
    pub fn path_to(&self, target: N) -> Option<Vec<N>> {
        if !self.distances.contains_key(&target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(&previous) = self.predecessors.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Computes shortest paths from `source`, allowing negative edge weights.
///
/// Edge weights are the graph's own edge weights. On an undirected graph
/// every edge can be walked both ways, so a single negative edge is already
/// a negative cycle.
///
/// # Returns
///
/// The distances and predecessors of every node reachable from `source`,
/// or [`NegativeCycle`] if a cycle of negative total weight is reachable
/// from it. Use [`find_negative_cycle`] to recover the cycle.
///
/// # Complexity
///
/// O(V E) time, O(V) space. Relaxation stops early once a round changes
/// nothing.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::bellman_ford;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), f64>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// g.add_edge(a, b, 4.0);
/// g.add_edge(a, c, 1.0);
/// g.add_edge(b, c, -5.0);
///
/// let paths = bellman_ford(&g, a).unwrap();
/// assert_eq!(paths.distances[&c], -1.0);
/// assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
/// ```
pub fn bellman_ford<G>(
    graph: G,
    source: G::NodeId,
) -> Result<Paths<G::NodeId, G::EdgeWeight>, NegativeCycle>
where
    G: NodeCount + IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::NodeId: Eq + Hash,
    G::EdgeWeight: FloatMeasure,
{
    let (distance, predecessor) = relax(&graph, source);

    if has_relaxable_edge(&graph, &distance) {
        debug!("bellman_ford: negative cycle reachable from the source");
        return Err(NegativeCycle(()));
    }

    let mut distances = HashMap::new();
    let mut predecessors = HashMap::new();
    for (i, &dist) in distance.iter().enumerate() {
        if dist == G::EdgeWeight::infinite() {
            continue;
        }
        let node = graph.from_index(i);
        distances.insert(node, dist);
        if let Some(pred) = predecessor[i] {
            predecessors.insert(node, pred);
        }
    }
    Ok(Paths {
        distances,
        predecessors,
    })
}

/// Returns the nodes of one negative cycle reachable from `source`, in edge
/// order, or `None` if there is none.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::find_negative_cycle;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), f32>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// g.add_edge(a, b, 1.0);
/// g.add_edge(b, c, -2.0);
/// g.add_edge(c, b, 1.0);
///
/// let cycle = find_negative_cycle(&g, a).unwrap();
/// assert_eq!(cycle.len(), 2);
/// assert!(cycle.contains(&b) && cycle.contains(&c));
/// ```
pub fn find_negative_cycle<G>(graph: G, source: G::NodeId) -> Option<Vec<G::NodeId>>
where
    G: NodeCount + IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatMeasure,
{
    let ix = |i| graph.to_index(i);
    let (distance, mut predecessor) = relax(&graph, source);

    for i in graph.node_identifiers() {
        for edge in graph.edges(i) {
            let j = edge.target();
            let w = *edge.weight();
            if distance[ix(i)] + w >= distance[ix(j)] {
                continue;
            }

            // `j` can still be improved, so it sits on or behind a negative
            // cycle. Following predecessors V times lands inside the cycle.
            predecessor[ix(j)] = Some(i);
            let mut node = j;
            for _ in 0..graph.node_bound() {
                node = predecessor[ix(node)]?;
            }

            let start = node;
            let mut cycle = vec![start];
            let mut current = predecessor[ix(start)]?;
            while current != start {
                cycle.push(current);
                current = predecessor[ix(current)]?;
            }
            cycle.reverse();
            debug!(len = cycle.len(), "find_negative_cycle: cycle found");
            return Some(cycle);
        }
    }
    None
}

type Relaxed<G> = (
    Vec<<G as Data>::EdgeWeight>,
    Vec<Option<<G as GraphBase>::NodeId>>,
);

/// Runs up to V - 1 relaxation rounds over dense `to_index` positions.
fn relax<G>(graph: &G, source: G::NodeId) -> Relaxed<G>
where
    G: NodeCount + IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatMeasure,
{
    let ix = |i| graph.to_index(i);
    let bound = graph.node_bound();
    let mut predecessor = vec![None; bound];
    let mut distance = vec![<G::EdgeWeight>::infinite(); bound];
    distance[ix(source)] = <G::EdgeWeight>::zero();

    for _ in 1..graph.node_count() {
        let mut did_update = false;
        for i in graph.node_identifiers() {
            for edge in graph.edges(i) {
                let j = edge.target();
                let w = *edge.weight();
                if distance[ix(i)] + w < distance[ix(j)] {
                    distance[ix(j)] = distance[ix(i)] + w;
                    predecessor[ix(j)] = Some(i);
                    did_update = true;
                }
            }
        }
        if !did_update {
            break;
        }
    }
    (distance, predecessor)
}

fn has_relaxable_edge<G>(graph: &G, distance: &[G::EdgeWeight]) -> bool
where
    G: IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatMeasure,
{
    graph.node_identifiers().any(|i| {
        graph.edges(i).any(|edge| {
            let w = *edge.weight();
            distance[graph.to_index(i)] + w < distance[graph.to_index(edge.target())]
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, NodeIndex, UnGraph};

    #[test]
    fn test_bellman_ford_matches_dijkstra_shape() {
        let mut g = DiGraph::<(), f64>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let d = g.add_node(());
        let lone = g.add_node(());
        g.add_edge(a, b, 2.0);
        g.add_edge(a, c, 6.0);
        g.add_edge(b, c, 3.0);
        g.add_edge(c, d, -1.0);

        let paths = bellman_ford(&g, a).unwrap();
        assert_eq!(paths.distances.len(), 4);
        assert_eq!(paths.distances[&a], 0.0);
        assert_eq!(paths.distances[&c], 5.0);
        assert_eq!(paths.distances[&d], 4.0);
        assert!(!paths.distances.contains_key(&lone));
        assert!(!paths.predecessors.contains_key(&a));
        assert_eq!(paths.predecessors[&c], b);
        assert_eq!(paths.path_to(d), Some(vec![a, b, c, d]));
        assert_eq!(paths.path_to(lone), None);
    }

    #[test]
    fn test_paths_compare_by_content() {
        let g = DiGraph::<(), f64>::from_edges([(0, 1, 1.5), (1, 2, -0.5), (0, 2, 2.0)]);
        let first = bellman_ford(&g, NodeIndex::new(0)).unwrap();
        let second = bellman_ford(&g, NodeIndex::new(0)).unwrap();
        assert_eq!(first, second);

        let from_middle = bellman_ford(&g, NodeIndex::new(1)).unwrap();
        assert_ne!(first, from_middle);
    }

    #[test]
    fn test_bellman_ford_negative_cycle() {
        let mut g = DiGraph::<(), f64>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, 1.0);
        g.add_edge(b, c, -3.0);
        g.add_edge(c, b, 1.0);
        assert_eq!(bellman_ford(&g, a), Err(NegativeCycle(())));

        let cycle = find_negative_cycle(&g, a).unwrap();
        assert_eq!(cycle.len(), 2);
        let at = cycle.iter().position(|&n| n == b).unwrap();
        assert_eq!(cycle[(at + 1) % 2], c);
    }

    #[test]
    fn test_unreachable_negative_cycle_is_ignored() {
        let mut g = DiGraph::<(), f32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(b, c, -1.0);
        g.add_edge(c, b, -1.0);
        let paths = bellman_ford(&g, a).unwrap();
        assert_eq!(paths.distances.len(), 1);
        assert_eq!(find_negative_cycle(&g, a), None);
    }

    #[test]
    fn test_undirected_negative_edge_is_cycle() {
        let mut g = UnGraph::<(), f64>::new_undirected();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, -1.0);
        assert!(bellman_ford(&g, a).is_err());
        let mut positive = UnGraph::<(), f64>::new_undirected();
        let x = positive.add_node(());
        let y = positive.add_node(());
        positive.add_edge(x, y, 2.5);
        assert_eq!(bellman_ford(&positive, y).unwrap().distances[&x], 2.5);
    }
}
