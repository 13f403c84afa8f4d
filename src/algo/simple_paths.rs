use std::{hash::Hash, iter::from_fn};

use indexmap::IndexSet;

use crate::{
    graph::Direction::Outgoing,
    visit::{IntoNeighborsDirected, NodeCount},
};

/// Lazily enumerates every simple path from `from` to `to`.
///
/// A simple path visits no node twice, so a path from a node to itself is
/// never produced. Each path is collected into `TargetColl` and includes
/// both endpoints.
///
/// # Arguments
///
/// * `graph` - The graph to search
/// * `from` - First node of every path
/// * `to` - Last node of every path
/// * `min_intermediate_nodes` - Shortest accepted path, counted in nodes
///   strictly between `from` and `to`
/// * `max_intermediate_nodes` - Longest accepted path in the same unit;
///   `None` allows paths through every node
///
/// # Complexity
///
/// The number of simple paths grows exponentially with graph size. Memory
/// is O(V) for the current path and its neighbor iterators.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::all_simple_paths;
/// use lindgraph::DiGraph;
///
/// let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let mut paths: Vec<Vec<usize>> = all_simple_paths::<Vec<_>, _>(&g, 0.into(), 3.into(), 0, None)
///     .map(|path| path.into_iter().map(|n| n.index()).collect())
///     .collect();
/// paths.sort();
/// assert_eq!(paths, vec![vec![0, 1, 2, 3], vec![0, 2, 3]]);
/// ```
pub fn all_simple_paths<'a, TargetColl, G>(
    graph: &'a G,
    from: G::NodeId,
    to: G::NodeId,
    min_intermediate_nodes: usize,
    max_intermediate_nodes: Option<usize>,
) -> impl Iterator<Item = TargetColl> + 'a
where
    G: NodeCount + IntoNeighborsDirected,
    G::NodeId: Eq + Hash,
    TargetColl: FromIterator<G::NodeId> + 'a,
{
    // measured in nodes of the prefix, `from` included
    let max_length = match max_intermediate_nodes {
        Some(limit) => limit.saturating_add(1),
        None => graph.node_count().saturating_sub(1),
    };
    let min_length = min_intermediate_nodes.saturating_add(1);

    let mut visited: IndexSet<G::NodeId> = IndexSet::from_iter([from]);
    let mut stack = vec![graph.neighbors_directed(from, Outgoing)];
    if from == to {
        stack.clear();
    }

    from_fn(move || {
        while let Some(children) = stack.last_mut() {
            let Some(child) = children.next() else {
                stack.pop();
                visited.pop();
                continue;
            };

            if visited.len() < max_length {
                if child == to {
                    if visited.len() >= min_length {
                        return Some(visited.iter().copied().chain([to]).collect());
                    }
                } else if visited.insert(child) {
                    stack.push(graph.neighbors_directed(child, Outgoing));
                }
            } else {
                // the prefix is full; only a direct step to `to` remains
                let reaches = child == to || children.any(|v| v == to);
                let path = (reaches && visited.len() >= min_length)
                    .then(|| visited.iter().copied().chain([to]).collect());
                stack.pop();
                visited.pop();
                if path.is_some() {
                    return path;
                }
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::graph::{DiGraph, NodeIndex, UnGraph};

    fn indices(paths: impl Iterator<Item = Vec<NodeIndex>>) -> HashSet<Vec<usize>> {
        paths
            .map(|path| path.into_iter().map(|n| n.index()).collect())
            .collect()
    }

    #[test]
    fn test_all_paths_in_diamond() {
        let g = DiGraph::<(), ()>::from_edges([
            (0, 1),
            (0, 2),
            (1, 3),
            (2, 3),
            (1, 2),
            (3, 4),
        ]);
        let paths = indices(all_simple_paths(&g, 0.into(), 4.into(), 0, None));
        let expected: HashSet<Vec<usize>> = [
            vec![0, 1, 3, 4],
            vec![0, 2, 3, 4],
            vec![0, 1, 2, 3, 4],
        ]
        .into_iter()
        .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_intermediate_node_limits() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2), (2, 3), (0, 3)]);
        let n = NodeIndex::new;

        let short = indices(all_simple_paths(&g, n(0), n(3), 0, Some(0)));
        assert_eq!(short, [vec![0, 3]].into_iter().collect());

        let up_to_one = indices(all_simple_paths(&g, n(0), n(3), 0, Some(1)));
        assert_eq!(up_to_one, [vec![0, 3], vec![0, 2, 3]].into_iter().collect());

        let long = indices(all_simple_paths(&g, n(0), n(3), 2, None));
        assert_eq!(long, [vec![0, 1, 2, 3]].into_iter().collect());
    }

    #[test]
    fn test_extreme_limits_saturate() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2)]);
        let n = NodeIndex::new;

        let unbounded = indices(all_simple_paths(&g, n(0), n(2), 0, Some(usize::MAX)));
        assert_eq!(unbounded, indices(all_simple_paths(&g, n(0), n(2), 0, None)));
        assert_eq!(unbounded.len(), 2);

        let unreachable_min = all_simple_paths::<Vec<_>, _>(&g, n(0), n(2), usize::MAX, None);
        assert_eq!(unreachable_min.count(), 0);
    }

    #[test]
    fn test_undirected_paths_do_not_revisit() {
        let g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        let paths = indices(all_simple_paths(&g, 0.into(), 2.into(), 0, None));
        assert_eq!(paths, [vec![0, 2], vec![0, 1, 2]].into_iter().collect());
    }

    #[test]
    fn test_no_path_and_same_endpoints() {
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 0), (2, 1)]);
        let n = NodeIndex::new;
        assert_eq!(all_simple_paths::<Vec<_>, _>(&g, n(0), n(2), 0, None).count(), 0);
        assert_eq!(all_simple_paths::<Vec<_>, _>(&g, n(0), n(0), 0, None).count(), 0);
    }

    #[test]
    fn test_paths_are_produced_lazily() {
        let mut g = DiGraph::<(), ()>::new();
        let nodes: Vec<_> = (0..12).map(|_| g.add_node(())).collect();
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                g.add_edge(a, b, ());
            }
        }
        let first = all_simple_paths::<Vec<_>, _>(&g, nodes[0], nodes[11], 0, None).next();
        let first = first.unwrap();
        assert_eq!(first[0], nodes[0]);
        assert_eq!(first.last(), Some(&nodes[11]));
    }
}
