use std::{
    collections::{hash_map::Entry, BinaryHeap, HashMap},
    hash::Hash,
};

use crate::{
    algo::{Measure, MinScored},
    visit::{EdgeRefOf, IntoEdges, Visitable},
};

/// Finds a cheapest path from `start` to a node accepted by `is_goal`.
///
/// Nodes are expanded in order of `cost so far + estimate_cost(node)`. The
/// estimate must never exceed the true remaining cost, otherwise the path
/// found may not be the cheapest. `estimate_cost` is called once for the
/// start and once per improved successor; `edge_cost` once per edge
/// examined.
///
/// # Arguments
///
/// * `graph` - The graph to search
/// * `start` - The source node
/// * `is_goal` - Accepts the target node(s)
/// * `edge_cost` - Cost of traversing an edge, non-negative
/// * `estimate_cost` - Admissible estimate of the remaining cost from a node
///
/// # Returns
///
/// `(total cost, path)` where the path runs from `start` to the goal, both
/// included; `None` if no goal is reachable.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::astar;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(i32, i32), u32>::new();
/// let a = g.add_node((0, 0));
/// let b = g.add_node((1, 0));
/// let c = g.add_node((2, 0));
/// g.add_edge(a, b, 1);
/// g.add_edge(b, c, 1);
/// g.add_edge(a, c, 5);
///
/// let goal = g[c];
/// let found = astar(&g, a, |n| n == c, |e| *e.weight(), |n| {
///     let (x, y) = g[n];
///     ((goal.0 - x).abs() + (goal.1 - y).abs()) as u32
/// });
/// assert_eq!(found, Some((2, vec![a, b, c])));
/// ```
pub fn astar<G, F, H, K, IsGoal>(
    graph: G,
    start: G::NodeId,
    mut is_goal: IsGoal,
    mut edge_cost: F,
    mut estimate_cost: H,
) -> Option<(K, Vec<G::NodeId>)>
where
    G: IntoEdges + Visitable,
    G::NodeId: Eq + Hash,
    IsGoal: FnMut(G::NodeId) -> bool,
    F: FnMut(EdgeRefOf<'_, G>) -> K,
    H: FnMut(G::NodeId) -> K,
    K: Measure + Copy,
{
    let mut visit_next = BinaryHeap::new();
    // cheapest known cost from the start
    let mut scores = HashMap::new();
    // best f-score a node has been expanded with
    let mut estimate_scores = HashMap::new();
    let mut path_tracker = PathTracker::new();

    let zero_score = K::default();
    scores.insert(start, zero_score);
    visit_next.push(MinScored(estimate_cost(start), start));

    while let Some(MinScored(estimate_score, node)) = visit_next.pop() {
        let Some(&node_score) = scores.get(&node) else {
            continue;
        };
        if is_goal(node) {
            let path = path_tracker.reconstruct_path_to(node);
            return Some((node_score, path));
        }

        match estimate_scores.entry(node) {
            Entry::Occupied(mut entry) => {
                // stale queue entry
                if *entry.get() <= estimate_score {
                    continue;
                }
                entry.insert(estimate_score);
            }
            Entry::Vacant(entry) => {
                entry.insert(estimate_score);
            }
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_score = node_score + edge_cost(edge);

            match scores.entry(next) {
                Entry::Occupied(mut entry) => {
                    if *entry.get() <= next_score {
                        continue;
                    }
                    entry.insert(next_score);
                }
                Entry::Vacant(entry) => {
                    entry.insert(next_score);
                }
            }

            path_tracker.set_predecessor(next, node);
            let next_estimate_score = next_score + estimate_cost(next);
            visit_next.push(MinScored(next_estimate_score, next));
        }
    }

    None
}

struct PathTracker<N> {
    came_from: HashMap<N, N>,
}

impl<N: Copy + Eq + Hash> PathTracker<N> {
    fn new() -> Self {
        PathTracker {
            came_from: HashMap::new(),
        }
    }

    fn set_predecessor(&mut self, node: N, previous: N) {
        self.came_from.insert(node, previous);
    }

    fn reconstruct_path_to(&self, last: N) -> Vec<N> {
        let mut path = vec![last];
        let mut current = last;
        while let Some(&previous) = self.came_from.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, NodeIndex};

    #[test]
    fn test_astar_zero_heuristic() {
        let mut g = DiGraph::<&str, u32>::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        let d = g.add_node("D");
        let e = g.add_node("E");
        let f = g.add_node("F");
        g.add_edge(a, b, 7);
        g.add_edge(c, a, 9);
        g.add_edge(a, d, 14);
        g.add_edge(b, c, 10);
        g.add_edge(d, c, 2);
        g.add_edge(d, e, 9);
        g.add_edge(b, f, 15);
        g.add_edge(c, f, 11);
        g.add_edge(e, f, 6);
        g.add_edge(c, a, 23);

        let path = astar(&g, a, |n| n == e, |e| *e.weight(), |_| 0);
        assert_eq!(path, Some((23, vec![a, d, e])));

        let unreachable = astar(&g, f, |n| n == a, |e| *e.weight(), |_| 0);
        assert_eq!(unreachable, None);
    }

    #[test]
    fn test_astar_edge_cost_calls() {
        let mut g = DiGraph::<&str, u32>::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        let d = g.add_node("D");
        let e = g.add_node("E");
        g.add_edge(a, b, 2);
        g.add_edge(a, c, 3);
        g.add_edge(b, d, 3);
        g.add_edge(c, d, 1);
        g.add_edge(d, e, 1);

        let mut times_called = 0;
        let found = astar(
            &g,
            a,
            |n| n == e,
            |edge| {
                times_called += 1;
                *edge.weight()
            },
            |_| 0,
        );
        assert_eq!(times_called, 5);
        assert_eq!(found, Some((5, vec![a, c, d, e])));
    }

    #[test]
    fn test_astar_grid_manhattan() {
        let cols = 5i32;
        let mut g = DiGraph::<(i32, i32), u32>::new();
        for y in 0..cols {
            for x in 0..cols {
                g.add_node((x, y));
            }
        }
        let at = |x: i32, y: i32| NodeIndex::new((y * cols + x) as usize);
        for y in 0..cols {
            for x in 0..cols {
                for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if (0..cols).contains(&nx) && (0..cols).contains(&ny) {
                        g.add_edge(at(x, y), at(nx, ny), 1);
                    }
                }
            }
        }

        let end = at(4, 4);
        let mut estimates = 0;
        let found = astar(&g, at(0, 0), |n| n == end, |e| *e.weight(), |n| {
            estimates += 1;
            let (x, y) = g[n];
            ((4 - x) + (4 - y)) as u32
        });
        let (cost, path) = found.unwrap();
        assert_eq!(cost, 8);
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&at(0, 0)));
        assert_eq!(path.last(), Some(&end));
        assert!(estimates < g.node_count() * 4);
    }
}
