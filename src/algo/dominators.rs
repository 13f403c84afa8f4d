//! Dominator trees.
//!
//! A node `d` **dominates** a node `n` if every path from the root to `n`
//! passes through `d`. Every node dominates itself. The **immediate
//! dominator** of `n` is the unique strict dominator of `n` that every other
//! strict dominator of `n` also dominates. Linking each node to its
//! immediate dominator forms the dominator tree, rooted at the root.
//!
//! # Algorithm
//!
//! [`simple_fast`] implements the iterative algorithm of Cooper, Harvey and
//! Kennedy ("A Simple, Fast Dominance Algorithm"). Nodes are numbered in
//! depth-first post-order; the dominator of each node is refined, in
//! reverse post-order, to the nearest common ancestor of its already
//! resolved predecessors until nothing changes. On reducible graphs this
//! converges in two or three rounds.

use std::{
    collections::{hash_map, HashMap, HashSet},
    hash::Hash,
};

use tracing::debug;

use crate::visit::{DfsPostOrder, GraphBase, IntoNeighbors, Visitable, Walker};

/// The dominator tree of a rooted graph, computed by [`simple_fast`].
///
/// Only nodes reachable from the root are part of the tree. Every query on
/// another node reports absence.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::dominators::simple_fast;
/// use lindgraph::DiGraph;
///
/// // entry -> a -> exit, entry -> b -> exit
/// let mut g = DiGraph::<&str, ()>::new();
/// let entry = g.add_node("entry");
/// let a = g.add_node("a");
/// let b = g.add_node("b");
/// let exit = g.add_node("exit");
/// g.add_edge(entry, a, ());
/// g.add_edge(entry, b, ());
/// g.add_edge(a, exit, ());
/// g.add_edge(b, exit, ());
///
/// let doms = simple_fast(&g, entry);
/// assert_eq!(doms.immediate_dominator(exit), Some(entry));
/// assert!(doms.dominates(entry, a));
/// assert!(!doms.dominates(a, exit));
/// ```
#[derive(Debug, Clone)]
pub struct Dominators<N>
where
    N: Copy + Eq + Hash,
{
    root: N,
    /// Immediate dominator of every reachable node; the root maps to itself.
    dominators: HashMap<N, N>,
}

impl<N> Dominators<N>
where
    N: Copy + Eq + Hash,
{
    pub(crate) fn new(root: N, dominators: HashMap<N, N>) -> Self {
        Dominators { root, dominators }
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> N {
        self.root
    }

    /// Returns the immediate dominator of `node`.
    ///
    /// `None` for the root and for nodes unreachable from it.
    pub fn immediate_dominator(&self, node: N) -> Option<N> {
        if node == self.root {
            None
        } else {
            self.dominators.get(&node).copied()
        }
    }

    /// Returns the strict dominators of `node`, nearest first, ending with
    /// the root.
    ///
    /// `None` if `node` is unreachable from the root.
    pub fn strict_dominators(&self, node: N) -> Option<DominatorsIter<'_, N>> {
        if self.dominators.contains_key(&node) {
            Some(DominatorsIter {
                dominators: self,
                node: self.immediate_dominator(node),
            })
        } else {
            None
        }
    }

    /// Returns the dominators of `node`: `node` itself, then its strict
    /// dominators.
    ///
    /// `None` if `node` is unreachable from the root.
    pub fn dominators(&self, node: N) -> Option<DominatorsIter<'_, N>> {
        if self.dominators.contains_key(&node) {
            Some(DominatorsIter {
                dominators: self,
                node: Some(node),
            })
        } else {
            None
        }
    }

    /// Returns the nodes whose immediate dominator is `node`, in arbitrary
    /// order.
    ///
    /// This scans the whole tree.
    pub fn immediately_dominated_by(&self, node: N) -> DominatedByIter<'_, N> {
        DominatedByIter {
            iter: self.dominators.iter(),
            node,
        }
    }

    /// Returns `true` if `a` dominates `b`. A reachable node dominates
    /// itself.
    ///
    /// # Complexity
    ///
    /// O(depth) where depth is the depth of `b` in the dominator tree.
    pub fn dominates(&self, a: N, b: N) -> bool {
        self.dominators(b)
            .is_some_and(|mut chain| chain.any(|d| d == a))
    }
}

/// Walks up the dominator tree, see [`Dominators::dominators`].
#[derive(Debug, Clone)]
pub struct DominatorsIter<'a, N>
where
    N: Copy + Eq + Hash,
{
    dominators: &'a Dominators<N>,
    node: Option<N>,
}

impl<N> Iterator for DominatorsIter<'_, N>
where
    N: Copy + Eq + Hash,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.node.take();
        if let Some(next) = next {
            self.node = self.dominators.immediate_dominator(next);
        }
        next
    }
}

/// Children of a node in the dominator tree, see
/// [`Dominators::immediately_dominated_by`].
#[derive(Debug, Clone)]
pub struct DominatedByIter<'a, N>
where
    N: Copy + Eq + Hash,
{
    iter: hash_map::Iter<'a, N, N>,
    node: N,
}

impl<N> Iterator for DominatedByIter<'_, N>
where
    N: Copy + Eq + Hash,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node;
        self.iter
            .by_ref()
            .find_map(|(&child, &dominator)| (dominator == node && child != node).then_some(child))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.iter.size_hint();
        (0, upper)
    }
}

/// Marks a post-order slot whose dominator is not known yet.
const UNDEFINED: usize = usize::MAX;

/// Computes the dominator tree of the part of `graph` reachable from `root`.
///
/// # Panics
///
/// Panics if a non-root node has no predecessor with a known dominator,
/// which cannot happen for nodes found by the depth-first search from
/// `root`.
///
/// # Complexity
///
/// O(V + E) per round; the number of rounds is bounded by the loop nesting
/// depth of the graph plus two.
pub fn simple_fast<G>(graph: G, root: G::NodeId) -> Dominators<G::NodeId>
where
    G: IntoNeighbors + Visitable,
    G::NodeId: Eq + Hash,
{
    let (post_order, predecessor_sets) = simple_fast_post_order(&graph, root);
    let length = post_order.len();
    debug_assert!(length > 0);
    debug_assert!(post_order.last() == Some(&root));

    // post-order index of each node; the root has the highest
    let node_to_post_order_idx: HashMap<_, _> = post_order
        .iter()
        .enumerate()
        .map(|(idx, &node)| (node, idx))
        .collect();

    let idx_to_predecessor_vec =
        predecessor_sets_to_idx_vecs(&post_order, &node_to_post_order_idx, predecessor_sets);

    let mut dominators = vec![UNDEFINED; length];
    dominators[length - 1] = length - 1;

    let mut rounds = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;

        // reverse post-order, skipping the root
        for idx in (0..length - 1).rev() {
            debug_assert!(post_order[idx] != root);

            let new_idom_idx = {
                let mut predecessors = idx_to_predecessor_vec[idx]
                    .iter()
                    .copied()
                    .filter(|&p| dominators[p] != UNDEFINED);
                let Some(first) = predecessors.next() else {
                    panic!(
                        "simple_fast: node without a predecessor that has a dominator; \
                         the root dominates itself and starts every path, so this cannot happen"
                    );
                };
                predecessors.fold(first, |new_idom_idx, predecessor_idx| {
                    intersect(&dominators, new_idom_idx, predecessor_idx)
                })
            };

            debug_assert!(new_idom_idx < length);

            if new_idom_idx != dominators[idx] {
                dominators[idx] = new_idom_idx;
                changed = true;
            }
        }
    }

    debug_assert!(!dominators.iter().any(|&dom| dom == UNDEFINED));
    debug!(nodes = length, rounds, "simple_fast: dominators converged");

    Dominators::new(
        root,
        dominators
            .into_iter()
            .enumerate()
            .map(|(idx, dom_idx)| (post_order[idx], post_order[dom_idx]))
            .collect(),
    )
}

/// Walks both fingers up the tree until they meet. Post-order indices grow
/// towards the root, so the smaller finger is always the one to move.
fn intersect(dominators: &[usize], mut finger1: usize, mut finger2: usize) -> usize {
    loop {
        match finger1.cmp(&finger2) {
            std::cmp::Ordering::Less => finger1 = dominators[finger1],
            std::cmp::Ordering::Greater => finger2 = dominators[finger2],
            std::cmp::Ordering::Equal => return finger1,
        }
    }
}

fn predecessor_sets_to_idx_vecs<N>(
    post_order: &[N],
    node_to_post_order_idx: &HashMap<N, usize>,
    mut predecessor_sets: HashMap<N, HashSet<N>>,
) -> Vec<Vec<usize>>
where
    N: Copy + Eq + Hash,
{
    post_order
        .iter()
        .map(|node| {
            predecessor_sets
                .remove(node)
                .map(|predecessors| {
                    predecessors
                        .into_iter()
                        .filter_map(|p| node_to_post_order_idx.get(&p).copied())
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect()
}

type PredecessorSets<NodeId> = HashMap<NodeId, HashSet<NodeId>>;

fn simple_fast_post_order<G>(
    graph: &G,
    root: G::NodeId,
) -> (Vec<G::NodeId>, PredecessorSets<G::NodeId>)
where
    G: IntoNeighbors + Visitable,
    <G as GraphBase>::NodeId: Eq + Hash,
{
    let mut post_order = vec![];
    let mut predecessor_sets: PredecessorSets<G::NodeId> = HashMap::new();

    for node in DfsPostOrder::new(graph, root).iter(graph) {
        post_order.push(node);

        for successor in graph.neighbors(node) {
            predecessor_sets
                .entry(successor)
                .or_default()
                .insert(node);
        }
    }

    (post_order, predecessor_sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, DiGraphMap, NodeIndex};

    #[test]
    fn test_iter_dominators() {
        let doms: Dominators<u32> = Dominators::new(0, [(2, 1), (1, 0), (0, 0)].into_iter().collect());

        let all_doms: Vec<_> = doms.dominators(2).unwrap().collect();
        assert_eq!(all_doms, vec![2, 1, 0]);
        assert!(doms.dominators(99).is_none());

        let strict_doms: Vec<_> = doms.strict_dominators(2).unwrap().collect();
        assert_eq!(strict_doms, vec![1, 0]);
        assert!(doms.strict_dominators(99).is_none());

        let dom_by: Vec<_> = doms.immediately_dominated_by(1).collect();
        assert_eq!(dom_by, vec![2]);
        assert_eq!(doms.immediately_dominated_by(99).count(), 0);
        assert_eq!(doms.immediately_dominated_by(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_simple_fast_with_loop() {
        // 0 -> 1 -> 2 -> 3, 2 -> 1, 0 -> 4 -> 3, 5 unreachable
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3), (2, 1), (0, 4), (4, 3), (5, 3)]);
        let n = NodeIndex::new;
        let doms = simple_fast(&g, n(0));

        assert_eq!(doms.root(), n(0));
        assert_eq!(doms.immediate_dominator(n(0)), None);
        assert_eq!(doms.immediate_dominator(n(1)), Some(n(0)));
        assert_eq!(doms.immediate_dominator(n(2)), Some(n(1)));
        assert_eq!(doms.immediate_dominator(n(3)), Some(n(0)));
        assert_eq!(doms.immediate_dominator(n(4)), Some(n(0)));
        assert_eq!(doms.immediate_dominator(n(5)), None);
        assert!(doms.dominators(n(5)).is_none());

        let mut children: Vec<_> = doms.immediately_dominated_by(n(0)).collect();
        children.sort();
        assert_eq!(children, vec![n(1), n(3), n(4)]);

        assert!(doms.dominates(n(1), n(2)));
        assert!(doms.dominates(n(2), n(2)));
        assert!(!doms.dominates(n(2), n(1)));
        assert!(!doms.dominates(n(0), n(5)));
    }

    #[test]
    fn test_simple_fast_irreducible() {
        // the two-entry loop 1 <-> 2 is dominated only by the root
        let g = DiGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 2), (2, 1), (2, 3)]);
        let n = NodeIndex::new;
        let doms = simple_fast(&g, n(0));
        assert_eq!(doms.immediate_dominator(n(1)), Some(n(0)));
        assert_eq!(doms.immediate_dominator(n(2)), Some(n(0)));
        assert_eq!(doms.immediate_dominator(n(3)), Some(n(2)));
        let chain: Vec<_> = doms.dominators(n(3)).unwrap().collect();
        assert_eq!(chain, vec![n(3), n(2), n(0)]);
    }

    #[test]
    fn test_single_node() {
        let mut g = DiGraph::<(), ()>::new();
        let root = g.add_node(());
        g.add_edge(root, root, ());
        let doms = simple_fast(&g, root);
        assert_eq!(doms.dominators(root).unwrap().collect::<Vec<_>>(), vec![root]);
        assert_eq!(doms.strict_dominators(root).unwrap().count(), 0);
        assert_eq!(doms.immediately_dominated_by(root).count(), 0);
    }

    #[test]
    fn test_simple_fast_on_keyed_nodes() {
        // "join" has two predecessors, so its set merges both branches
        let g = DiGraphMap::<&str, ()>::from_edges([
            ("entry", "left"),
            ("entry", "right"),
            ("left", "join"),
            ("right", "join"),
            ("join", "exit"),
        ]);
        let doms = simple_fast(&g, "entry");
        assert_eq!(doms.immediate_dominator("join"), Some("entry"));
        assert_eq!(doms.immediate_dominator("exit"), Some("join"));
        let chain: Vec<_> = doms.dominators("exit").unwrap().collect();
        assert_eq!(chain, vec!["exit", "join", "entry"]);
        assert!(doms.dominators("nowhere").is_none());
    }
}
