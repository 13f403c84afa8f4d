//! Strongly connected components.
//!
//! A strongly connected component is a maximal set of nodes in which every
//! node can reach every other. Two algorithms are provided:
//!
//! - [`TarjanScc`] / [`tarjan_scc`] - one depth-first pass with O(V) extra
//!   space (Pearce's variant of Tarjan's algorithm), streaming each
//!   component to a callback as soon as it is complete
//! - [`kosaraju_scc`] - a post-order pass over the reversed graph followed
//!   by a pre-order pass over the graph
//!
//! # Use Cases
//!
//! - **Recursion detection**: mutually recursive functions share a component
//! - **Condensation**: collapsing every component to one node leaves a DAG
//! - **Dependency analysis**: circular dependencies form non-trivial components

use std::num::NonZeroUsize;

use tracing::debug;

use crate::visit::{
    Dfs, DfsPostOrder, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers, NodeIndexable,
    Reversed, VisitMap, Visitable,
};

#[derive(Copy, Clone, Debug)]
struct NodeData {
    /// Discovery index while the node is open, then the component number.
    rootindex: Option<NonZeroUsize>,
}

/// Reusable state for Tarjan's strongly connected components algorithm.
///
/// Running the algorithm through a `TarjanScc` instead of [`tarjan_scc`]
/// keeps its buffers between runs and lets the caller consume components one
/// at a time, and look up a node's component afterwards with
/// [`TarjanScc::node_component_index`].
///
/// The depth-first search keeps its own stack of open nodes, so deep graphs
/// do not exhaust the call stack.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::TarjanScc;
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), ()>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// g.add_edge(a, b, ());
/// g.add_edge(b, a, ());
/// g.add_edge(b, c, ());
///
/// let mut sizes = Vec::new();
/// let mut tarjan = TarjanScc::new();
/// tarjan.run(&g, |scc| sizes.push(scc.len()));
/// assert_eq!(sizes, vec![1, 2]);
/// assert_eq!(tarjan.node_component_index(&g, c), 0);
/// assert_eq!(tarjan.node_component_index(&g, a), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TarjanScc<N> {
    index: usize,
    componentcount: usize,
    nodes: Vec<NodeData>,
    stack: Vec<N>,
}

impl<N> Default for TarjanScc<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// An open node of the iterative search.
struct Frame<N, I> {
    node: N,
    neighbors: I,
    is_local_root: bool,
}

impl<N> TarjanScc<N> {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        TarjanScc {
            index: 1,
            componentcount: usize::MAX,
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }
}

impl<N: Copy + PartialEq> TarjanScc<N> {
    /// Computes the strongly connected components of `g`, calling `f` once
    /// per component.
    ///
    /// Components are reported in reverse topological order of the
    /// condensed graph: if an edge leads from component A to component B,
    /// B is reported first. The slice order within a component is
    /// unspecified.
    pub fn run<G, F>(&mut self, g: G, mut f: F)
    where
        G: IntoNodeIdentifiers<NodeId = N> + IntoNeighbors + NodeIndexable,
        F: FnMut(&[N]),
    {
        self.index = 1;
        self.componentcount = usize::MAX;
        self.nodes.clear();
        self.nodes
            .resize(g.node_bound(), NodeData { rootindex: None });

        for n in g.node_identifiers() {
            if self.nodes[g.to_index(n)].rootindex.is_none() {
                self.visit(n, &g, &mut f);
            }
        }

        debug_assert!(self.stack.is_empty());
    }

    fn visit<G, F>(&mut self, v: N, g: &G, f: &mut F)
    where
        G: IntoNeighbors<NodeId = N> + NodeIndexable,
        F: FnMut(&[N]),
    {
        self.discover(v, g);
        let mut frames = vec![Frame {
            node: v,
            neighbors: g.neighbors(v),
            is_local_root: true,
        }];

        while let Some(frame) = frames.last_mut() {
            if let Some(w) = frame.neighbors.next() {
                if self.nodes[g.to_index(w)].rootindex.is_none() {
                    self.discover(w, g);
                    frames.push(Frame {
                        node: w,
                        neighbors: g.neighbors(w),
                        is_local_root: true,
                    });
                } else {
                    self.absorb(frame.node, w, &mut frame.is_local_root, g);
                }
                continue;
            }

            let Some(done) = frames.pop() else { break };
            self.finish(done.node, done.is_local_root, g, f);
            if let Some(parent) = frames.last_mut() {
                self.absorb(parent.node, done.node, &mut parent.is_local_root, g);
            }
        }
    }

    fn discover<G: NodeIndexable<NodeId = N>>(&mut self, v: N, g: &G) {
        self.nodes[g.to_index(v)].rootindex = NonZeroUsize::new(self.index);
        self.index += 1;
    }

    /// Lowers `v`'s root index to `w`'s if `w` reaches further back.
    fn absorb<G: NodeIndexable<NodeId = N>>(
        &mut self,
        v: N,
        w: N,
        is_local_root: &mut bool,
        g: &G,
    ) {
        let w_root = self.nodes[g.to_index(w)].rootindex;
        let v_data = &mut self.nodes[g.to_index(v)];
        if w_root < v_data.rootindex {
            v_data.rootindex = w_root;
            *is_local_root = false;
        }
    }

    fn finish<G, F>(&mut self, v: N, is_local_root: bool, g: &G, f: &mut F)
    where
        G: NodeIndexable<NodeId = N>,
        F: FnMut(&[N]),
    {
        if !is_local_root {
            // kept until its root finishes; filled while backtracking
            self.stack.push(v);
            return;
        }

        let mut indexadjustment = 1;
        let component = NonZeroUsize::new(self.componentcount);
        let nodes = &mut self.nodes;
        let v_root = nodes[g.to_index(v)].rootindex;
        let start = self
            .stack
            .iter()
            .rposition(|&w| {
                let w_data = &mut nodes[g.to_index(w)];
                if v_root > w_data.rootindex {
                    true
                } else {
                    w_data.rootindex = component;
                    indexadjustment += 1;
                    false
                }
            })
            .map_or(0, |x| x + 1);
        nodes[g.to_index(v)].rootindex = component;

        self.stack.push(v);
        f(&self.stack[start..]);
        self.stack.truncate(start);
        self.index -= indexadjustment;
        self.componentcount -= 1;
    }

    /// Returns the component number of `v` after [`TarjanScc::run`].
    ///
    /// Components are numbered from 0 in the order they were reported.
    pub fn node_component_index<G>(&self, g: G, v: N) -> usize
    where
        G: NodeIndexable<NodeId = N>,
    {
        let rindex = self.nodes[g.to_index(v)]
            .rootindex
            .map_or(0, NonZeroUsize::get);
        debug_assert!(rindex != 0, "component index of an unvisited node");
        debug_assert!(
            rindex > self.componentcount,
            "node visited but not yet assigned to a component"
        );
        usize::MAX - rindex
    }
}

/// Computes the strongly connected components of `g` with Tarjan's
/// algorithm.
///
/// # Returns
///
/// One vector per component, in reverse topological order of the condensed
/// graph.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
pub fn tarjan_scc<G>(g: G) -> Vec<Vec<G::NodeId>>
where
    G: IntoNodeIdentifiers + IntoNeighbors + NodeIndexable,
{
    let mut sccs = Vec::new();
    let mut tarjan = TarjanScc::new();
    tarjan.run(g, |scc| sccs.push(scc.to_vec()));
    debug!(components = sccs.len(), "tarjan_scc");
    sccs
}

/// Computes the strongly connected components of `g` with Kosaraju's
/// algorithm.
///
/// The first pass records the post-order of a depth-first search over the
/// reversed graph, covering every node. The second pass walks the graph in
/// decreasing finish order; each tree it grows is one component.
///
/// # Returns
///
/// One vector per component, in reverse topological order of the condensed
/// graph, like [`tarjan_scc`]. Nodes within a component are in depth-first
/// pre-order.
///
/// # Examples
///
/// ```rust
/// use lindgraph::algo::kosaraju_scc;
/// use lindgraph::DiGraph;
///
/// let g = DiGraph::<(), ()>::from_edges([(0, 1), (1, 0), (1, 2)]);
/// let sccs = kosaraju_scc(&g);
/// assert_eq!(sccs.len(), 2);
/// assert_eq!(sccs[0], vec![lindgraph::NodeIndex::new(2)]);
/// assert_eq!(sccs[1].len(), 2);
/// ```
pub fn kosaraju_scc<G>(g: G) -> Vec<Vec<G::NodeId>>
where
    G: IntoNeighborsDirected + Visitable + IntoNodeIdentifiers,
{
    let mut dfs = DfsPostOrder::empty(&g);

    // first phase: finish order over the reversed graph
    let mut finish_order = Vec::new();
    for i in g.node_identifiers() {
        if dfs.discovered.is_visited(&i) {
            continue;
        }
        dfs.move_to(i);
        while let Some(nx) = dfs.next(Reversed(&g)) {
            finish_order.push(nx);
        }
    }

    // second phase: decreasing finish time over the graph itself
    let mut dfs = Dfs::from_parts(dfs.stack, dfs.discovered);
    dfs.reset(&g);
    let mut sccs = Vec::new();
    for i in finish_order.into_iter().rev() {
        if dfs.discovered.is_visited(&i) {
            continue;
        }
        dfs.move_to(i);
        let mut scc = Vec::new();
        while let Some(nx) = dfs.next(&g) {
            scc.push(nx);
        }
        sccs.push(scc);
    }
    debug!(components = sccs.len(), "kosaraju_scc");
    sccs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{DiGraph, NodeIndex, StableDiGraph, UnGraph},
        test::scc_graph,
        Directed,
    };

    fn normalized(mut sccs: Vec<Vec<NodeIndex>>) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = sccs
            .iter_mut()
            .map(|scc| {
                let mut ids: Vec<_> = scc.iter().map(|n| n.index()).collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        out.sort();
        out
    }

    fn expected_three_cycles() -> Vec<Vec<usize>> {
        vec![vec![0, 3, 6], vec![1, 4, 7], vec![2, 5, 8]]
    }

    #[test]
    fn test_kosaraju_three_cycles() {
        let g = scc_graph();
        assert_eq!(normalized(kosaraju_scc(&g)), expected_three_cycles());
        assert_eq!(
            normalized(kosaraju_scc(Reversed(&g))),
            expected_three_cycles()
        );
    }

    #[test]
    fn test_tarjan_three_cycles() {
        let g = scc_graph();
        assert_eq!(normalized(tarjan_scc(&g)), expected_three_cycles());
    }

    #[test]
    fn test_reverse_topological_order() {
        let g = scc_graph();
        // {1,4,7} -> {2,5,8} -> {0,3,6}
        let tarjan = normalized_in_order(tarjan_scc(&g));
        assert_eq!(tarjan, vec![vec![0, 3, 6], vec![2, 5, 8], vec![1, 4, 7]]);
        let kosaraju = normalized_in_order(kosaraju_scc(&g));
        assert_eq!(kosaraju, tarjan);
    }

    fn normalized_in_order(sccs: Vec<Vec<NodeIndex>>) -> Vec<Vec<usize>> {
        sccs.into_iter()
            .map(|scc| {
                let mut ids: Vec<_> = scc.into_iter().map(|n| n.index()).collect();
                ids.sort_unstable();
                ids
            })
            .collect()
    }

    #[test]
    fn test_self_loops_and_acyclic_singletons() {
        // each node is its own component, self-loop or not
        let mut g = DiGraph::<(), ()>::from_edges([(0, 0), (0, 1), (1, 2), (2, 2)]);
        g.add_node(());
        for sccs in [tarjan_scc(&g), kosaraju_scc(&g)] {
            assert_eq!(
                normalized(sccs),
                vec![vec![0], vec![1], vec![2], vec![3]]
            );
        }
    }

    #[test]
    fn test_undirected_components() {
        let g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (3, 4)]);
        let expected = vec![vec![0, 1, 2], vec![3, 4]];
        assert_eq!(normalized(tarjan_scc(&g)), expected);
        assert_eq!(normalized(kosaraju_scc(&g)), expected);
    }

    #[test]
    fn test_stable_graph_with_holes() {
        let mut g = StableDiGraph::<(), ()>::from_edges([(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
        g.remove_node(NodeIndex::new(1));
        let expected = vec![vec![0], vec![2, 3]];
        assert_eq!(normalized(tarjan_scc(&g)), expected);
        assert_eq!(normalized(kosaraju_scc(&g)), expected);
    }

    #[test]
    fn test_component_index_and_reuse() {
        let g = crate::Graph::<(), (), Directed>::from_edges([(0, 1), (1, 0), (2, 0)]);
        let mut tarjan = TarjanScc::new();
        let mut count = 0;
        tarjan.run(&g, |_| count += 1);
        assert_eq!(count, 2);
        let a = NodeIndex::new(0);
        let b = NodeIndex::new(1);
        let c = NodeIndex::new(2);
        assert_eq!(tarjan.node_component_index(&g, a), 0);
        assert_eq!(tarjan.node_component_index(&g, b), 0);
        assert_eq!(tarjan.node_component_index(&g, c), 1);

        // a second run starts numbering afresh
        tarjan.run(&g, |_| {});
        assert_eq!(tarjan.node_component_index(&g, c), 1);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let n = 50_000u32;
        let g = DiGraph::<(), ()>::from_edges((0..n - 1).map(|i| (i, i + 1)));
        assert_eq!(tarjan_scc(&g).len(), n as usize);
    }
}
