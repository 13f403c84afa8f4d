//! Resumable graph walkers.
//!
//! Every walker is a plain state machine: a frontier (stack or queue) plus
//! one or two visit maps. The graph is passed to each `next` call rather
//! than stored, so a walk can be paused, the graph's weights edited, and the
//! walk resumed.
//!
//! # Walkers
//!
//! - [`Dfs`] - depth-first pre-order; marks a node when it is popped
//! - [`Bfs`] - breadth-first order; marks a node when it is queued
//! - [`DfsPostOrder`] - depth-first post-order; yields a node after all of
//!   its descendants
//! - [`Topo`] - topological order of an acyclic graph
//!
//! None of them looks past the nodes reachable from their start nodes.
//! Walking every component means seeding each one with `move_to`.

use std::collections::VecDeque;

use crate::{
    graph::Direction,
    visit::{
        IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers, Reversed, VisitMap,
        Visitable,
    },
};

/// A traversal that is stepped with an explicit context.
///
/// The context is usually a graph reference. [`Walker::iter`] binds the
/// context once and turns the walker into an ordinary [`Iterator`].
pub trait Walker<Context> {
    /// The type yielded by each step.
    type Item;

    /// Advances the walk.
    fn walk_next(&mut self, context: Context) -> Option<Self::Item>;

    /// Binds `context` and returns an iterator over the remaining steps.
    fn iter(self, context: Context) -> WalkerIter<Self, Context>
    where
        Self: Sized,
        Context: Clone,
    {
        WalkerIter {
            walker: self,
            context,
        }
    }
}

/// A [`Walker`] bound to its context.
#[derive(Clone, Debug)]
pub struct WalkerIter<W, C> {
    walker: W,
    context: C,
}

impl<W, C: Clone> WalkerIter<W, C> {
    /// Returns the bound context.
    pub fn context(&self) -> C {
        self.context.clone()
    }

    /// Returns the underlying walker.
    pub fn inner_ref(&self) -> &W {
        &self.walker
    }

    /// Returns the underlying walker mutably.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.walker
    }
}

impl<W, C> Iterator for WalkerIter<W, C>
where
    W: Walker<C>,
    C: Clone,
{
    type Item = W::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.walk_next(self.context.clone())
    }
}

/// Depth-first search in pre-order.
///
/// A node is marked discovered when it is popped from the stack, so a node
/// pushed twice via two parents is yielded once. Neighbors are pushed in
/// the order the graph reports them, which means the most recently pushed
/// neighbor is explored first.
///
/// # Type Parameters
///
/// * `N` - Node identifier type of the graph
/// * `VM` - Visit map of the graph, see [`Visitable`]
///
/// # Examples
///
/// ```rust
/// use lindgraph::visit::Dfs;
/// use lindgraph::DiGraph;
///
/// let mut graph = DiGraph::<&str, ()>::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// let c = graph.add_node("C");
/// graph.add_edge(a, b, ());
/// graph.add_edge(b, c, ());
///
/// let mut dfs = Dfs::new(&graph, a);
/// let mut order = Vec::new();
/// while let Some(node) = dfs.next(&graph) {
///     order.push(graph[node]);
/// }
/// assert_eq!(order, ["A", "B", "C"]);
/// ```
#[derive(Clone, Debug)]
pub struct Dfs<N, VM> {
    /// Nodes still to be examined.
    pub stack: Vec<N>,
    /// Nodes already yielded.
    pub discovered: VM,
}

impl<N: Copy + PartialEq, VM: VisitMap<N>> Dfs<N, VM> {
    /// Creates a walk starting at `start`.
    pub fn new<G>(graph: G, start: N) -> Self
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        let mut dfs = Dfs::empty(graph);
        dfs.move_to(start);
        dfs
    }

    /// Creates a walk from an existing frontier and visit map.
    pub fn from_parts(stack: Vec<N>, discovered: VM) -> Self {
        Dfs { stack, discovered }
    }

    /// Creates a walk with an empty frontier.
    pub fn empty<G>(graph: G) -> Self
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        Dfs {
            stack: Vec::new(),
            discovered: graph.visit_map(),
        }
    }

    /// Clears the frontier and the discovered set, resizing the latter to
    /// the current graph.
    pub fn reset<G>(&mut self, graph: G)
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        graph.reset_map(&mut self.discovered);
        self.stack.clear();
    }

    /// Restarts the frontier at `start`, keeping the discovered set.
    pub fn move_to(&mut self, start: N) {
        self.stack.clear();
        self.stack.push(start);
    }

    /// Returns the next node in pre-order, or `None` once the frontier is
    /// exhausted.
    pub fn next<G>(&mut self, graph: G) -> Option<N>
    where
        G: IntoNeighbors<NodeId = N>,
    {
        while let Some(node) = self.stack.pop() {
            if self.discovered.visit(node) {
                for succ in graph.neighbors(node) {
                    if !self.discovered.is_visited(&succ) {
                        self.stack.push(succ);
                    }
                }
                return Some(node);
            }
        }
        None
    }
}

impl<G> Walker<G> for Dfs<G::NodeId, G::Map>
where
    G: IntoNeighbors + Visitable,
{
    type Item = G::NodeId;

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}

/// Depth-first search in post-order.
///
/// A node stays on the stack while its descendants are explored and is
/// yielded on its second visit, after every descendant has been yielded.
#[derive(Clone, Debug)]
pub struct DfsPostOrder<N, VM> {
    /// Nodes still to be examined or finished.
    pub stack: Vec<N>,
    /// Nodes whose descendants have been pushed.
    pub discovered: VM,
    /// Nodes already yielded.
    pub finished: VM,
}

impl<N: Copy + PartialEq, VM: VisitMap<N>> DfsPostOrder<N, VM> {
    /// Creates a walk starting at `start`.
    pub fn new<G>(graph: G, start: N) -> Self
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        let mut dfs = DfsPostOrder::empty(graph);
        dfs.move_to(start);
        dfs
    }

    /// Creates a walk with an empty frontier.
    pub fn empty<G>(graph: G) -> Self
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        DfsPostOrder {
            stack: Vec::new(),
            discovered: graph.visit_map(),
            finished: graph.visit_map(),
        }
    }

    /// Clears the frontier and both visit maps.
    pub fn reset<G>(&mut self, graph: G)
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        graph.reset_map(&mut self.discovered);
        graph.reset_map(&mut self.finished);
        self.stack.clear();
    }

    /// Restarts the frontier at `start`, keeping both visit maps.
    pub fn move_to(&mut self, start: N) {
        self.stack.clear();
        self.stack.push(start);
    }

    /// Returns the next node in post-order.
    pub fn next<G>(&mut self, graph: G) -> Option<N>
    where
        G: IntoNeighbors<NodeId = N>,
    {
        while let Some(&node) = self.stack.last() {
            if self.discovered.visit(node) {
                for succ in graph.neighbors(node) {
                    if !self.discovered.is_visited(&succ) {
                        self.stack.push(succ);
                    }
                }
            } else {
                self.stack.pop();
                if self.finished.visit(node) {
                    return Some(node);
                }
            }
        }
        None
    }
}

impl<G> Walker<G> for DfsPostOrder<G::NodeId, G::Map>
where
    G: IntoNeighbors + Visitable,
{
    type Item = G::NodeId;

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}

/// Breadth-first search.
///
/// The start node is marked discovered on construction and every other node
/// when it is queued, so no node enters the queue twice.
///
/// # Examples
///
/// ```rust
/// use lindgraph::visit::Bfs;
/// use lindgraph::DiGraph;
///
/// let mut graph = DiGraph::<u32, ()>::new();
/// let root = graph.add_node(0);
/// let left = graph.add_node(1);
/// let right = graph.add_node(1);
/// let leaf = graph.add_node(2);
/// graph.add_edge(root, left, ());
/// graph.add_edge(root, right, ());
/// graph.add_edge(left, leaf, ());
/// graph.add_edge(right, leaf, ());
///
/// let mut bfs = Bfs::new(&graph, root);
/// let mut depths = Vec::new();
/// while let Some(node) = bfs.next(&graph) {
///     depths.push(graph[node]);
/// }
/// assert_eq!(depths, [0, 1, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Bfs<N, VM> {
    /// Nodes queued for examination.
    pub stack: VecDeque<N>,
    /// Nodes already queued.
    pub discovered: VM,
}

impl<N: Copy + PartialEq, VM: VisitMap<N>> Bfs<N, VM> {
    /// Creates a walk starting at `start`.
    pub fn new<G>(graph: G, start: N) -> Self
    where
        G: Visitable<NodeId = N, Map = VM>,
    {
        let mut discovered = graph.visit_map();
        discovered.visit(start);
        let mut stack = VecDeque::new();
        stack.push_front(start);
        Bfs { stack, discovered }
    }

    /// Returns the next node in breadth-first order.
    pub fn next<G>(&mut self, graph: G) -> Option<N>
    where
        G: IntoNeighbors<NodeId = N>,
    {
        let node = self.stack.pop_front()?;
        for succ in graph.neighbors(node) {
            if self.discovered.visit(succ) {
                self.stack.push_back(succ);
            }
        }
        Some(node)
    }
}

impl<G> Walker<G> for Bfs<G::NodeId, G::Map>
where
    G: IntoNeighbors + Visitable,
{
    type Item = G::NodeId;

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}

/// Topological order.
///
/// Starts from every node without incoming edges. A successor joins the
/// frontier once all of its predecessors have been yielded. Nodes on a
/// cycle, and nodes reachable only through one, are never yielded.
///
/// # Examples
///
/// ```rust
/// use lindgraph::visit::Topo;
/// use lindgraph::DiGraph;
///
/// let mut graph = DiGraph::<&str, ()>::new();
/// let shirt = graph.add_node("shirt");
/// let tie = graph.add_node("tie");
/// let jacket = graph.add_node("jacket");
/// graph.add_edge(tie, jacket, ());
/// graph.add_edge(shirt, tie, ());
///
/// let mut topo = Topo::new(&graph);
/// let mut order = Vec::new();
/// while let Some(node) = topo.next(&graph) {
///     order.push(graph[node]);
/// }
/// assert_eq!(order, ["shirt", "tie", "jacket"]);
/// ```
#[derive(Clone, Debug)]
pub struct Topo<N, VM> {
    tovisit: Vec<N>,
    ordered: VM,
}

impl<N: Copy + PartialEq, VM: VisitMap<N>> Topo<N, VM> {
    /// Creates a walk seeded with every node that has no incoming edge.
    pub fn new<G>(graph: G) -> Self
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected + Visitable<NodeId = N, Map = VM>,
    {
        let mut topo = Topo {
            tovisit: Vec::new(),
            ordered: graph.visit_map(),
        };
        topo.extend_with_initials(&graph);
        topo
    }

    /// Creates a walk seeded with `initials`.
    ///
    /// The initial nodes are yielded even if they have predecessors.
    pub fn with_initials<G, I>(graph: G, initials: I) -> Self
    where
        G: IntoNeighborsDirected + Visitable<NodeId = N, Map = VM>,
        I: IntoIterator<Item = N>,
    {
        Topo {
            tovisit: initials.into_iter().collect(),
            ordered: graph.visit_map(),
        }
    }

    fn extend_with_initials<G>(&mut self, graph: &G)
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected<NodeId = N>,
    {
        self.tovisit.extend(
            graph
                .node_identifiers()
                .filter(|&a| graph.neighbors_directed(a, Direction::Incoming).next().is_none()),
        );
    }

    /// Clears the ordered set and reseeds the frontier.
    pub fn reset<G>(&mut self, graph: G)
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected + Visitable<NodeId = N, Map = VM>,
    {
        graph.reset_map(&mut self.ordered);
        self.tovisit.clear();
        self.extend_with_initials(&graph);
    }

    /// Returns the next node in topological order.
    pub fn next<G>(&mut self, graph: G) -> Option<N>
    where
        G: IntoNeighborsDirected<NodeId = N>,
    {
        while let Some(node) = self.tovisit.pop() {
            if !self.ordered.visit(node) {
                continue;
            }
            let preds = Reversed(&graph);
            for succ in graph.neighbors(node) {
                if preds.neighbors(succ).all(|p| self.ordered.is_visited(&p)) {
                    self.tovisit.push(succ);
                }
            }
            return Some(node);
        }
        None
    }
}

impl<G> Walker<G> for Topo<G::NodeId, G::Map>
where
    G: IntoNeighborsDirected + Visitable,
{
    type Item = G::NodeId;

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}
