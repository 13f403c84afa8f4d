//! Event-driven depth-first search.
//!
//! [`depth_first_search`] reports every step of the walk to a visitor
//! closure as a [`DfsEvent`]. The visitor steers the walk through its return
//! value: continue, prune the subtree below the current node, or stop and
//! hand a value back to the caller.

use crate::visit::{IntoNeighbors, VisitMap, Visitable};

/// A step of [`depth_first_search`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DfsEvent<N> {
    /// A node is reached for the first time.
    Discover(N, Time),
    /// An edge leading to an undiscovered node; it becomes part of the
    /// depth-first forest.
    TreeEdge(N, N),
    /// An edge leading to a node that is still open, closing a cycle.
    BackEdge(N, N),
    /// An edge leading to a node that has already finished.
    CrossForwardEdge(N, N),
    /// All descendants of a node have finished.
    Finish(N, Time),
}

/// Discovery and finish stamp. Every event that carries one advances the
/// clock by one.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Time(pub usize);

impl Time {
    fn bump(&mut self) -> Time {
        let now = *self;
        self.0 += 1;
        now
    }
}

/// Visitor verdict for one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control<B> {
    /// Keep walking.
    Continue,
    /// Do not descend below the current node (on `Discover`) or across the
    /// current edge (on `TreeEdge`).
    ///
    /// Pruning a [`DfsEvent::Finish`] is a usage error and panics.
    Prune,
    /// Stop the walk and return this value.
    Break(B),
}

impl Control<()> {
    /// A `Break` without a payload.
    #[must_use]
    pub fn breaking() -> Control<()> {
        Control::Break(())
    }
}

impl<B> Control<B> {
    /// Returns the payload of a `Break`.
    pub fn break_value(self) -> Option<B> {
        match self {
            Control::Break(b) => Some(b),
            Control::Continue | Control::Prune => None,
        }
    }
}

/// Return types a [`depth_first_search`] visitor may use.
///
/// Implemented for `()` (always continue), [`Control`], and `Result`, where
/// `Err` breaks.
pub trait ControlFlow {
    /// The value that continues the walk.
    fn continuing() -> Self;
    /// Returns `true` if the walk must stop.
    fn should_break(&self) -> bool;
    /// Returns `true` if the current subtree must be skipped.
    fn should_prune(&self) -> bool;
}

impl ControlFlow for () {
    fn continuing() {}

    fn should_break(&self) -> bool {
        false
    }

    fn should_prune(&self) -> bool {
        false
    }
}

impl<B> ControlFlow for Control<B> {
    fn continuing() -> Self {
        Control::Continue
    }

    fn should_break(&self) -> bool {
        matches!(self, Control::Break(_))
    }

    fn should_prune(&self) -> bool {
        matches!(self, Control::Prune)
    }
}

impl<C: ControlFlow, E> ControlFlow for Result<C, E> {
    fn continuing() -> Self {
        Ok(C::continuing())
    }

    fn should_break(&self) -> bool {
        match self {
            Ok(c) => c.should_break(),
            Err(_) => true,
        }
    }

    fn should_prune(&self) -> bool {
        match self {
            Ok(c) => c.should_prune(),
            Err(_) => false,
        }
    }
}

/// Runs a depth-first search from each node of `starts` in turn and reports
/// every step to `visitor`.
///
/// Start nodes already discovered by an earlier start are skipped, so
/// passing every node identifier walks the whole graph once. The walk keeps
/// its own stack of open nodes and never recurses, so graph depth is not
/// bounded by the call stack.
///
/// # Arguments
///
/// * `graph` - The graph to walk
/// * `starts` - Roots of the depth-first forest, in order
/// * `visitor` - Receives each [`DfsEvent`]; its [`ControlFlow`] verdict steers the walk
///
/// # Returns
///
/// The first verdict that breaks, or the continuing value once every start
/// has been walked.
///
/// # Panics
///
/// Panics if the visitor prunes a [`DfsEvent::Finish`].
///
/// # Examples
///
/// ```rust
/// use lindgraph::visit::{depth_first_search, Control, DfsEvent};
/// use lindgraph::DiGraph;
///
/// let mut g = DiGraph::<(), ()>::new();
/// let a = g.add_node(());
/// let b = g.add_node(());
/// let c = g.add_node(());
/// g.add_edge(a, b, ());
/// g.add_edge(b, c, ());
/// g.add_edge(c, a, ());
///
/// let back_edge = depth_first_search(&g, Some(a), |event| match event {
///     DfsEvent::BackEdge(u, v) => Control::Break((u, v)),
///     _ => Control::Continue,
/// });
/// assert_eq!(back_edge.break_value(), Some((c, a)));
/// ```
pub fn depth_first_search<G, I, F, C>(graph: G, starts: I, mut visitor: F) -> C
where
    G: IntoNeighbors + Visitable,
    I: IntoIterator<Item = G::NodeId>,
    F: FnMut(DfsEvent<G::NodeId>) -> C,
    C: ControlFlow,
{
    let mut time = Time::default();
    let mut discovered = graph.visit_map();
    let mut finished = graph.visit_map();

    for start in starts {
        let verdict = walk_from(
            &graph,
            start,
            &mut visitor,
            &mut discovered,
            &mut finished,
            &mut time,
        );
        if verdict.should_break() {
            return verdict;
        }
    }
    C::continuing()
}

fn walk_from<G, F, C>(
    graph: &G,
    start: G::NodeId,
    visitor: &mut F,
    discovered: &mut G::Map,
    finished: &mut G::Map,
    time: &mut Time,
) -> C
where
    G: IntoNeighbors + Visitable,
    F: FnMut(DfsEvent<G::NodeId>) -> C,
    C: ControlFlow,
{
    if !discovered.visit(start) {
        return C::continuing();
    }
    let verdict = visitor(DfsEvent::Discover(start, time.bump()));
    if verdict.should_break() {
        return verdict;
    }

    // open nodes with their unexamined neighbors; `None` once pruned
    let mut stack = vec![(start, (!verdict.should_prune()).then(|| graph.neighbors(start)))];

    while let Some((node, children)) = stack.last_mut() {
        let u = *node;
        match children.as_mut().and_then(Iterator::next) {
            Some(v) if !discovered.is_visited(&v) => {
                let verdict = visitor(DfsEvent::TreeEdge(u, v));
                if verdict.should_break() {
                    return verdict;
                }
                if verdict.should_prune() {
                    continue;
                }
                discovered.visit(v);
                let verdict = visitor(DfsEvent::Discover(v, time.bump()));
                if verdict.should_break() {
                    return verdict;
                }
                stack.push((v, (!verdict.should_prune()).then(|| graph.neighbors(v))));
            }
            Some(v) => {
                let event = if finished.is_visited(&v) {
                    DfsEvent::CrossForwardEdge(u, v)
                } else {
                    DfsEvent::BackEdge(u, v)
                };
                let verdict = visitor(event);
                if verdict.should_break() {
                    return verdict;
                }
            }
            None => {
                stack.pop();
                finished.visit(u);
                let verdict = visitor(DfsEvent::Finish(u, time.bump()));
                if verdict.should_break() {
                    return verdict;
                }
                assert!(
                    !verdict.should_prune(),
                    "depth_first_search: pruning on DfsEvent::Finish is not supported"
                );
            }
        }
    }
    C::continuing()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, NodeIndex};

    fn chain_with_shortcut() -> (DiGraph<(), ()>, [NodeIndex; 3]) {
        let mut g = DiGraph::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, c, ());
        g.add_edge(b, c, ());
        g.add_edge(a, b, ());
        (g, [a, b, c])
    }

    #[test]
    fn test_event_sequence() {
        let (g, [a, b, c]) = chain_with_shortcut();
        let mut events = Vec::new();
        depth_first_search(&g, Some(a), |e| events.push(e));

        // neighbors(a) yields b before c
        assert_eq!(
            events,
            vec![
                DfsEvent::Discover(a, Time(0)),
                DfsEvent::TreeEdge(a, b),
                DfsEvent::Discover(b, Time(1)),
                DfsEvent::TreeEdge(b, c),
                DfsEvent::Discover(c, Time(2)),
                DfsEvent::Finish(c, Time(3)),
                DfsEvent::Finish(b, Time(4)),
                DfsEvent::CrossForwardEdge(a, c),
                DfsEvent::Finish(a, Time(5)),
            ]
        );
    }

    #[test]
    fn test_back_edge_and_restarts() {
        let mut g = DiGraph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let lone = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(b, a, ());

        let mut back = Vec::new();
        let mut discovered = Vec::new();
        depth_first_search(&g, [a, b, lone], |e| match e {
            DfsEvent::BackEdge(u, v) => back.push((u, v)),
            DfsEvent::Discover(n, _) => discovered.push(n),
            _ => {}
        });
        assert_eq!(back, vec![(b, a)]);
        assert_eq!(discovered, vec![a, b, lone]);
    }

    #[test]
    fn test_prune_on_discover() {
        let (g, [a, b, c]) = chain_with_shortcut();
        let mut finished = Vec::new();
        depth_first_search(&g, Some(a), |e| {
            match e {
                DfsEvent::Discover(n, _) if n == b => return Control::<()>::Prune,
                DfsEvent::Finish(n, _) => finished.push(n),
                _ => {}
            }
            Control::Continue
        });
        // c is still reached through a's own edge
        assert_eq!(finished, vec![b, c, a]);
    }

    #[test]
    fn test_prune_tree_edge_skips_child() {
        let (g, [a, _, c]) = chain_with_shortcut();
        let mut seen = Vec::new();
        depth_first_search(&g, Some(a), |e| {
            match e {
                DfsEvent::TreeEdge(_, v) if v == c => return Control::<()>::Prune,
                DfsEvent::Discover(n, _) => seen.push(n),
                _ => {}
            }
            Control::Continue
        });
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_result_breaks_on_err() {
        let (g, [a, b, _]) = chain_with_shortcut();
        let outcome: Result<(), NodeIndex> = depth_first_search(&g, Some(a), |e| match e {
            DfsEvent::Discover(n, _) if n == b => Err(n),
            _ => Ok(()),
        });
        assert_eq!(outcome, Err(b));
        assert_eq!(Control::breaking().break_value(), Some(()));
    }

    #[test]
    #[should_panic(expected = "pruning on DfsEvent::Finish")]
    fn test_prune_on_finish_panics() {
        let (g, [a, _, _]) = chain_with_shortcut();
        depth_first_search(&g, Some(a), |e| match e {
            DfsEvent::Finish(..) => Control::<()>::Prune,
            _ => Control::Continue,
        });
    }
}
