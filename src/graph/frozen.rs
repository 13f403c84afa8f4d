//! A structure-locked view of a graph.

use std::ops::{Deref, Index, IndexMut};

/// A mutable borrow of a graph that permits changing weights but not
/// structure.
///
/// Handed to the predicates of `retain_nodes` / `retain_edges`: the caller
/// may read anything and write weights through `IndexMut`, while node and
/// edge indices stay valid for the duration of the call.
pub struct Frozen<'a, G: 'a>(&'a mut G);

impl<'a, G> Frozen<'a, G> {
    /// Wraps a mutable borrow.
    pub fn new(gr: &'a mut G) -> Self {
        Frozen(gr)
    }
}

impl<G> Deref for Frozen<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.0
    }
}

impl<G, I> Index<I> for Frozen<'_, G>
where
    G: Index<I>,
{
    type Output = G::Output;

    fn index(&self, i: I) -> &G::Output {
        self.0.index(i)
    }
}

impl<G, I> IndexMut<I> for Frozen<'_, G>
where
    G: IndexMut<I>,
{
    fn index_mut(&mut self, i: I) -> &mut G::Output {
        self.0.index_mut(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiGraph, NodeIndex};

    #[test]
    fn test_frozen_reads_and_writes_weights() {
        let mut g = DiGraph::<i32, ()>::new();
        let a = g.add_node(1);
        let b = g.add_node(2);
        g.add_edge(a, b, ());

        let mut frozen = Frozen::new(&mut g);
        frozen[b] *= 10;
        assert_eq!(frozen.node_count(), 2);
        assert_eq!(frozen.neighbors(a).collect::<Vec<NodeIndex>>(), vec![b]);
        assert_eq!(g[b], 20);
    }
}
