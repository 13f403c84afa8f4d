//! Node and edge identifiers for the index-based graph containers.
//!
//! [`NodeIndex`] and [`EdgeIndex`] are strongly-typed wrappers around an
//! unsigned integer of configurable width ([`IndexType`]). The width bounds the
//! size of a graph and the memory spent per adjacency link: the default `u32`
//! keeps node and edge records compact while addressing four billion elements.
//!
//! The maximum value of every index type is reserved as the end-of-list
//! sentinel ([`NodeIndex::end`], [`EdgeIndex::end`]) used by the intrusive
//! adjacency lists.

use std::{fmt, hash::Hash};

/// The default integer type for graph indices.
pub type DefaultIx = u32;

/// An unsigned integer type usable as a node or edge index.
///
/// Implemented for `u8`, `u16`, `u32` and `usize`.
pub trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    /// Converts a `usize` position into the index type, truncating.
    fn new(x: usize) -> Self;
    /// Returns the position as a `usize`.
    fn index(&self) -> usize;
    /// Returns the maximum value, which doubles as the end sentinel.
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                #[inline(always)]
                fn new(x: usize) -> Self {
                    x as $ty
                }
                #[inline(always)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    <$ty>::MAX
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, usize);

/// Returns how many elements a graph indexed by `Ix` can hold.
#[inline]
pub(crate) fn index_capacity<Ix: IndexType>() -> usize {
    <Ix as IndexType>::max().index()
}

/// Returns `true` if position `len` would collide with the end sentinel.
///
/// `usize` indices never collide; memory runs out first.
#[inline]
pub(crate) fn index_exhausted<Ix: IndexType>(len: usize) -> bool {
    let max = index_capacity::<Ix>();
    max != usize::MAX && len >= max
}

/// A strongly-typed identifier for a node.
///
/// Node indices are assigned sequentially from 0 by `add_node`. In a
/// [`crate::Graph`] they are not stable: removing a node moves the last node
/// into the freed position. [`crate::StableGraph`] keeps them stable.
///
/// # Examples
///
/// ```rust
/// use lindgraph::{DiGraph, NodeIndex};
/// use std::collections::HashMap;
///
/// let mut graph = DiGraph::<&str, ()>::new();
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// assert_ne!(a, b);
/// assert_eq!(b, NodeIndex::new(1));
///
/// let mut rank: HashMap<NodeIndex, i32> = HashMap::new();
/// rank.insert(a, 42);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    /// Creates a `NodeIndex` from a raw position.
    #[must_use]
    #[inline]
    pub fn new(index: usize) -> Self {
        NodeIndex(Ix::new(index))
    }

    /// Returns the raw position of this node.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// Returns the end sentinel, which never names a real node.
    #[must_use]
    #[inline]
    pub fn end() -> Self {
        NodeIndex(<Ix as IndexType>::max())
    }

    /// Reinterprets the position as an edge index. Free-list links of vacant
    /// stable-graph slots are threaded through the edge link fields.
    #[inline]
    pub(crate) fn into_edge(self) -> EdgeIndex<Ix> {
        EdgeIndex(self.0)
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

impl<Ix: IndexType> fmt::Display for NodeIndex<Ix> {
    /// The compact form used in DOT output and logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index())
    }
}

impl<Ix: IndexType> From<Ix> for NodeIndex<Ix> {
    #[inline]
    fn from(ix: Ix) -> Self {
        NodeIndex(ix)
    }
}

/// A strongly-typed identifier for an edge.
///
/// Like [`NodeIndex`], edge indices of a [`crate::Graph`] shift on removal
/// while those of a [`crate::StableGraph`] do not.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> EdgeIndex<Ix> {
    /// Creates an `EdgeIndex` from a raw position.
    #[must_use]
    #[inline]
    pub fn new(index: usize) -> Self {
        EdgeIndex(Ix::new(index))
    }

    /// Returns the raw position of this edge.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// Returns the end sentinel terminating every adjacency list.
    #[must_use]
    #[inline]
    pub fn end() -> Self {
        EdgeIndex(<Ix as IndexType>::max())
    }

    #[inline]
    pub(crate) fn into_node(self) -> NodeIndex<Ix> {
        NodeIndex(self.0)
    }
}

impl<Ix: fmt::Debug> fmt::Debug for EdgeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeIndex({:?})", self.0)
    }
}

impl<Ix: IndexType> fmt::Display for EdgeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.index())
    }
}

impl<Ix: IndexType> From<Ix> for EdgeIndex<Ix> {
    #[inline]
    fn from(ix: Ix) -> Self {
        EdgeIndex(ix)
    }
}

/// Short for [`NodeIndex::new`].
#[must_use]
pub fn node_index<Ix: IndexType>(index: usize) -> NodeIndex<Ix> {
    NodeIndex::new(index)
}

/// Short for [`EdgeIndex::new`].
#[must_use]
pub fn edge_index<Ix: IndexType>(index: usize) -> EdgeIndex<Ix> {
    EdgeIndex::new(index)
}
