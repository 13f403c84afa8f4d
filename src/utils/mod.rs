//! Storage primitives shared by the graph containers and algorithms.

pub(crate) mod array;
mod bitset;
mod dot;
mod unionfind;

pub use bitset::{BitSet, BitSetIter};
pub use dot::escape_dot;
pub use unionfind::UnionFind;
