//! Edge direction and edge-type markers.

use std::fmt;

use strum::{EnumCount, EnumIter};

/// The direction of an edge relative to a node.
///
/// The discriminants double as positions into the two-element link arrays of
/// node and edge records: `0` for the outgoing list, `1` for the incoming one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount)]
#[repr(usize)]
pub enum Direction {
    /// An edge leaving the node.
    Outgoing = 0,
    /// An edge arriving at the node.
    Incoming = 1,
}

impl Direction {
    /// Returns the other direction.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }

    /// Returns `0` for [`Direction::Outgoing`] and `1` for [`Direction::Incoming`].
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outgoing => f.write_str("outgoing"),
            Direction::Incoming => f.write_str("incoming"),
        }
    }
}

/// Marker type for a directed graph.
#[derive(Clone, Copy, Debug)]
pub enum Directed {}

/// Marker type for an undirected graph.
#[derive(Clone, Copy, Debug)]
pub enum Undirected {}

/// The edge type of a graph, fixed per graph type.
pub trait EdgeType {
    /// Returns `true` for [`Directed`].
    fn is_directed() -> bool;
}

impl EdgeType for Directed {
    #[inline]
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    #[inline]
    fn is_directed() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_direction_opposite_and_index() {
        assert_eq!(Direction::Outgoing.opposite(), Direction::Incoming);
        assert_eq!(Direction::Incoming.opposite(), Direction::Outgoing);
        assert_eq!(Direction::Outgoing.index(), 0);
        assert_eq!(Direction::Incoming.index(), 1);
    }

    #[test]
    fn test_direction_iteration_order() {
        let dirs: Vec<_> = Direction::iter().collect();
        assert_eq!(dirs, vec![Direction::Outgoing, Direction::Incoming]);
        assert_eq!(Direction::COUNT, 2);
    }

    #[test]
    fn test_edge_type_markers() {
        assert!(Directed::is_directed());
        assert!(!Undirected::is_directed());
        assert_eq!(Direction::Incoming.to_string(), "incoming");
    }
}
