//! Slice helpers for the flat node and edge arenas.

/// Result of borrowing two slots of one slice mutably.
#[derive(Debug)]
pub(crate) enum Pair<T> {
    /// Both indices name the same slot.
    One(T),
    /// Two distinct slots, in argument order.
    Both(T, T),
    /// At least one index is out of bounds.
    None,
}

/// Borrows the slots at `a` and `b` mutably at the same time.
///
/// A self-loop endpoint pair collapses to [`Pair::One`] so the node record is
/// fetched once.
pub(crate) fn index_twice<T>(slice: &mut [T], a: usize, b: usize) -> Pair<&mut T> {
    if a.max(b) >= slice.len() {
        Pair::None
    } else if a == b {
        Pair::One(&mut slice[a])
    } else if a < b {
        let (head, tail) = slice.split_at_mut(b);
        Pair::Both(&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = slice.split_at_mut(a);
        Pair::Both(&mut tail[0], &mut head[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_twice_distinct() {
        let mut data = [1, 2, 3, 4];
        match index_twice(&mut data, 3, 1) {
            Pair::Both(x, y) => {
                *x += 10;
                *y += 20;
            }
            other => panic!("expected two slots, got {other:?}"),
        }
        assert_eq!(data, [1, 22, 3, 14]);
    }

    #[test]
    fn test_index_twice_same_slot() {
        let mut data = [5, 6];
        assert!(matches!(index_twice(&mut data, 1, 1), Pair::One(&mut 6)));
    }

    #[test]
    fn test_index_twice_out_of_bounds() {
        let mut data = [5, 6];
        assert!(matches!(index_twice(&mut data, 0, 2), Pair::None));
        assert!(matches!(index_twice(&mut data, 9, 9), Pair::None));
    }
}
