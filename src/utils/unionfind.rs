//! Disjoint-set forest with union by rank and path compression.

use std::cmp::Ordering;

use crate::graph::IndexType;

/// A disjoint-set structure over the elements `0..n`, addressed by an
/// unsigned index type `K`.
///
/// Both `union` and `find_mut` compress paths as they walk, so a sequence of
/// operations runs in near-constant amortized time per operation.
///
/// # Examples
///
/// ```rust
/// use lindgraph::utils::UnionFind;
///
/// let mut sets = UnionFind::<u32>::new(4);
/// assert!(sets.union(0, 1));
/// assert!(sets.union(2, 3));
/// assert!(!sets.union(1, 0));
/// assert!(sets.equiv(0, 1));
/// assert!(!sets.equiv(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind<K> {
    /// Parent link per element; a representative is its own parent.
    parent: Vec<K>,
    /// Upper bound on the height of each representative's tree.
    rank: Vec<u8>,
}

impl<K: IndexType> UnionFind<K> {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).map(K::new).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the structure holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of `x` without modifying the forest.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of bounds.
    #[must_use]
    pub fn find(&self, x: K) -> K {
        assert!(x.index() < self.parent.len(), "element out of bounds");
        let mut x = x;
        loop {
            let parent = self.parent[x.index()];
            if parent == x {
                return x;
            }
            x = parent;
        }
    }

    /// Returns the representative of `x`, halving the path on the way.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of bounds.
    pub fn find_mut(&mut self, x: K) -> K {
        assert!(x.index() < self.parent.len(), "element out of bounds");
        let mut x = x;
        let mut parent = self.parent[x.index()];
        while parent != x {
            let grandparent = self.parent[parent.index()];
            self.parent[x.index()] = grandparent;
            x = parent;
            parent = grandparent;
        }
        x
    }

    /// Returns `true` if `x` and `y` belong to the same set.
    #[must_use]
    pub fn equiv(&self, x: K, y: K) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` if they already were the same set (including `x == y`).
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    pub fn union(&mut self, x: K, y: K) -> bool {
        if x == y {
            return false;
        }
        let xrep = self.find_mut(x);
        let yrep = self.find_mut(y);
        if xrep == yrep {
            return false;
        }

        let (xi, yi) = (xrep.index(), yrep.index());
        match self.rank[xi].cmp(&self.rank[yi]) {
            Ordering::Less => self.parent[xi] = yrep,
            Ordering::Greater => self.parent[yi] = xrep,
            Ordering::Equal => {
                self.parent[yi] = xrep;
                self.rank[xi] += 1;
            }
        }
        true
    }

    /// Consumes the structure and maps every element to its representative.
    #[must_use]
    pub fn into_labeling(mut self) -> Vec<K> {
        for ix in 0..self.parent.len() {
            let rep = self.find_mut(K::new(ix));
            self.parent[ix] = rep;
        }
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unionfind_singletons() {
        let sets = UnionFind::<usize>::new(5);
        assert_eq!(sets.len(), 5);
        for i in 0..5 {
            assert_eq!(sets.find(i), i);
        }
        assert!(UnionFind::<u8>::new(0).is_empty());
    }

    #[test]
    fn test_unionfind_union_and_equiv() {
        let mut sets = UnionFind::<u32>::new(8);
        assert!(sets.union(0, 1));
        assert!(sets.union(1, 2));
        assert!(sets.union(5, 6));
        assert!(!sets.union(2, 0));
        assert!(!sets.union(3, 3));

        assert!(sets.equiv(0, 2));
        assert!(sets.equiv(5, 6));
        assert!(!sets.equiv(2, 5));
        assert!(!sets.equiv(3, 4));
    }

    #[test]
    fn test_unionfind_labeling() {
        let mut sets = UnionFind::<u16>::new(6);
        sets.union(0, 3);
        sets.union(3, 4);
        sets.union(1, 2);

        let labels = sets.into_labeling();
        assert_eq!(labels[0], labels[3]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[1]);
        assert_eq!(labels[5], 5);
    }

    #[test]
    fn test_unionfind_long_chain_compresses() {
        let n = 1000;
        let mut sets = UnionFind::<usize>::new(n);
        for i in 1..n {
            sets.union(i - 1, i);
        }
        let rep = sets.find_mut(n - 1);
        for i in 0..n {
            assert_eq!(sets.find(i), rep);
        }
    }

    #[test]
    #[should_panic(expected = "element out of bounds")]
    fn test_unionfind_out_of_bounds() {
        let sets = UnionFind::<u32>::new(2);
        let _ = sets.find(2);
    }
}
