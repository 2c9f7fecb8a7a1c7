//! Disjoint-set (union-find) with path compression.
//!
//! Backs the cluster bookkeeping: triangle-prune merges and close-pair
//! pre-merges both union point indices here, and the final cluster set is
//! read back out as the partition's groups.

#[derive(Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let p = self.parent[x];
        if p != x {
            let root = self.find(p);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    /// Union where the smaller root always becomes the representative.
    ///
    /// Keeping the minimum index as representative makes cluster identities
    /// stable regardless of merge order. Returns the surviving root, or
    /// `None` if `a` and `b` were already in the same set.
    pub fn union_keep_min(&mut self, a: usize, b: usize) -> Option<usize> {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return None;
        }
        let (min, max) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[max] = min;
        Some(min)
    }

    /// Extract the partition as member groups, each sorted ascending and
    /// ordered by their representative (minimum member).
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut by_root: Vec<Vec<usize>> = vec![Vec::new(); n];
        for x in 0..n {
            let root = self.find(x);
            by_root[root].push(x);
        }
        by_root.retain(|g| !g.is_empty());
        by_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_keep_min() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.union_keep_min(4, 2), Some(2));
        assert_eq!(uf.union_keep_min(2, 0), Some(0));
        assert_eq!(uf.union_keep_min(4, 0), None);
        assert_eq!(uf.find(4), 0);
        assert_eq!(uf.find(2), 0);
        assert_eq!(uf.find(1), 1);
    }

    #[test]
    fn test_groups_sorted_by_representative() {
        let mut uf = UnionFind::new(6);
        uf.union_keep_min(5, 3);
        uf.union_keep_min(1, 2);
        let groups = uf.groups();
        assert_eq!(groups, vec![vec![0], vec![1, 2], vec![3, 5], vec![4]]);
    }
}
