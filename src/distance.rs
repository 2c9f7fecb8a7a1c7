//! Pairwise distance cache over a tracked set of index pairs.

use glam::DVec2;
use rustc_hash::FxHashMap;

use crate::types::IndexPair;

/// Precomputed Euclidean distances for a tracked set of point pairs.
///
/// This is a caching structure, not a full distance matrix: only the pairs
/// handed to [`PairDistanceIndex::new`] can be queried. Looking up an
/// untracked pair through [`distance`](Self::distance) is a programmer
/// error and panics; the balancer's resistance probe uses the
/// non-panicking [`get`](Self::get) instead.
#[derive(Debug, Clone)]
pub struct PairDistanceIndex {
    distances: FxHashMap<IndexPair, f64>,
}

impl PairDistanceIndex {
    /// Compute distances for `pairs` over `positions`.
    pub fn new(positions: &[DVec2], pairs: impl IntoIterator<Item = IndexPair>) -> Self {
        let mut distances = FxHashMap::default();
        for pair in pairs {
            distances
                .entry(pair)
                .or_insert_with(|| positions[pair.min()].distance(positions[pair.max()]));
        }
        Self { distances }
    }

    /// Distance for a tracked pair. Panics if the pair was never tracked.
    #[inline]
    pub fn distance(&self, pair: IndexPair) -> f64 {
        match self.distances.get(&pair) {
            Some(&d) => d,
            None => panic!(
                "distance for untracked pair ({}, {})",
                pair.min(),
                pair.max()
            ),
        }
    }

    /// Distance for a pair, or `None` if the pair is not tracked.
    #[inline]
    pub fn get(&self, pair: IndexPair) -> Option<f64> {
        self.distances.get(&pair).copied()
    }

    /// Tracked pairs with their distances, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPair, f64)> + '_ {
        self.distances.iter().map(|(&p, &d)| (p, d))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 4.0),
            DVec2::new(6.0, 0.0),
        ]
    }

    #[test]
    fn test_tracked_distance() {
        let index = PairDistanceIndex::new(&positions(), [IndexPair::new(0, 1)]);
        assert_eq!(index.distance(IndexPair::new(0, 1)), 5.0);
        assert_eq!(index.distance(IndexPair::new(1, 0)), 5.0);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_untracked_get_is_none() {
        let index = PairDistanceIndex::new(&positions(), [IndexPair::new(0, 1)]);
        assert_eq!(index.get(IndexPair::new(1, 2)), None);
    }

    #[test]
    #[should_panic(expected = "untracked pair")]
    fn test_untracked_distance_panics() {
        let index = PairDistanceIndex::new(&positions(), [IndexPair::new(0, 1)]);
        index.distance(IndexPair::new(0, 2));
    }
}
