//! Close-pair pre-merge before IO assignment.
//!
//! Brains sitting almost on top of each other would otherwise each claim a
//! Voronoi cell and steal IO territory out of proportion to their spacing.
//! Any tracked pair closer than a fraction of the point set's bounding-box
//! diagonal is unioned into one cluster before assignment. Merging is
//! transitive: if A-B and B-C are both close, A, B and C become one cluster
//! even when A-C exceeds the threshold.

use crate::distance::PairDistanceIndex;
use crate::pruning::CandidateLinks;
use crate::types::IndexPair;

/// Union every tracked pair with distance at or below `threshold` into the
/// shared partition, ascending by distance. Surviving links re-home onto
/// the merged clusters exactly as prune merges do.
pub(crate) fn merge_close_pairs(
    links: &mut CandidateLinks,
    distances: &PairDistanceIndex,
    threshold: f64,
) {
    let mut close: Vec<(IndexPair, f64)> = distances
        .iter()
        .filter(|&(_, d)| d <= threshold)
        .collect();
    close.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    for (pair, _) in close {
        links.merge(pair.min(), pair.max());
    }
}
