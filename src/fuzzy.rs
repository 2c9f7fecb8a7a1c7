//! Fuzzy re-derivation of links onto a regenerated point set.
//!
//! When a layout is regenerated (after mutation, for example) the old link
//! endpoints no longer exist as points. Each old endpoint is matched onto
//! the new set: exact position matches take the whole weight, otherwise
//! every new point within a radius of the nearest match receives a share
//! that falls off with distance. A link between two old endpoints then
//! fans out over the Cartesian product of the two match sets, keeps the
//! highest-scoring combinations, and renormalizes so the original link
//! weight is conserved exactly.

use glam::DVec2;
use rustc_hash::FxHashMap;

/// Candidates are gathered within this multiple of the nearest distance.
const SEARCH_RADIUS_MULT: f64 = 2.5;

/// Share falloff offset; keeps the nearest match from taking everything
/// and guards the division at distance zero.
const SHARE_OFFSET: f64 = 0.1;

/// A link between two positions of the old layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyLink {
    pub from: DVec2,
    pub to: DVec2,
    pub weight: f64,
}

impl FuzzyLink {
    #[inline]
    pub fn new(from: DVec2, to: DVec2, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// A derived link between two indices of the new point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelinkedWeight {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Re-derive `old_links` onto `new_points`.
///
/// Per old link, at most `max_final` combinations survive, built from at
/// most `max_intermediate` matches per endpoint. Duplicate (from, to)
/// pairs across links sum their weights. Self-pairs (both endpoints
/// resolving to the same new point) are kept so weight is conserved;
/// callers that dislike them can filter.
///
/// Returns an empty list when `new_points` is empty; never fails on
/// degenerate geometry.
pub fn fuzzy_relink(
    old_links: &[FuzzyLink],
    new_points: &[DVec2],
    max_final: usize,
    max_intermediate: usize,
) -> Vec<RelinkedWeight> {
    if new_points.is_empty() {
        return Vec::new();
    }

    let mut combined: FxHashMap<(usize, usize), f64> = FxHashMap::default();
    for link in old_links {
        let from_matches = match_point(link.from, new_points, max_intermediate);
        let to_matches = match_point(link.to, new_points, max_intermediate);

        let mut scored: Vec<(usize, usize, f64)> = Vec::new();
        for &(fi, fs) in &from_matches {
            for &(ti, ts) in &to_matches {
                scored.push((fi, ti, fs * ts));
            }
        }
        scored.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));
        scored.truncate(max_final);

        let total: f64 = scored.iter().map(|s| s.2).sum();
        if total <= 0.0 {
            continue;
        }
        for (fi, ti, score) in scored {
            *combined.entry((fi, ti)).or_insert(0.0) += score / total * link.weight;
        }
    }

    let mut result: Vec<RelinkedWeight> = combined
        .into_iter()
        .map(|((from, to), weight)| RelinkedWeight { from, to, weight })
        .collect();
    result.sort_by_key(|r| (r.from, r.to));
    result
}

/// Match one old position onto the new set: (index, share) with shares
/// summing to 1. Exact matches win outright; otherwise shares fall off as
/// `1 / (distance/nearest + offset)` within the search radius.
fn match_point(position: DVec2, new_points: &[DVec2], max_intermediate: usize) -> Vec<(usize, f64)> {
    let dists: Vec<f64> = new_points.iter().map(|&p| position.distance(p)).collect();

    let exact: Vec<usize> = (0..dists.len()).filter(|&i| dists[i] == 0.0).collect();
    if !exact.is_empty() {
        let share = 1.0 / exact.len() as f64;
        return exact.into_iter().map(|i| (i, share)).collect();
    }

    let nearest = dists.iter().copied().fold(f64::INFINITY, f64::min);
    let radius = nearest * SEARCH_RADIUS_MULT;

    let mut candidates: Vec<(usize, f64)> = dists
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d <= radius)
        .map(|(i, &d)| (i, d))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    candidates.truncate(max_intermediate);

    let shares: Vec<f64> = candidates
        .iter()
        .map(|&(_, d)| 1.0 / (d / nearest + SHARE_OFFSET))
        .collect();
    let total: f64 = shares.iter().sum();
    candidates
        .iter()
        .zip(shares)
        .map(|(&(i, _), s)| (i, s / total))
        .collect()
}
