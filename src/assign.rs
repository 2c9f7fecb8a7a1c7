//! IO-to-cluster assignment strategies.
//!
//! Two strategies produce the initial owner of every IO point:
//!
//! - [`assign_by_cells`] gives each IO point to the cluster whose Voronoi
//!   cell contains it; load balancing happens afterwards in the burden
//!   balancer.
//! - [`assign_by_distance`] skips the Voronoi diagram and folds balancing
//!   into a single greedy pass: each IO point goes to the cluster with the
//!   cheapest marginal cost (resistance to reach it plus the burden it
//!   would have after taking the point). The pass is order-dependent, which
//!   is what [`IoPriority`](crate::IoPriority) controls.

use glam::DVec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::LinkError;
use crate::spatial::SpatialGraph;
use crate::types::{Cluster, IndexPair, IoPriority, WeightedPoint};

/// Assign every IO point to the cluster whose Voronoi cell contains it.
///
/// `centers` is the graph over cluster centers. Cells are scanned in
/// cluster order and each IO point is claimed at most once, so boundary
/// ties go to the lower-indexed cell. Voronoi cells partition the plane;
/// an IO point that no cell claims means the configuration was not
/// handled and the call fails.
pub(crate) fn assign_by_cells(
    centers: &SpatialGraph,
    io: &[WeightedPoint],
) -> Result<Vec<usize>, LinkError> {
    let mut owners = vec![usize::MAX; io.len()];
    let mut unassigned: Vec<usize> = (0..io.len()).collect();

    for cell in 0..centers.num_points() {
        unassigned.retain(|&i| {
            if centers.cell_contains(cell, io[i].position) {
                owners[i] = cell;
                false
            } else {
                true
            }
        });
        if unassigned.is_empty() {
            break;
        }
    }

    if let Some(&orphan) = unassigned.first() {
        return Err(LinkError::GeometricDefect(format!(
            "io point {} at {:?} claimed by no voronoi cell",
            orphan, io[orphan].position
        )));
    }
    Ok(owners)
}

/// Assign every IO point directly by marginal cost, in priority order.
///
/// For each IO point the candidate cost of cluster `c` is
/// `link_resistance + (load(c) + size) / capacity(c)`, where
/// `link_resistance` is zero for the single nearest cluster and the
/// precomputed resistance between the nearest cluster and `c` otherwise.
/// Clusters with no resistance entry to the nearest cluster (not
/// Delaunay-adjacent) are excluded entirely. Ties go to the first cluster
/// found, so `ShortestDistFirst` is fully deterministic.
pub(crate) fn assign_by_distance<R: Rng + ?Sized>(
    clusters: &[Cluster],
    io: &[WeightedPoint],
    priority: IoPriority,
    resistances: &FxHashMap<IndexPair, f64>,
    rng: &mut R,
) -> Vec<usize> {
    let nearest: Vec<usize> = io
        .iter()
        .map(|point| nearest_cluster(clusters, point.position))
        .collect();
    let nearest_dist: Vec<f64> = io
        .iter()
        .enumerate()
        .map(|(i, point)| point.position.distance(clusters[nearest[i]].center))
        .collect();

    let mut order: Vec<usize> = (0..io.len()).collect();
    match priority {
        IoPriority::ShortestDistFirst => {
            order.sort_by(|&i, &j| nearest_dist[i].total_cmp(&nearest_dist[j]));
        }
        IoPriority::LongestDistFirst => {
            order.sort_by(|&i, &j| nearest_dist[j].total_cmp(&nearest_dist[i]));
        }
        IoPriority::RandomOrder => {
            order.shuffle(rng);
        }
    }

    let mut owners = vec![usize::MAX; io.len()];
    let mut loads = vec![0.0f64; clusters.len()];
    for i in order {
        let near = nearest[i];
        let mut best: Option<(usize, f64)> = None;
        for (c, cluster) in clusters.iter().enumerate() {
            let link_resistance = if c == near {
                0.0
            } else {
                match resistances.get(&IndexPair::new(near, c)) {
                    Some(&r) => r,
                    None => continue,
                }
            };
            let cost = link_resistance + (loads[c] + io[i].size) / cluster.size;
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((c, cost));
            }
        }
        // The nearest cluster always carries zero resistance, so a winner
        // exists whenever there is at least one cluster.
        let (winner, _) = best.expect("no candidate cluster");
        owners[i] = winner;
        loads[winner] += io[i].size;
    }
    owners
}

fn nearest_cluster(clusters: &[Cluster], position: DVec2) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, cluster) in clusters.iter().enumerate() {
        let d = position.distance_squared(cluster.center);
        if d < best_dist {
            best = c;
            best_dist = d;
        }
    }
    best
}
