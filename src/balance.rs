//! Iterative burden rebalancing across Delaunay-adjacent clusters.
//!
//! A cluster's burden is the total size of its attached IO points divided
//! by its capacity. After the initial Voronoi assignment, overloaded
//! clusters hand single IO links to relatively less loaded neighbors, with
//! a distance-derived resistance discouraging moves to far-away clusters.
//! Only Delaunay-adjacent cluster pairs are transfer targets; a pair
//! without a graph edge carries no resistance entry and is never
//! considered.

use glam::DVec2;
use rustc_hash::FxHashMap;

use crate::spatial::SpatialGraph;
use crate::types::{Cluster, IndexPair, WeightedPoint};

/// Resistance for every Delaunay-adjacent cluster pair:
/// `distance(a, b) / aabb_diagonal(centers) * mult`.
pub(crate) fn resistance_map(
    graph: &SpatialGraph,
    centers: &[DVec2],
    mult: f64,
) -> FxHashMap<IndexPair, f64> {
    let diagonal = crate::spatial::aabb_diagonal(centers);
    graph
        .edges()
        .iter()
        .map(|&pair| {
            let d = centers[pair.min()].distance(centers[pair.max()]);
            (pair, d / diagonal * mult)
        })
        .collect()
}

/// Per-cluster accumulator while balancing.
///
/// IO links moved in from another cluster are parked in `moved_in` and
/// never move again; only originally-assigned links are transfer
/// candidates. Every move permanently shrinks some `original` list, which
/// bounds the loop at one move per IO point.
#[derive(Debug)]
struct BurdenRecord {
    capacity: f64,
    original: Vec<usize>,
    moved_in: Vec<usize>,
}

impl BurdenRecord {
    fn load(&self, io: &[WeightedPoint]) -> f64 {
        self.original
            .iter()
            .chain(&self.moved_in)
            .map(|&i| io[i].size)
            .sum()
    }

    fn burden(&self, io: &[WeightedPoint]) -> f64 {
        self.load(io) / self.capacity
    }
}

/// Move IO links from overloaded clusters to less loaded neighbors until
/// no strictly beneficial single move remains. Updates `owners` in place
/// and returns the number of moves applied.
///
/// Each pass recomputes every burden, collects candidate `(from, to)`
/// pairs with positive benefit, and tries them in descending benefit
/// order. A move must not overshoot: after it, the source burden must
/// still be at least the resistance above the destination burden. Among
/// qualifying links the one nearest the destination center wins. The
/// first applied move restarts the pass; a pass with no applicable move
/// terminates the loop.
///
/// This is a greedy local search: the result is locally stable, not
/// globally optimal. The destination's new burden plus resistance never
/// exceeds the source's new burden, so the maximum burden is monotonically
/// non-increasing.
pub(crate) fn balance(
    clusters: &[Cluster],
    io: &[WeightedPoint],
    owners: &mut [usize],
    graph: &SpatialGraph,
    resistances: &FxHashMap<IndexPair, f64>,
) -> usize {
    let mut records: Vec<BurdenRecord> = clusters
        .iter()
        .map(|c| BurdenRecord {
            capacity: c.size,
            original: Vec::new(),
            moved_in: Vec::new(),
        })
        .collect();
    for (i, &owner) in owners.iter().enumerate() {
        records[owner].original.push(i);
    }

    let mut moves = 0;
    'outer: loop {
        let burdens: Vec<f64> = records.iter().map(|r| r.burden(io)).collect();

        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for (from, record) in records.iter().enumerate() {
            if record.original.is_empty() {
                continue;
            }
            for &to in graph.neighbors(from) {
                let resistance = resistances[&IndexPair::new(from, to)];
                let benefit = burdens[from] - (burdens[to] + resistance);
                if benefit > 0.0 {
                    candidates.push((benefit, from, to));
                }
            }
        }
        candidates.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| (a.1, a.2).cmp(&(b.1, b.2)))
        });

        for (_, from, to) in candidates {
            let resistance = resistances[&IndexPair::new(from, to)];
            if let Some(io_idx) = pick_move(&records, io, clusters, from, to, resistance) {
                let pos = records[from]
                    .original
                    .iter()
                    .position(|&i| i == io_idx)
                    .expect("picked link is on the source cluster");
                records[from].original.remove(pos);
                records[to].moved_in.push(io_idx);
                owners[io_idx] = to;
                moves += 1;
                continue 'outer;
            }
        }
        break;
    }
    moves
}

/// Find the originally-assigned IO link on `from` whose move to `to`
/// leaves `new_from >= resistance + new_to`, preferring the link whose IO
/// point is nearest the destination center (ties by IO index).
fn pick_move(
    records: &[BurdenRecord],
    io: &[WeightedPoint],
    clusters: &[Cluster],
    from: usize,
    to: usize,
    resistance: f64,
) -> Option<usize> {
    let from_load = records[from].load(io);
    let to_load = records[to].load(io);

    let mut best: Option<(f64, usize)> = None;
    for &io_idx in &records[from].original {
        let size = io[io_idx].size;
        let new_from = (from_load - size) / records[from].capacity;
        let new_to = (to_load + size) / records[to].capacity;
        if new_from < resistance + new_to {
            continue;
        }
        let dist = io[io_idx].position.distance(clusters[to].center);
        let better = match best {
            None => true,
            Some((best_dist, best_idx)) => {
                dist < best_dist || (dist == best_dist && io_idx < best_idx)
            }
        };
        if better {
            best = Some((dist, io_idx));
        }
    }
    best.map(|(_, idx)| idx)
}
