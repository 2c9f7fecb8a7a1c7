//! Triangle-based pruning of the raw Delaunay link set.
//!
//! Every unique Delaunay edge over the brain points starts as a link
//! candidate. Each triangle then gets one of three treatments based on its
//! sorted edge lengths `l0 <= l1 <= l2`:
//!
//! - **Skinny** (`l0/l1` and `l0/l2` both under the skinny ratio): a thin
//!   isosceles sliver with a short base. A coin flip either merges the two
//!   endpoints of the base into one cluster, or removes one of the two long
//!   edges at random.
//! - **Wide** (`l2/(l0+l1)` over the wide ratio): nearly flat with one very
//!   obtuse angle; the longest edge is removed.
//! - Otherwise all three edges are kept.
//!
//! A triangle that qualifies as both skinny and wide is treated as skinny:
//! the checks run in that order, everywhere.
//!
//! Candidates are keyed by the union-find roots of their endpoints, so a
//! merge re-homes every link that touched either endpoint in one adjacency
//! splice instead of a scan over all links. Removal is idempotent: an edge
//! shared with an already-processed triangle may be gone, and an edge whose
//! endpoints have since merged no longer exists as a link at all.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::distance::PairDistanceIndex;
use crate::types::{BrainLink, Cluster, IndexPair, WeightedPoint};
use crate::union_find::UnionFind;
use crate::LinkConfig;

/// Mutable link-candidate set over a growing cluster partition.
///
/// Sides of a candidate are cluster roots, not plain point indices; merges
/// grow one side into a multi-member set without touching the stored links.
#[derive(Debug)]
pub(crate) struct CandidateLinks {
    uf: UnionFind,
    /// Neighbor roots per root. Only root slots carry live entries.
    adjacency: Vec<FxHashSet<usize>>,
}

impl CandidateLinks {
    /// Start from the raw Delaunay edge set: every point a singleton, every
    /// edge a candidate.
    pub fn new(num_points: usize, edges: &[IndexPair]) -> Self {
        let mut adjacency = vec![FxHashSet::default(); num_points];
        for &pair in edges {
            adjacency[pair.min()].insert(pair.max());
            adjacency[pair.max()].insert(pair.min());
        }
        Self {
            uf: UnionFind::new(num_points),
            adjacency,
        }
    }

    /// Remove the link between the clusters holding `a` and `b`.
    ///
    /// No-op when the link is already gone or the endpoints share a cluster.
    pub fn remove_edge(&mut self, a: usize, b: usize) {
        let ra = self.uf.find(a);
        let rb = self.uf.find(b);
        if ra == rb {
            return;
        }
        self.adjacency[ra].remove(&rb);
        self.adjacency[rb].remove(&ra);
    }

    /// Merge the clusters holding `a` and `b` into one, re-homing every
    /// candidate that touched either side onto the combined root. Links
    /// that become identical union through the neighbor set; the link
    /// between the merged pair itself disappears.
    pub fn merge(&mut self, a: usize, b: usize) {
        let ra = self.uf.find(a);
        let rb = self.uf.find(b);
        let Some(kept) = self.uf.union_keep_min(ra, rb) else {
            return;
        };
        let dropped = if kept == ra { rb } else { ra };

        let moved = std::mem::take(&mut self.adjacency[dropped]);
        self.adjacency[kept].remove(&dropped);
        for neighbor in moved {
            if neighbor == kept {
                continue;
            }
            self.adjacency[neighbor].remove(&dropped);
            self.adjacency[neighbor].insert(kept);
            self.adjacency[kept].insert(neighbor);
        }
    }

    /// True if a link currently exists between the clusters of `a` and `b`.
    #[cfg(test)]
    pub fn has_edge(&mut self, a: usize, b: usize) -> bool {
        let ra = self.uf.find(a);
        let rb = self.uf.find(b);
        ra != rb && self.adjacency[ra].contains(&rb)
    }

    /// Current cluster root of point `x`.
    #[cfg(test)]
    pub fn root_of(&mut self, x: usize) -> usize {
        self.uf.find(x)
    }

    /// Freeze the partition into clusters and the surviving candidates into
    /// brain links. Cluster order follows the smallest member index.
    pub fn into_parts(mut self, points: &[WeightedPoint]) -> (Vec<Cluster>, Vec<BrainLink>) {
        let groups = self.uf.groups();
        let mut cluster_of_root = vec![usize::MAX; points.len()];
        for (ci, group) in groups.iter().enumerate() {
            cluster_of_root[group[0]] = ci;
        }

        let mut links = Vec::new();
        for group in &groups {
            let root = group[0];
            for &neighbor in &self.adjacency[root] {
                if root < neighbor {
                    links.push(BrainLink::new(cluster_of_root[root], cluster_of_root[neighbor]));
                }
            }
        }
        links.sort_unstable_by_key(|l| (l.a, l.b));

        let clusters = groups
            .into_iter()
            .map(|members| Cluster::from_members(members, points))
            .collect();
        (clusters, links)
    }
}

/// Apply the skinny/wide policy to every Delaunay triangle.
///
/// `distances` must track every triangle edge (the full Delaunay edge set).
/// Collinear inputs have no triangles and pass through untouched.
pub(crate) fn prune_triangles<R: Rng + ?Sized>(
    links: &mut CandidateLinks,
    triangles: &[[usize; 3]],
    distances: &PairDistanceIndex,
    config: &LinkConfig,
    rng: &mut R,
) {
    for &[a, b, c] in triangles {
        let mut edges = [(a, b), (b, c), (c, a)]
            .map(|(x, y)| ((x, y), distances.distance(IndexPair::new(x, y))));
        edges.sort_by(|a, b| a.1.total_cmp(&b.1));
        let [(short, l0), (mid, l1), (long, l2)] = edges;

        if l0 / l1 < config.skinny_ratio && l0 / l2 < config.skinny_ratio {
            if rng.gen_bool(config.merge_chance) {
                links.merge(short.0, short.1);
            } else {
                let (x, y) = if rng.gen_range(0..2) == 0 { mid } else { long };
                links.remove_edge(x, y);
            }
        } else if l2 / (l0 + l1) > config.wide_ratio {
            links.remove_edge(long.0, long.1);
        }
    }
}
