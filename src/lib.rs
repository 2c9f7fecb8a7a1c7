//! Spatial clustering and link generation for procedurally wired bot brains.
//!
//! Given brain positions with capacities and IO device positions (sensors,
//! thrusters) with demands, this crate decides which brains link to each
//! other and which cluster each IO device wires to. Brain-to-brain links
//! come from a Delaunay triangulation with skinny/wide triangle pruning;
//! IO ownership comes either from Voronoi cells followed by iterative
//! burden rebalancing, or from a single greedy pass that folds a
//! distance-resistance cost into the assignment.
//!
//! All randomness flows through an injected [`rand::Rng`], so a fixed seed
//! reproduces identical output. Brain sizes act as divisors in the burden
//! model and must be positive.
//!
//! # Example
//!
//! ```
//! use brain_linker::{compute_voronoi_links, WeightedPoint};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let brains = vec![
//!     WeightedPoint::new(0.0, 0.0, 1.0),
//!     WeightedPoint::new(10.0, 0.0, 1.0),
//! ];
//! let io = vec![
//!     WeightedPoint::new(1.0, 0.0, 1.0),
//!     WeightedPoint::new(9.0, 0.0, 1.0),
//! ];
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let output = compute_voronoi_links(&brains, &io, &mut rng).expect("linking should succeed");
//! assert_eq!(output.clusters.len(), 2);
//! assert_eq!(output.io_links.len(), 2);
//! ```

mod assign;
mod balance;
mod distance;
mod error;
mod fuzzy;
mod premerge;
mod pruning;
mod spatial;
mod types;
mod union_find;
pub mod validation;

use glam::DVec2;
use rand::Rng;

pub use distance::PairDistanceIndex;
pub use error::LinkError;
pub use fuzzy::{fuzzy_relink, FuzzyLink, RelinkedWeight};
pub use spatial::{aabb_diagonal, SpatialGraph};
pub use types::{BrainLink, Cluster, IndexPair, IoLink, IoPriority, WeightedPoint};

/// Tuning knobs for link computation.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// A triangle is skinny when its shortest edge is under this fraction
    /// of both longer edges.
    pub skinny_ratio: f64,
    /// A triangle is wide when its longest edge exceeds this fraction of
    /// the other two edges' sum.
    pub wide_ratio: f64,
    /// Probability that a skinny triangle merges its short base instead of
    /// removing a long edge. Must lie in `[0, 1]`.
    pub merge_chance: f64,
    /// Brains closer than this fraction of the bounding-box diagonal
    /// pre-merge into one cluster before IO assignment.
    pub premerge_ratio: f64,
    /// Scale on normalized center distance in the resistance model.
    pub resistance_mult: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            skinny_ratio: 0.3,
            wide_ratio: 0.92,
            merge_chance: 0.5,
            premerge_ratio: 0.05,
            resistance_mult: 10.0,
        }
    }
}

/// Output from link computation.
#[derive(Debug, Clone)]
pub struct LinkOutput {
    /// The cluster partition of the brain points, ordered by smallest
    /// member index.
    pub clusters: Vec<Cluster>,
    /// Brain-to-brain links between cluster indices.
    pub brain_links: Vec<BrainLink>,
    /// One link per IO point, ordered by IO index.
    pub io_links: Vec<IoLink>,
}

impl LinkOutput {
    /// Cluster owning IO point `io`, if assigned.
    pub fn io_owner(&self, io: usize) -> Option<usize> {
        self.io_links
            .iter()
            .find(|l| l.io == io)
            .map(|l| l.cluster)
    }
}

/// Compute brain links and Voronoi-balanced IO links with default settings.
///
/// At least one brain is required; a single brain is the trivial case (no
/// brain links, every IO point on the one cluster).
pub fn compute_voronoi_links<R: Rng + ?Sized>(
    brains: &[WeightedPoint],
    io: &[WeightedPoint],
    rng: &mut R,
) -> Result<LinkOutput, LinkError> {
    compute_voronoi_links_with(brains, io, &LinkConfig::default(), rng)
}

/// Compute brain links and Voronoi-balanced IO links with explicit
/// configuration.
///
/// Pipeline: Delaunay triangulation, triangle pruning, close-pair
/// pre-merge, Voronoi cell assignment over cluster centers, then burden
/// rebalancing across Delaunay-adjacent clusters.
pub fn compute_voronoi_links_with<R: Rng + ?Sized>(
    brains: &[WeightedPoint],
    io: &[WeightedPoint],
    config: &LinkConfig,
    rng: &mut R,
) -> Result<LinkOutput, LinkError> {
    let (clusters, brain_links) = build_clusters(brains, config, rng)?;

    let io_links = if io.is_empty() {
        Vec::new()
    } else if clusters.len() == 1 {
        all_on_cluster_zero(io.len())
    } else {
        let centers: Vec<DVec2> = clusters.iter().map(|c| c.center).collect();
        let center_graph = SpatialGraph::build(&centers)?;
        let mut owners = assign::assign_by_cells(&center_graph, io)?;
        let resistances = balance::resistance_map(&center_graph, &centers, config.resistance_mult);
        balance::balance(&clusters, io, &mut owners, &center_graph, &resistances);
        owners_to_links(&owners)
    };

    Ok(LinkOutput {
        clusters,
        brain_links,
        io_links,
    })
}

/// Compute brain links and distance-assigned IO links with default pruning
/// settings and an explicit resistance multiplier.
pub fn compute_distance_links<R: Rng + ?Sized>(
    brains: &[WeightedPoint],
    io: &[WeightedPoint],
    priority: IoPriority,
    resistance_mult: f64,
    rng: &mut R,
) -> Result<LinkOutput, LinkError> {
    let config = LinkConfig {
        resistance_mult,
        ..LinkConfig::default()
    };
    compute_distance_links_with(brains, io, priority, &config, rng)
}

/// Compute brain links and distance-assigned IO links with explicit
/// configuration.
///
/// Same front half as the Voronoi pipeline; IO assignment is a single
/// greedy pass in `priority` order with load folded into the cost, so no
/// separate balancing step runs. `ShortestDistFirst` uses no randomness
/// and is fully deterministic.
pub fn compute_distance_links_with<R: Rng + ?Sized>(
    brains: &[WeightedPoint],
    io: &[WeightedPoint],
    priority: IoPriority,
    config: &LinkConfig,
    rng: &mut R,
) -> Result<LinkOutput, LinkError> {
    let (clusters, brain_links) = build_clusters(brains, config, rng)?;

    let io_links = if io.is_empty() {
        Vec::new()
    } else if clusters.len() == 1 {
        all_on_cluster_zero(io.len())
    } else {
        let centers: Vec<DVec2> = clusters.iter().map(|c| c.center).collect();
        let center_graph = SpatialGraph::build(&centers)?;
        let resistances = balance::resistance_map(&center_graph, &centers, config.resistance_mult);
        let owners = assign::assign_by_distance(&clusters, io, priority, &resistances, rng);
        owners_to_links(&owners)
    };

    Ok(LinkOutput {
        clusters,
        brain_links,
        io_links,
    })
}

/// Cluster the brain points and derive the pruned brain-to-brain links.
fn build_clusters<R: Rng + ?Sized>(
    brains: &[WeightedPoint],
    config: &LinkConfig,
    rng: &mut R,
) -> Result<(Vec<Cluster>, Vec<BrainLink>), LinkError> {
    match brains.len() {
        0 => Err(LinkError::InsufficientPoints { needed: 1, got: 0 }),
        1 => Ok((vec![Cluster::from_members(vec![0], brains)], Vec::new())),
        _ => {
            let positions: Vec<DVec2> = brains.iter().map(|b| b.position).collect();
            let graph = SpatialGraph::build(&positions)?;
            let distances = PairDistanceIndex::new(&positions, graph.edges().iter().copied());

            let mut links = pruning::CandidateLinks::new(brains.len(), graph.edges());
            pruning::prune_triangles(&mut links, graph.triangles(), &distances, config, rng);

            let threshold = aabb_diagonal(&positions) * config.premerge_ratio;
            premerge::merge_close_pairs(&mut links, &distances, threshold);

            Ok(links.into_parts(brains))
        }
    }
}

fn all_on_cluster_zero(num_io: usize) -> Vec<IoLink> {
    (0..num_io).map(|io| IoLink { cluster: 0, io }).collect()
}

fn owners_to_links(owners: &[usize]) -> Vec<IoLink> {
    owners
        .iter()
        .enumerate()
        .map(|(io, &cluster)| IoLink { cluster, io })
        .collect()
}
