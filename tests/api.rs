//! Public API integration tests for brain-linker.

mod support;

use brain_linker::{
    compute_distance_links, compute_voronoi_links, compute_voronoi_links_with, fuzzy_relink,
    validation, BrainLink, FuzzyLink, IoPriority, LinkConfig, LinkError, WeightedPoint,
};
use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use support::points::{collinear_brains, scattered_brains, scattered_io};

#[test]
fn test_voronoi_two_brains_two_io() {
    let brains = vec![
        WeightedPoint::new(0.0, 0.0, 1.0),
        WeightedPoint::new(10.0, 0.0, 1.0),
    ];
    let io = vec![
        WeightedPoint::new(1.0, 0.0, 1.0),
        WeightedPoint::new(9.0, 0.0, 1.0),
    ];

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let output = compute_voronoi_links(&brains, &io, &mut rng).expect("linking should succeed");

    assert_eq!(output.clusters.len(), 2);
    assert_eq!(output.clusters[0].members, vec![0]);
    assert_eq!(output.clusters[1].members, vec![1]);
    assert_eq!(output.brain_links, vec![BrainLink::new(0, 1)]);

    // Each IO point lands in the cell next to it; burdens are equal so the
    // balancer leaves the assignment alone.
    assert_eq!(output.io_owner(0), Some(0));
    assert_eq!(output.io_owner(1), Some(1));
}

#[test]
fn test_zero_brains_is_an_error() {
    let io = vec![WeightedPoint::new(1.0, 0.0, 1.0)];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = compute_voronoi_links(&[], &io, &mut rng);
    assert!(matches!(
        result,
        Err(LinkError::InsufficientPoints { needed: 1, got: 0 })
    ));
}

#[test]
fn test_single_brain_takes_all_io() {
    let brains = vec![WeightedPoint::new(5.0, 5.0, 2.0)];
    let io = scattered_io(7, 99);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let output = compute_voronoi_links(&brains, &io, &mut rng).unwrap();

    assert_eq!(output.clusters.len(), 1);
    assert!(output.brain_links.is_empty());
    assert_eq!(output.io_links.len(), 7);
    assert!(output.io_links.iter().all(|l| l.cluster == 0));
}

#[test]
fn test_no_io_is_not_an_error() {
    let brains = scattered_brains(12, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let output = compute_voronoi_links(&brains, &[], &mut rng).unwrap();

    assert!(output.io_links.is_empty());
    let report = validation::validate(&output, brains.len(), 0);
    assert!(report.is_valid(), "{}", report.summary());
}

#[test]
fn test_coincident_brains_rejected() {
    let brains = vec![
        WeightedPoint::new(1.0, 1.0, 1.0),
        WeightedPoint::new(1.0, 1.0, 1.0),
        WeightedPoint::new(5.0, 5.0, 1.0),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = compute_voronoi_links(&brains, &[], &mut rng);
    assert!(matches!(result, Err(LinkError::GeometricDefect(_))));
}

#[test]
fn test_premerge_groups_near_coincident_brains() {
    // Two brains 0.2 apart inside a 10-unit layout merge into one cluster
    // (threshold is 5% of the bounding-box diagonal).
    let brains = vec![
        WeightedPoint::new(0.0, 0.0, 1.0),
        WeightedPoint::new(0.2, 0.0, 1.0),
        WeightedPoint::new(10.0, 0.0, 1.0),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let output = compute_voronoi_links(&brains, &[], &mut rng).unwrap();

    assert_eq!(output.clusters.len(), 2);
    assert_eq!(output.clusters[0].members, vec![0, 1]);
    assert_eq!(output.clusters[0].size, 2.0);
    assert_eq!(output.brain_links, vec![BrainLink::new(0, 1)]);
}

#[test]
fn test_distance_links_collinear_overload() {
    // Three brains in a line, five IO devices piled next to the first.
    // Greedy nearest-first assignment overloads brain 0 until the folded
    // burden cost pushes later devices to brain 1. Brain 2 is not
    // Delaunay-adjacent to the nearest cluster and never participates.
    let brains = collinear_brains(3, 5.0);
    let io = vec![
        WeightedPoint::new(0.0, 0.1, 1.0),
        WeightedPoint::new(0.1, 0.0, 1.0),
        WeightedPoint::new(0.2, 0.0, 1.0),
        WeightedPoint::new(0.3, 0.0, 1.0),
        WeightedPoint::new(0.4, 0.0, 1.0),
    ];

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let output =
        compute_distance_links(&brains, &io, IoPriority::ShortestDistFirst, 2.0, &mut rng)
            .unwrap();

    let count = |c: usize| output.io_links.iter().filter(|l| l.cluster == c).count();
    assert_eq!(count(0), 3);
    assert_eq!(count(1), 2);
    assert_eq!(count(2), 0);

    // Inter-cluster resistance is 5/10 * 2 = 1; the final burden gap does
    // not exceed it.
    assert!((count(0) as f64 - count(1) as f64) <= 1.0 + 1e-9);
}

#[test]
fn test_distance_links_deterministic_without_seed_agreement() {
    // A layout whose triangles are neither skinny nor wide, so the pruner
    // never consults the RNG: ShortestDistFirst output is then identical
    // across different seeds.
    let brains = vec![
        WeightedPoint::new(0.0, 0.0, 1.0),
        WeightedPoint::new(10.0, 0.0, 1.0),
        WeightedPoint::new(5.0, 8.66, 1.0),
        WeightedPoint::new(15.0, 8.66, 1.0),
    ];
    let io = scattered_io(9, 17);

    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        compute_distance_links(&brains, &io, IoPriority::ShortestDistFirst, 10.0, &mut rng)
            .unwrap()
    };
    let a = run(1);
    let b = run(9999);
    assert_eq!(a.io_links, b.io_links);
    assert_eq!(a.brain_links, b.brain_links);
}

#[test]
fn test_voronoi_links_reproducible_with_seed() {
    let brains = scattered_brains(20, 7);
    let io = scattered_io(15, 7);

    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        compute_voronoi_links(&brains, &io, &mut rng).unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.io_links, b.io_links);
    assert_eq!(a.brain_links, b.brain_links);
    assert_eq!(a.clusters.len(), b.clusters.len());
}

#[test]
fn test_custom_config_disables_premerge() {
    let brains = vec![
        WeightedPoint::new(0.0, 0.0, 1.0),
        WeightedPoint::new(0.2, 0.0, 1.0),
        WeightedPoint::new(10.0, 0.0, 1.0),
    ];
    let config = LinkConfig {
        premerge_ratio: 0.0,
        merge_chance: 0.0,
        ..LinkConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let output = compute_voronoi_links_with(&brains, &[], &config, &mut rng).unwrap();
    assert_eq!(output.clusters.len(), 3);
}

#[test]
fn test_fuzzy_relink_exact_endpoints() {
    let a = DVec2::new(0.0, 0.0);
    let b = DVec2::new(10.0, 0.0);
    let new_points = vec![DVec2::new(50.0, 50.0), a, b];
    let links = vec![FuzzyLink::new(a, b, 1.0)];

    let result = fuzzy_relink(&links, &new_points, 8, 4);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].from, 1);
    assert_eq!(result[0].to, 2);
    assert!((result[0].weight - 1.0).abs() < 1e-12);
}
