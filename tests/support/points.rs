#![allow(dead_code)]

use brain_linker::WeightedPoint;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Scatter brains uniformly over a 100x100 region with varied capacities.
pub fn scattered_brains(n: usize, seed: u64) -> Vec<WeightedPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            WeightedPoint::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.5..3.0),
            )
        })
        .collect()
}

/// Scatter IO devices uniformly over the same region as the brains.
pub fn scattered_io(n: usize, seed: u64) -> Vec<WeightedPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x1000_0000);
    (0..n)
        .map(|_| {
            WeightedPoint::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.5..2.0),
            )
        })
        .collect()
}

/// IO devices bunched around one spot, for overload scenarios.
pub fn clustered_io(n: usize, cx: f64, cy: f64, spread: f64, seed: u64) -> Vec<WeightedPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            WeightedPoint::new(
                cx + rng.gen_range(-spread..spread),
                cy + rng.gen_range(-spread..spread),
                1.0,
            )
        })
        .collect()
}

/// Brains in a straight line: a Delaunay structure with edges but no
/// triangles.
pub fn collinear_brains(n: usize, spacing: f64) -> Vec<WeightedPoint> {
    (0..n)
        .map(|i| WeightedPoint::new(i as f64 * spacing, 0.0, 1.0))
        .collect()
}
