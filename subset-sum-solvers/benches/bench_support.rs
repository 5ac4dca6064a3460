//! Benchmark support utilities for the solvers.
//!
//! Provides deterministic instance generation so every run measures the
//! same inputs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use subset_sum_core::{Density, Instance};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Largest element value drawn for sparse benchmark instances.
pub const MAX_VALUE: u64 = 1_000;

/// Generate `size` values with a target between 40% and 60% of their total.
///
/// Sparse instances draw from `1..=MAX_VALUE`, dense instances from a tenth
/// of that range.
#[must_use]
pub fn generate_instance(size: usize, density: Density, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ceiling = match density {
        Density::Dense => MAX_VALUE / 10,
        Density::Sparse => MAX_VALUE,
    };
    let set: Vec<u64> = (0..size).map(|_| rng.gen_range(1..=ceiling)).collect();
    let total: u64 = set.iter().sum();
    let permille = rng.gen_range(400..=600);
    let target = total * permille / 1_000;
    Instance::new(set, target).expect("benchmark values are positive and small")
}
