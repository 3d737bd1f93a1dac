//! Deterministic RNG for topology generators.
//!
//! Generated topologies must be reproducible: the same seed always yields
//! the same node count, edge lengths, and lane counts.  `GenRng` wraps a
//! seeded `SmallRng` and exposes only the handful of draws the generators
//! need.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG used by `tn_topology::generate`.
pub struct GenRng(SmallRng);

impl GenRng {
    pub fn new(seed: u64) -> Self {
        GenRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one per generated branch.
    pub fn child(&mut self, offset: u64) -> GenRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        GenRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
