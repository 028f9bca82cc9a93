//! Seeded randomness for skill rolls and enemy waves.

use rand::prelude::*;
use rand::rngs::StdRng;

/// Seeded random number generator for deterministic battles.
///
/// The same seed and the same sequence of calls always yield the same
/// battle. Without a seed, uses system entropy.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Pick an index into a collection of `len` items. `len` must be non-zero.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
