//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen line from the set. The generator is
//! a seedable ChaCha8 stream so that runs can be reproduced exactly.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{ReplacementPolicy, Touch};

/// Random Policy state.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    seed: Option<u64>,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Generator seed; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            rng: Self::generator(seed),
        }
    }

    fn generator(seed: Option<u64>) -> ChaCha8Rng {
        seed.map_or_else(ChaCha8Rng::from_os_rng, ChaCha8Rng::seed_from_u64)
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Access history does not influence random choice.
    fn touch(&mut self, _line: usize, _event: Touch) {}

    fn victim(&mut self, candidates: Range<usize>) -> usize {
        self.rng.random_range(candidates)
    }

    /// Restarts the generator from its initial seed.
    fn reset(&mut self) {
        self.rng = Self::generator(self.seed);
    }
}
