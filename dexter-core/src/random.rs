//! Injectable randomness for random-jump targets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded random integers.
pub trait RandomSource: Send {
    /// Uniform integer in `[low, high)`. `high` must be greater than `low`.
    fn next_in(&mut self, low: u32, high: u32) -> u32;
}

/// [`RandomSource`] over `StdRng`. A fixed seed reproduces a fixed sequence.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..high)
    }
}
