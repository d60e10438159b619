use rand::rngs::{StdRng, ThreadRng};
use rand::{thread_rng, Rng, SeedableRng};

use super::BitSource;

/// Fair coin flips drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomBits<R> {
    rng: R,
}

impl<R: Rng> RandomBits<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBits<ThreadRng> {
    /// Different bits on every run.
    pub fn from_entropy() -> Self {
        Self::new(thread_rng())
    }
}

impl RandomBits<StdRng> {
    /// Same bits for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BitSource for RandomBits<R> {
    fn next_bit(&mut self) -> u8 {
        if self.rng.gen_bool(0.5) {
            1
        } else {
            0
        }
    }
}
