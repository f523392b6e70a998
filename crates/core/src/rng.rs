//! Explicit, seedable random source shared by the builder and the erosion pass.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }
}

/// Production source: one ChaCha8 stream per generation run.
pub struct MazeRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl MazeRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for MazeRng {
    fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.inner.next_u32() % bound
    }
}
