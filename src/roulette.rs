use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::wheel::{Pocket, WHEEL};

/// Spin source: draws one pocket uniformly from the wheel per call.
pub struct Roulette<R = StdRng> {
    rng: R,
}

impl Roulette<StdRng> {
    /// Unseeded, non-reproducible spins.
    pub fn new() -> Self {
        Roulette {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for Roulette<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Roulette<R> {
    pub fn with_rng(rng: R) -> Self {
        Roulette { rng }
    }

    pub fn spin(&mut self) -> Pocket {
        WHEEL[self.rng.gen_range(0..WHEEL.len())]
    }
}
