//! Injectable randomness for the `__order__: "random"` directive.
//!
//! The engine is otherwise pure and stateless (spec: "no shared mutable
//! state; each `match` call is self-contained"); `Rng` is the one piece of
//! caller-supplied state, so tests can seed it for deterministic output.

use rand::rngs::StdRng;
use rand::{SeedableRng, seq::SliceRandom};

pub struct Rng(StdRng);

impl Rng {
    /// A reproducible RNG for tests and any caller that wants deterministic
    /// `__order__: "random"` output.
    pub fn from_seed(seed: u64) -> Self {
        Rng(StdRng::seed_from_u64(seed))
    }

    /// A non-deterministic RNG seeded from the OS's entropy source.
    pub fn from_os_rng() -> Self {
        Rng(StdRng::from_os_rng())
    }

    pub(crate) fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
