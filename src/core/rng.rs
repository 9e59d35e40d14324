//! Pluggable random source
//!
//! Every draw in the simulation goes through [`RandomSource`], so a run can be
//! made reproducible by seeding it or by scripting the exact draw sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies uniform integers in an inclusive range
pub trait RandomSource: Send {
    /// Uniform integer in `[low, high]`. Implementations treat `high < low`
    /// as the single value `low`.
    fn int_in_range(&mut self, low: i32, high: i32) -> i32;
}

/// ChaCha8-backed source, deterministic for a given seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of draws, for tests that need exact combat sequences
///
/// Each call consumes the next value, clamped into the requested range.
/// Once the script runs out every draw returns `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<i32>,
    consumed: usize,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws served so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn int_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.consumed += 1;
        let high = high.max(low);
        match self.draws.pop_front() {
            Some(value) => value.clamp(low, high),
            None => low,
        }
    }
}
