//! Pluggable random sources.
//!
//! The simulation only needs "draw a bounded integer". [`RandomSource`] is that
//! capability; [`SmallRng`] and [`SplitMix64`] both provide it, and the runner
//! picks one per [`RngKind`] at configuration time. Every trial builds its own
//! instance from `(seed, trial_index)`, so no generator state is shared
//! between threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::fast_prng::SplitMix64;

/// A source of uniform bounded integers.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn draw(&mut self, low: u32, high: u32) -> u32;
}

/// A random source that can be built independently for every trial.
pub trait TrialRng: RandomSource + Sized {
    fn for_trial(seed: u64, trial: u64) -> Self;
}

impl RandomSource for SmallRng {
    #[inline(always)]
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..=high)
    }
}

impl TrialRng for SmallRng {
    #[inline(always)]
    fn for_trial(seed: u64, trial: u64) -> Self {
        SmallRng::seed_from_u64(seed.wrapping_add(trial))
    }
}

impl RandomSource for SplitMix64 {
    #[inline(always)]
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.bounded(low, high)
    }
}

impl TrialRng for SplitMix64 {
    #[inline(always)]
    fn for_trial(seed: u64, trial: u64) -> Self {
        SplitMix64::for_stream(seed, trial)
    }
}
