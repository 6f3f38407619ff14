//! Aggregation of per-trial results into run statistics.
//!
//! - [`sum_expectations`]: per-pattern sum of first-occurrence positions
//! - [`aggregate_win_counts`]: per-pair win counts, parallel over shards with
//!   atomic counters
//! - [`aggregate_win_counts_serial`]: the same reduction on one thread
//! - [`ExperimentStatistics`]: the serializable summary the reporter consumes

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::constants::{NUM_PAIRS, NUM_PATTERNS};
use crate::types::{
    ExperimentConfig, Pattern, PatternPair, RngKind, TrialBatch, TrialExpectation, TrialWins,
};

/// Trials per aggregation shard.
const SHARD_SIZE: usize = 4096;

// ── Expectation ─────────────────────────────────────────────────────

/// Per-pattern sum of first-occurrence positions over all trials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateExpectation {
    pub sums: [u64; NUM_PATTERNS],
    pub trials: u64,
}

impl AggregateExpectation {
    pub fn sum(&self, pattern: Pattern) -> u64 {
        self.sums[pattern.index()]
    }

    /// Average symbols observed until `pattern` first completes.
    pub fn average(&self, pattern: Pattern) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.sums[pattern.index()] as f64 / self.trials as f64
    }
}

/// Sum every pattern's position across all trials, each trial visited once.
pub fn sum_expectations(results: &[TrialExpectation]) -> AggregateExpectation {
    let mut sums = [0u64; NUM_PATTERNS];
    for r in results {
        for (sum, &pos) in sums.iter_mut().zip(r.positions.iter()) {
            *sum += pos as u64;
        }
    }
    AggregateExpectation {
        sums,
        trials: results.len() as u64,
    }
}

// ── Win counts ──────────────────────────────────────────────────────

/// Concurrent per-pair win counter: one atomic per dense pair slot.
///
/// Every slot exists and starts at zero from construction, so concurrent
/// increments never race on key insertion.
pub struct WinCounter {
    counts: [AtomicU64; NUM_PAIRS],
}

impl Default for WinCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl WinCounter {
    pub fn new() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Atomically add `n` wins to one pair slot.
    #[inline(always)]
    pub fn add(&self, pair_slot: usize, n: u64) {
        self.counts[pair_slot].fetch_add(n, Ordering::Relaxed);
    }

    pub fn into_counts(self) -> [u64; NUM_PAIRS] {
        self.counts.map(AtomicU64::into_inner)
    }
}

/// Per-pair count of trials in which the first pattern won.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateWinCounts {
    pub counts: [u64; NUM_PAIRS],
    pub trials: u64,
}

impl AggregateWinCounts {
    pub fn count(&self, pair: PatternPair) -> u64 {
        self.counts[pair.index()]
    }

    /// Win percentage of `pair.first()` over `pair.second()`.
    pub fn win_percent(&self, pair: PatternPair) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.counts[pair.index()] as f64 / self.trials as f64 * 100.0
    }
}

/// Count wins per pair, sharding trials across the rayon pool.
///
/// Each shard tallies locally and then adds its totals to the shared atomic
/// counters, one `fetch_add` per pair per shard.
pub fn aggregate_win_counts(results: &[TrialWins]) -> AggregateWinCounts {
    let counter = WinCounter::new();
    results.par_chunks(SHARD_SIZE).for_each(|shard| {
        let mut local = [0u64; NUM_PAIRS];
        for w in shard {
            for slot in w.winning_indices() {
                local[slot] += 1;
            }
        }
        for (slot, &n) in local.iter().enumerate() {
            if n > 0 {
                counter.add(slot, n);
            }
        }
    });
    AggregateWinCounts {
        counts: counter.into_counts(),
        trials: results.len() as u64,
    }
}

/// Single-threaded reference for [`aggregate_win_counts`].
pub fn aggregate_win_counts_serial(results: &[TrialWins]) -> AggregateWinCounts {
    let mut counts = [0u64; NUM_PAIRS];
    for w in results {
        for slot in w.winning_indices() {
            counts[slot] += 1;
        }
    }
    AggregateWinCounts {
        counts,
        trials: results.len() as u64,
    }
}

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct PatternExpectation {
    pub pattern: &'static str,
    pub position_sum: u64,
    pub expected_symbols: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PairWinRate {
    pub first: &'static str,
    pub second: &'static str,
    pub wins: u64,
    pub win_percent: f64,
}

/// Final statistics of one run.
#[derive(Clone, Debug, Serialize)]
pub struct ExperimentStatistics {
    pub trials: u64,
    pub sequence_len: usize,
    pub seed: u64,
    pub rng: RngKind,
    #[serde(skip)]
    pub expectation: AggregateExpectation,
    #[serde(skip)]
    pub win_counts: AggregateWinCounts,
    pub expectations: Vec<PatternExpectation>,
    pub win_rates: Vec<PairWinRate>,
}

impl ExperimentStatistics {
    pub fn new(
        config: &ExperimentConfig,
        expectation: AggregateExpectation,
        win_counts: AggregateWinCounts,
    ) -> Self {
        let expectations = Pattern::all()
            .map(|p| PatternExpectation {
                pattern: p.name(),
                position_sum: expectation.sum(p),
                expected_symbols: expectation.average(p),
            })
            .collect();
        let win_rates = PatternPair::all()
            .map(|pair| PairWinRate {
                first: pair.first().name(),
                second: pair.second().name(),
                wins: win_counts.count(pair),
                win_percent: win_counts.win_percent(pair),
            })
            .collect();
        Self {
            trials: expectation.trials,
            sequence_len: config.sequence_len,
            seed: config.seed,
            rng: config.rng,
            expectation,
            win_counts,
            expectations,
            win_rates,
        }
    }
}

/// Reduce a batch with the parallel win aggregator.
pub fn aggregate_batch(config: &ExperimentConfig, batch: &TrialBatch) -> ExperimentStatistics {
    ExperimentStatistics::new(
        config,
        sum_expectations(&batch.expectations),
        aggregate_win_counts(&batch.wins),
    )
}

/// Reduce a batch entirely on the calling thread.
pub fn aggregate_batch_serial(
    config: &ExperimentConfig,
    batch: &TrialBatch,
) -> ExperimentStatistics {
    ExperimentStatistics::new(
        config,
        sum_expectations(&batch.expectations),
        aggregate_win_counts_serial(&batch.wins),
    )
}
