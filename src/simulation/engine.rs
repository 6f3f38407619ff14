//! Trial runner — executes N independent trials and collects their results.
//!
//! Every trial builds its own random source from `(seed, trial_index)` and
//! writes its result into slot `trial_index` of two pre-sized vectors. Workers
//! never touch the same slot, so the trial phase needs no synchronization at
//! all. Because the seed depends only on the index, the serial and parallel
//! runners produce identical batches for the same configuration.

use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::time::Instant;

use crate::checkpoint::Checkpoints;
use crate::constants::SYMBOL_DOWN;
use crate::error::ConfigError;
use crate::types::{
    ExperimentConfig, RngKind, RunMode, TrialBatch, TrialExpectation, TrialWins,
};

use super::fast_prng::SplitMix64;
use super::random_source::TrialRng;
use super::statistics::{aggregate_batch, aggregate_batch_serial, ExperimentStatistics};
use super::trial::run_trial;

/// Run all trials on the rayon pool with random source `R`.
pub fn run_trials_parallel_with<R: TrialRng>(
    trials: usize,
    sequence_len: usize,
    seed: u64,
) -> TrialBatch {
    let mut expectations = vec![TrialExpectation::default(); trials];
    let mut wins = vec![TrialWins::default(); trials];

    expectations
        .par_iter_mut()
        .zip(wins.par_iter_mut())
        .enumerate()
        .for_each_init(
            || vec![SYMBOL_DOWN; sequence_len],
            |buf, (i, (exp_slot, win_slot))| {
                let mut rng = R::for_trial(seed, i as u64);
                let result = run_trial(&mut rng, buf);
                *exp_slot = result.expectation;
                *win_slot = result.wins;
            },
        );

    TrialBatch { expectations, wins }
}

/// Run all trials on the calling thread with random source `R`.
pub fn run_trials_serial_with<R: TrialRng>(
    trials: usize,
    sequence_len: usize,
    seed: u64,
) -> TrialBatch {
    let mut expectations = Vec::with_capacity(trials);
    let mut wins = Vec::with_capacity(trials);
    let mut buf = vec![SYMBOL_DOWN; sequence_len];

    for i in 0..trials {
        let mut rng = R::for_trial(seed, i as u64);
        let result = run_trial(&mut rng, &mut buf);
        expectations.push(result.expectation);
        wins.push(result.wins);
    }

    TrialBatch { expectations, wins }
}

/// Run the configured number of trials in parallel.
pub fn run_trials_parallel(config: &ExperimentConfig) -> TrialBatch {
    match config.rng {
        RngKind::Small => run_trials_parallel_with::<SmallRng>(
            config.trials,
            config.sequence_len,
            config.seed,
        ),
        RngKind::SplitMix => run_trials_parallel_with::<SplitMix64>(
            config.trials,
            config.sequence_len,
            config.seed,
        ),
    }
}

/// Run the configured number of trials on one thread.
pub fn run_trials_serial(config: &ExperimentConfig) -> TrialBatch {
    match config.rng {
        RngKind::Small => {
            run_trials_serial_with::<SmallRng>(config.trials, config.sequence_len, config.seed)
        }
        RngKind::SplitMix => {
            run_trials_serial_with::<SplitMix64>(config.trials, config.sequence_len, config.seed)
        }
    }
}

fn run_serial_phase(config: &ExperimentConfig, cp: &mut Checkpoints) -> ExperimentStatistics {
    let t0 = Instant::now();
    let batch = run_trials_serial(config);
    let stats = aggregate_batch_serial(config, &batch);
    log::info!(
        "Serial run: {} trials in {:.3}s",
        config.trials,
        t0.elapsed().as_secs_f64()
    );
    crate::checkpoint!(cp, "serial run complete");
    stats
}

fn run_parallel_phase(config: &ExperimentConfig, cp: &mut Checkpoints) -> ExperimentStatistics {
    let t0 = Instant::now();
    let batch = run_trials_parallel(config);
    log::info!(
        "Parallel trials: {} in {:.3}s ({} threads)",
        batch.len(),
        t0.elapsed().as_secs_f64(),
        rayon::current_num_threads()
    );
    crate::checkpoint!(cp, "parallel run complete");

    let t1 = Instant::now();
    let stats = aggregate_batch(config, &batch);
    log::info!("Aggregation: {:.3}s", t1.elapsed().as_secs_f64());
    crate::checkpoint!(cp, "aggregation complete");
    stats
}

/// Validate `config`, run every trial, and aggregate the results.
///
/// Fails only on configuration errors, before any trial runs.
pub fn run_experiment(
    config: &ExperimentConfig,
    cp: &mut Checkpoints,
) -> Result<ExperimentStatistics, ConfigError> {
    config.validate()?;
    log::debug!(
        "Experiment: trials={} length={} seed={} rng={} mode={:?}",
        config.trials,
        config.sequence_len,
        config.seed,
        config.rng,
        config.mode
    );

    let stats = match config.mode {
        RunMode::Parallel => run_parallel_phase(config, cp),
        RunMode::Serial => run_serial_phase(config, cp),
        RunMode::Compare => {
            let serial = run_serial_phase(config, cp);
            let parallel = run_parallel_phase(config, cp);
            if serial.expectation != parallel.expectation
                || serial.win_counts != parallel.win_counts
            {
                log::warn!("Serial and parallel runs disagree for the same seed");
            }
            parallel
        }
    };
    Ok(stats)
}
