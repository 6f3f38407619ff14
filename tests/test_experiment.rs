//! End-to-end runs: aggregate invariants, serial/parallel agreement, and a
//! statistical regression against the known fair-coin values.

use std::sync::OnceLock;

use penney::checkpoint::Checkpoints;
use penney::constants::*;
use penney::simulation::{run_experiment, run_trials_parallel, ExperimentStatistics};
use penney::{ConfigError, ExperimentConfig, Pattern, PatternPair, RngKind, RunMode};

const REGRESSION_TRIALS: usize = 40_000;

fn run(config: &ExperimentConfig) -> ExperimentStatistics {
    run_experiment(config, &mut Checkpoints::new()).unwrap()
}

// Shared regression run (computed once per test binary).
static REGRESSION: OnceLock<ExperimentStatistics> = OnceLock::new();

fn regression() -> &'static ExperimentStatistics {
    REGRESSION.get_or_init(|| {
        run(&ExperimentConfig {
            trials: REGRESSION_TRIALS,
            ..Default::default()
        })
    })
}

fn pair(a: &str, b: &str) -> PatternPair {
    PatternPair::new(Pattern::from_name(a).unwrap(), Pattern::from_name(b).unwrap()).unwrap()
}

// ── Aggregate invariants ─────────────────────────────────────────────

#[test]
fn pair_plus_reverse_at_most_trials() {
    let stats = regression();
    for p in PatternPair::all() {
        let total = stats.win_counts.count(p) + stats.win_counts.count(p.reversed());
        assert!(total <= stats.trials, "{p}: {total} > {}", stats.trials);
    }
}

#[test]
fn expectation_sums_bounded_by_window() {
    let stats = regression();
    let n = stats.trials;
    for p in Pattern::all() {
        let sum = stats.expectation.sum(p);
        assert!(sum >= PATTERN_LEN as u64 * n);
        assert!(sum <= SEQUENCE_LEN as u64 * n);
    }
}

#[test]
fn batch_win_counts_match_per_trial_sums() {
    let config = ExperimentConfig {
        trials: 3000,
        seed: 11,
        ..Default::default()
    };
    let batch = run_trials_parallel(&config);
    let stats = run(&config);
    let per_trial: u64 = batch.wins.iter().map(|w| w.count() as u64).sum();
    assert_eq!(stats.win_counts.counts.iter().sum::<u64>(), per_trial);
    for w in &batch.wins {
        assert!(w.count() as usize <= NUM_PAIRS);
    }
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn serial_and_parallel_agree() {
    for rng in [RngKind::Small, RngKind::SplitMix] {
        let base = ExperimentConfig {
            trials: 5000,
            seed: 2024,
            rng,
            ..Default::default()
        };
        let par = run(&ExperimentConfig {
            mode: RunMode::Parallel,
            ..base.clone()
        });
        let ser = run(&ExperimentConfig {
            mode: RunMode::Serial,
            ..base
        });
        assert_eq!(par.expectation, ser.expectation, "rng={rng}");
        assert_eq!(par.win_counts, ser.win_counts, "rng={rng}");
    }
}

#[test]
fn same_seed_same_statistics() {
    let config = ExperimentConfig {
        trials: 2000,
        seed: 5,
        ..Default::default()
    };
    assert_eq!(run(&config).win_counts, run(&config).win_counts);

    let other = ExperimentConfig {
        seed: 6,
        ..config.clone()
    };
    assert_ne!(run(&config).expectation, run(&other).expectation);
}

// ── Statistical regression ──────────────────────────────────────────

#[test]
fn expectations_converge_to_theory() {
    let stats = regression();
    let expected = [
        ("DDD", 14.0),
        ("DDU", 8.0),
        ("DUD", 10.0),
        ("DUU", 8.0),
        ("UDD", 8.0),
        ("UDU", 10.0),
        ("UUD", 8.0),
        ("UUU", 14.0),
    ];
    for (name, theory) in expected {
        let avg = stats.expectation.average(Pattern::from_name(name).unwrap());
        assert!(
            (avg - theory).abs() < 0.4,
            "{name}: simulated {avg:.3}, theory {theory}"
        );
    }
}

#[test]
fn penney_win_rates() {
    let stats = regression();
    let cases = [
        (pair("DUU", "UUU"), 87.5),
        (pair("UDD", "DDD"), 87.5),
        (pair("UUD", "UDU"), 200.0 / 3.0),
        (pair("DDU", "DUD"), 200.0 / 3.0),
        (pair("UUU", "DDD"), 50.0),
    ];
    for (p, theory) in cases {
        let pct = stats.win_counts.win_percent(p);
        assert!(
            (pct - theory).abs() < 1.5,
            "{p}: simulated {pct:.2}%, theory {theory:.2}%"
        );
    }
}

#[test]
fn reference_length_leaves_almost_no_ties() {
    // With L=100 every pattern is nearly always present, so for each pair
    // one direction wins in practically every trial.
    let stats = regression();
    for p in PatternPair::all() {
        let total = stats.win_counts.count(p) + stats.win_counts.count(p.reversed());
        assert!(
            total as f64 >= 0.995 * stats.trials as f64,
            "{p}: only {total} decided trials"
        );
    }
}

// ── Configuration failures ──────────────────────────────────────────

#[test]
fn invalid_configurations_fail_fast() {
    let mut cp = Checkpoints::new();
    let zero = ExperimentConfig {
        trials: 0,
        ..Default::default()
    };
    assert_eq!(
        run_experiment(&zero, &mut cp).unwrap_err(),
        ConfigError::ZeroTrials
    );

    let short = ExperimentConfig {
        sequence_len: 2,
        ..Default::default()
    };
    assert_eq!(
        run_experiment(&short, &mut cp).unwrap_err(),
        ConfigError::SequenceTooShort { len: 2, longest: 3 }
    );
    assert!(cp.marks().is_empty());
}

#[test]
fn minimal_window_runs() {
    // L equal to the pattern length: each trial holds exactly one pattern,
    // completing at position L, which is also the sentinel
    let stats = run(&ExperimentConfig {
        trials: 1000,
        sequence_len: PATTERN_LEN,
        ..Default::default()
    });
    let total: u64 = stats.expectation.sums.iter().sum();
    assert_eq!(total, 1000 * (NUM_PATTERNS as u64) * PATTERN_LEN as u64);
    // a match ending on the last symbol ties with the sentinel, so nothing wins
    assert_eq!(stats.win_counts.counts.iter().sum::<u64>(), 0);
}
