//! Monte Carlo simulation and statistics.
//!
//! - [`sequence`]: random U/D sequence generation
//! - [`locator`]: first-occurrence lookup
//! - [`trial`]: per-trial expectation and win passes
//! - [`engine`]: parallel and serial trial runners
//! - [`statistics`]: aggregation into run statistics

pub mod engine;
pub mod fast_prng;
pub mod locator;
pub mod random_source;
pub mod sequence;
pub mod statistics;
pub mod trial;

// Re-export commonly used items
pub use engine::{
    run_experiment, run_trials_parallel, run_trials_parallel_with, run_trials_serial,
    run_trials_serial_with,
};
pub use locator::locate;
pub use random_source::{RandomSource, TrialRng};
pub use sequence::fill_sequence;
pub use statistics::{
    aggregate_batch, aggregate_win_counts, aggregate_win_counts_serial, sum_expectations,
    AggregateExpectation, AggregateWinCounts, ExperimentStatistics, WinCounter,
};
pub use trial::{evaluate_sequence, run_trial};
