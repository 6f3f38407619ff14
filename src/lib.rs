//! # Penney — Monte Carlo study of length-3 coin patterns
//!
//! Estimates, by repeated random trials, two statistics about fair U/D
//! sequences:
//!
//! 1. the expected number of symbols observed until each of the 8 length-3
//!    patterns first appears, and
//! 2. for every ordered pair of distinct patterns (A, B), the probability that
//!    A appears strictly before B.
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Generate | [`simulation::sequence`] | One L=100 symbol sequence per trial from a per-trial random source |
//! | Locate | [`simulation::locator`] | End position of the first match, or the sentinel L |
//! | Evaluate | [`simulation::trial`] | 8 positions + 56 pairwise outcomes from one sequence |
//! | Run | [`simulation::engine`] | N trials on the rayon pool, each writing its own result slot |
//! | Aggregate | [`simulation::statistics`] | Position sums and atomic per-pair win counters |
//! | Report | [`report`] | Average positions and an 8×8 win-percentage matrix |
//!
//! ## Pair layout
//!
//! The 56 ordered pairs live in a dense array indexed by
//! [`constants::pair_index`], row-major with the diagonal skipped. Win
//! aggregation uses one `AtomicU64` per slot, so there is no hashing and no
//! key insertion during the concurrent phase.
//!
//! ## Reference values
//!
//! For a fair coin the expected waiting times are 8 (DDU, DUU, UDD, UUD),
//! 10 (DUD, UDU) and 14 (DDD, UUU). The L=100 observation window truncates
//! them only negligibly.

pub mod checkpoint;
pub mod constants;
pub mod env_config;
pub mod error;
pub mod report;
pub mod simulation;
pub mod types;

pub use error::ConfigError;
pub use types::{ExperimentConfig, Pattern, PatternPair, RngKind, RunMode};
