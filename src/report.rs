//! Text and JSON rendering of run statistics.

use std::fmt::Write as _;

use crate::constants::{NUM_PATTERNS, PATTERN_NAMES};
use crate::simulation::statistics::ExperimentStatistics;
use crate::types::{Pattern, PatternPair};

/// Column width of one matrix cell ("100.0" plus padding).
const CELL_WIDTH: usize = 6;

/// One line per pattern: average symbols observed until it first appears.
pub fn format_expectations(stats: &ExperimentStatistics) -> String {
    let mut out = String::new();
    for p in Pattern::all() {
        let _ = writeln!(
            out,
            "{}: expected symbols until first appearance = {:.1}",
            p,
            stats.expectation.average(p)
        );
    }
    out
}

/// 8×8 matrix of win percentages; row pattern vs column pattern, diagonal blank.
pub fn format_win_matrix(stats: &ExperimentStatistics) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:4}", "");
    for name in PATTERN_NAMES {
        let _ = write!(out, "{:>CELL_WIDTH$}", name);
    }
    out.push('\n');

    for row in Pattern::all() {
        let _ = write!(out, "{:4}", row.name());
        for col in 0..NUM_PATTERNS {
            let cell = Pattern::new(col).and_then(|c| PatternPair::new(row, c));
            match cell {
                Some(pair) => {
                    let _ = write!(
                        out,
                        "{:>CELL_WIDTH$.1}",
                        stats.win_counts.win_percent(pair)
                    );
                }
                None => {
                    let _ = write!(out, "{:CELL_WIDTH$}", "");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Full human-readable report.
pub fn format_report(stats: &ExperimentStatistics) -> String {
    let mut out = format!(
        "Trials: {}  Sequence length: {}  Seed: {}  RNG: {}\n\n",
        stats.trials, stats.sequence_len, stats.seed, stats.rng
    );
    out.push_str(&format_expectations(stats));
    out.push_str("\nWin rate (%) of row pattern appearing before column pattern:\n");
    out.push_str(&format_win_matrix(stats));
    out
}

pub fn to_json(stats: &ExperimentStatistics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}
