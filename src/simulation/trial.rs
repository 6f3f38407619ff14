//! Evaluation of one trial: first-occurrence positions and pairwise winners.
//!
//! Both passes run over the same sequence. The win pass reads the positions
//! computed by the expectation pass instead of searching again.

use crate::constants::NUM_PATTERNS;
use crate::types::{Pattern, PatternPair, TrialExpectation, TrialResult, TrialWins};

use super::locator::locate;
use super::random_source::RandomSource;
use super::sequence::fill_sequence;

/// Expectation pass: first-occurrence end position of every pattern.
pub fn evaluate_expectation(sequence: &[u8]) -> TrialExpectation {
    let mut positions = [0u32; NUM_PATTERNS];
    for p in Pattern::all() {
        positions[p.index()] = locate(p.as_bytes(), sequence);
    }
    TrialExpectation { positions }
}

/// Win pass: pair (A, B) wins when A completes strictly before B.
///
/// Both-absent is a tie at the sentinel and neither order wins.
pub fn evaluate_wins(expectation: &TrialExpectation) -> TrialWins {
    let mut wins = TrialWins::default();
    for pair in PatternPair::all() {
        if expectation.position(pair.first()) < expectation.position(pair.second()) {
            wins.set(pair);
        }
    }
    wins
}

/// Evaluate both passes on one sequence.
pub fn evaluate_sequence(sequence: &[u8]) -> TrialResult {
    let expectation = evaluate_expectation(sequence);
    let wins = evaluate_wins(&expectation);
    TrialResult { expectation, wins }
}

/// Run one full trial: generate a sequence into `buf`, then evaluate it.
#[inline]
pub fn run_trial<R: RandomSource>(rng: &mut R, buf: &mut [u8]) -> TrialResult {
    fill_sequence(rng, buf);
    evaluate_sequence(buf)
}
