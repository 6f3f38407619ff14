//! Core data structures: patterns, pairs, per-trial results, and run configuration.
//!
//! Per-trial results are compact fixed-size values (a position array and a
//! 56-bit win mask) so a batch of one million trials stays around 40 MB and
//! can be written slot-by-slot from parallel workers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::*;
use crate::error::ConfigError;

/// One of the 8 fixed length-3 patterns, identified by its index in
/// [`PATTERN_NAMES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(usize);

impl Pattern {
    /// Pattern at `index`, or `None` past the end of [`PATTERN_NAMES`].
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_PATTERNS).then_some(Self(index))
    }

    /// Look up a pattern by its text, e.g. `"UDU"`.
    pub fn from_name(name: &str) -> Option<Self> {
        PATTERN_NAMES.iter().position(|&p| p == name).map(Self)
    }

    /// All 8 patterns in [`PATTERN_NAMES`] order.
    pub fn all() -> impl Iterator<Item = Pattern> {
        (0..NUM_PATTERNS).map(Self)
    }

    /// Position in [`PATTERN_NAMES`]; also the slot in per-pattern arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }

    /// Text form, e.g. `"UDU"`.
    pub fn name(self) -> &'static str {
        PATTERN_NAMES[self.0]
    }

    /// Symbols to match against a generated sequence.
    #[inline(always)]
    pub fn as_bytes(self) -> &'static [u8] {
        PATTERN_NAMES[self.0].as_bytes()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered pair (A, B) of distinct patterns. A "wins" a trial when it
/// completes strictly before B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternPair {
    first: Pattern,
    second: Pattern,
}

impl PatternPair {
    /// `None` when `first == second`; the diagonal is not part of the key space.
    pub fn new(first: Pattern, second: Pattern) -> Option<Self> {
        (first != second).then_some(Self { first, second })
    }

    /// Pair stored at dense slot `index`, or `None` past the last of the 56.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_PAIRS {
            return None;
        }
        let (i, j) = pair_from_index(index);
        Some(Self {
            first: Pattern(i),
            second: Pattern(j),
        })
    }

    /// All 56 pairs in row-major order, diagonal skipped.
    pub fn all() -> impl Iterator<Item = PatternPair> {
        (0..NUM_PAIRS).map(|idx| {
            let (i, j) = pair_from_index(idx);
            Self {
                first: Pattern(i),
                second: Pattern(j),
            }
        })
    }

    /// The pattern that wins when it completes first.
    pub fn first(self) -> Pattern {
        self.first
    }

    /// The pattern it is raced against.
    pub fn second(self) -> Pattern {
        self.second
    }

    /// The same two patterns in the opposite order.
    pub fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Dense slot, see [`pair_index`].
    #[inline(always)]
    pub fn index(self) -> usize {
        pair_index(self.first.0, self.second.0)
    }
}

impl fmt::Display for PatternPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// First-occurrence end position of every pattern in one sequence.
/// An absent pattern holds the sentinel (the sequence length).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrialExpectation {
    pub positions: [u32; NUM_PATTERNS],
}

impl TrialExpectation {
    #[inline(always)]
    pub fn position(&self, pattern: Pattern) -> u32 {
        self.positions[pattern.index()]
    }
}

/// Win outcome of every ordered pair in one sequence, one bit per
/// [`pair_index`] slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrialWins {
    mask: u64,
}

impl TrialWins {
    #[inline(always)]
    pub fn set(&mut self, pair: PatternPair) {
        self.mask |= 1u64 << pair.index();
    }

    #[inline(always)]
    pub fn won(&self, pair: PatternPair) -> bool {
        self.mask & (1u64 << pair.index()) != 0
    }

    /// Number of pairs with a strict ordering in this trial.
    pub fn count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Iterate the slot indices of the winning pairs.
    pub fn winning_indices(&self) -> impl Iterator<Item = usize> {
        let mut rest = self.mask;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let idx = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(idx)
        })
    }
}

/// Both results of one trial, evaluated on the same sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrialResult {
    pub expectation: TrialExpectation,
    pub wins: TrialWins,
}

/// Per-trial results of a whole run. `expectations[i]` and `wins[i]` come
/// from trial `i`.
pub struct TrialBatch {
    pub expectations: Vec<TrialExpectation>,
    pub wins: Vec<TrialWins>,
}

impl TrialBatch {
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

/// Which random source drives symbol generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RngKind {
    /// `rand::rngs::SmallRng` (Xoshiro256++ on 64-bit targets).
    #[default]
    Small,
    /// The crate's [`crate::simulation::fast_prng::SplitMix64`].
    SplitMix,
}

impl FromStr for RngKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" | "smallrng" => Ok(Self::Small),
            "splitmix" | "splitmix64" => Ok(Self::SplitMix),
            other => Err(ConfigError::UnknownRng(other.to_string())),
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => f.write_str("small"),
            Self::SplitMix => f.write_str("splitmix"),
        }
    }
}

/// How trials are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Parallel,
    Serial,
    /// Serial and parallel back to back; the parallel result is reported.
    Compare,
}

/// Fixed configuration of one experiment run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentConfig {
    pub trials: usize,
    pub sequence_len: usize,
    pub seed: u64,
    pub rng: RngKind,
    pub mode: RunMode,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sequence_len: SEQUENCE_LEN,
            seed: DEFAULT_SEED,
            rng: RngKind::default(),
            mode: RunMode::default(),
        }
    }
}

impl ExperimentConfig {
    /// Check the run invariants against the fixed pattern set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with_patterns(&PATTERN_NAMES)
    }

    /// Check the run invariants against an arbitrary pattern set.
    pub fn validate_with_patterns(&self, patterns: &[&str]) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        let longest = patterns
            .iter()
            .map(|p| p.len())
            .max()
            .ok_or(ConfigError::EmptyPatternSet)?;
        if self.sequence_len < longest {
            return Err(ConfigError::SequenceTooShort {
                len: self.sequence_len,
                longest,
            });
        }
        if self.sequence_len > MAX_SEQUENCE_LEN {
            return Err(ConfigError::SequenceTooLong {
                len: self.sequence_len,
                max: MAX_SEQUENCE_LEN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_lookup() {
        let p = Pattern::from_name("UDU").unwrap();
        assert_eq!(p.index(), 5);
        assert_eq!(p.as_bytes(), b"UDU");
        assert_eq!(p.to_string(), "UDU");
        assert!(Pattern::from_name("UUUU").is_none());
        assert!(Pattern::new(NUM_PATTERNS).is_none());
    }

    #[test]
    fn test_pair_rejects_diagonal() {
        let p = Pattern::new(3).unwrap();
        assert!(PatternPair::new(p, p).is_none());
    }

    #[test]
    fn test_pair_enumeration() {
        let pairs: Vec<_> = PatternPair::all().collect();
        assert_eq!(pairs.len(), NUM_PAIRS);
        for (idx, pair) in pairs.iter().enumerate() {
            assert_ne!(pair.first(), pair.second());
            assert_eq!(pair.index(), idx);
            assert_eq!(PatternPair::from_index(idx), Some(*pair));
        }
        assert_eq!(pairs[0].to_string(), "DDD vs DDU");
        assert!(PatternPair::from_index(NUM_PAIRS).is_none());
    }

    #[test]
    fn test_trial_wins_bits() {
        let mut wins = TrialWins::default();
        let a = PatternPair::from_index(3).unwrap();
        let b = PatternPair::from_index(55).unwrap();
        wins.set(a);
        wins.set(b);
        assert!(wins.won(a));
        assert!(wins.won(b));
        assert!(!wins.won(a.reversed()));
        assert_eq!(wins.count(), 2);
        assert_eq!(wins.winning_indices().collect::<Vec<_>>(), vec![3, 55]);
    }

    #[test]
    fn test_rng_kind_parse() {
        assert_eq!("small".parse::<RngKind>(), Ok(RngKind::Small));
        assert_eq!("splitmix".parse::<RngKind>(), Ok(RngKind::SplitMix));
        assert_eq!(
            "mt19937".parse::<RngKind>(),
            Err(ConfigError::UnknownRng("mt19937".into()))
        );
    }

    #[test]
    fn test_validate() {
        assert!(ExperimentConfig::default().validate().is_ok());

        let zero = ExperimentConfig {
            trials: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTrials));

        let short = ExperimentConfig {
            sequence_len: 2,
            ..Default::default()
        };
        assert_eq!(
            short.validate(),
            Err(ConfigError::SequenceTooShort { len: 2, longest: 3 })
        );

        assert_eq!(
            ExperimentConfig::default().validate_with_patterns(&[]),
            Err(ConfigError::EmptyPatternSet)
        );
    }

    #[test]
    fn test_validate_sequence_upper_bound() {
        let at_max = ExperimentConfig {
            sequence_len: MAX_SEQUENCE_LEN,
            ..Default::default()
        };
        assert!(at_max.validate().is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_validate_rejects_length_past_u32() {
        let long = ExperimentConfig {
            sequence_len: MAX_SEQUENCE_LEN + 1,
            ..Default::default()
        };
        assert_eq!(
            long.validate(),
            Err(ConfigError::SequenceTooLong {
                len: MAX_SEQUENCE_LEN + 1,
                max: MAX_SEQUENCE_LEN,
            })
        );
    }
}
