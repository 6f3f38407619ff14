//! Experiment constants and pair-indexing functions.
//!
//! - |P| = [`NUM_PATTERNS`] = 8 length-3 patterns over {U, D}
//! - |P×P \ diag| = [`NUM_PAIRS`] = 56 ordered pairs of distinct patterns
//! - PAIR_INDEX(i, j) = [`pair_index`]`(i, j)`, row-major with the diagonal skipped
//!
//! The pair layout matches the order the win-rate matrix is printed in, so a
//! dense array indexed by `pair_index` can be rendered row by row without
//! any lookup.

/// Symbol for an "up" draw.
pub const SYMBOL_UP: u8 = b'U';

/// Symbol for a "down" draw.
pub const SYMBOL_DOWN: u8 = b'D';

/// Length of every pattern.
pub const PATTERN_LEN: usize = 3;

/// Number of distinct patterns: 2^3.
pub const NUM_PATTERNS: usize = 8;

/// Number of ordered pairs of distinct patterns: 8 * 7.
pub const NUM_PAIRS: usize = NUM_PATTERNS * (NUM_PATTERNS - 1);

/// All patterns, in report order.
pub const PATTERN_NAMES: [&str; NUM_PATTERNS] =
    ["DDD", "DDU", "DUD", "DUU", "UDD", "UDU", "UUD", "UUU"];

/// Length L of the generated sequence in the reference configuration.
pub const SEQUENCE_LEN: usize = 100;

/// Longest supported sequence; positions and the sentinel are stored as `u32`.
pub const MAX_SEQUENCE_LEN: usize = u32::MAX as usize;

/// Trial count N in the reference configuration.
pub const DEFAULT_TRIALS: usize = 1_000_000;

/// Default base seed for per-trial random sources.
pub const DEFAULT_SEED: u64 = 42;

/// Bounds of the uniform integer draw behind each symbol.
pub const DRAW_LOW: u32 = 1;
pub const DRAW_HIGH: u32 = 6;

/// Draws strictly above this value become [`SYMBOL_UP`].
pub const UP_THRESHOLD: u32 = 3;

/// Map an ordered pair (i, j), i ≠ j, to its slot in a dense 56-entry array.
///
/// Row `i` owns slots `i * 7 .. i * 7 + 7`; column `j` is shifted left by one
/// once it has passed the diagonal.
#[inline(always)]
pub fn pair_index(first: usize, second: usize) -> usize {
    debug_assert!(first != second, "pair ({first}, {second}) is on the diagonal");
    debug_assert!(first < NUM_PATTERNS && second < NUM_PATTERNS);
    let col = if second < first { second } else { second - 1 };
    first * (NUM_PATTERNS - 1) + col
}

/// Inverse of [`pair_index`].
#[inline(always)]
pub fn pair_from_index(index: usize) -> (usize, usize) {
    debug_assert!(index < NUM_PAIRS);
    let first = index / (NUM_PATTERNS - 1);
    let col = index % (NUM_PATTERNS - 1);
    let second = if col < first { col } else { col + 1 };
    (first, second)
}
