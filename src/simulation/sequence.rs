//! Random U/D sequence generation.

use crate::constants::{DRAW_HIGH, DRAW_LOW, SYMBOL_DOWN, SYMBOL_UP, UP_THRESHOLD};

use super::random_source::RandomSource;

/// Map one die-style draw to a symbol: 4..=6 → U, 1..=3 → D.
#[inline(always)]
pub fn symbol_for_draw(draw: u32) -> u8 {
    if draw > UP_THRESHOLD {
        SYMBOL_UP
    } else {
        SYMBOL_DOWN
    }
}

/// Fill `buf` with independent fair U/D symbols.
///
/// Reusing one buffer per worker avoids an allocation per trial.
#[inline]
pub fn fill_sequence<R: RandomSource>(rng: &mut R, buf: &mut [u8]) {
    for c in buf.iter_mut() {
        *c = symbol_for_draw(rng.draw(DRAW_LOW, DRAW_HIGH));
    }
}
