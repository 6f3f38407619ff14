//! First-occurrence lookup of a pattern inside a sequence.

/// End position of the first occurrence of `pattern` in `sequence`.
///
/// A match starting at 0-based index `i` returns `i + pattern.len()`, the
/// number of symbols observed until the pattern completed. When the pattern
/// does not occur the sentinel `sequence.len()` is returned. An empty pattern
/// completes before any symbol is observed and returns 0.
#[inline]
pub fn locate(pattern: &[u8], sequence: &[u8]) -> u32 {
    let sentinel = sequence.len() as u32;
    if pattern.is_empty() {
        return 0;
    }
    if pattern.len() > sequence.len() {
        return sentinel;
    }
    sequence
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map_or(sentinel, |start| (start + pattern.len()) as u32)
}
