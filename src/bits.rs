//! Bit-manipulation helpers for basis-state bookkeeping.

/// Counts the set bits of a machine word.
///
/// One width-independent routine covers every occupation-number word the
/// host code produces: narrower words zero-extend into `u64`, and the
/// hardware popcount instruction does the rest.
#[inline]
pub fn population_count(word: u64) -> u32 {
    word.count_ones()
}
