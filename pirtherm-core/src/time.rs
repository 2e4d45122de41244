//! Wraparound-safe millisecond arithmetic
//!
//! The platform tick counter is a free-running `u32` that wraps roughly
//! every 49.7 days. Intervals are always the modular difference.

/// Milliseconds elapsed from `since` to `now` on a wrapping counter
///
/// Correct as long as the real interval is shorter than one full wrap.
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Check whether at least `duration_ms` has passed since `since`
#[inline]
pub const fn has_elapsed(now: u32, since: u32, duration_ms: u32) -> bool {
    elapsed_ms(now, since) >= duration_ms
}
