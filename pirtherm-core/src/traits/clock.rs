//! Monotonic time source

/// Millisecond clock with a blocking delay
///
/// `now_ms` is a free-running counter that may wrap; use
/// [`crate::time::elapsed_ms`] for interval math.
pub trait Clock {
    /// Current tick count in milliseconds
    fn now_ms(&self) -> u32;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}
