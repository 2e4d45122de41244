//! Motion input trait

/// Presence detector (typically a PIR module's digital output)
///
/// Debouncing, if any, is the implementation's responsibility.
pub trait MotionInput {
    /// Sample the input; `true` means motion is currently detected
    fn is_detected(&mut self) -> bool;
}
