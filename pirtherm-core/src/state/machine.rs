//! State machine definition

use super::events::Event;
use crate::time;

/// Display activation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// Display dark, motion input polled
    #[default]
    Idle,
    /// Reading on screen, motion input ignored
    Active,
}

impl MotionState {
    /// Check if the motion input may be sampled in this state
    ///
    /// While the display is lit its light can trip the PIR, so motion is
    /// only ever polled while idle.
    pub fn polls_motion(&self) -> bool {
        matches!(self, MotionState::Idle)
    }

    /// Check if the display is lit in this state
    pub fn is_active(&self) -> bool {
        matches!(self, MotionState::Active)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use MotionState::*;

        match (self, event) {
            (Idle, MotionDetected) => Active,
            (Active, WindowExpired) => Idle,

            // Motion while active does not re-arm; expiry while idle is stale
            _ => self,
        }
    }
}

/// Open display window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivationWindow {
    /// Tick at which the window opened
    pub activated_at_ms: u32,
    /// Window length
    pub duration_ms: u32,
}

impl ActivationWindow {
    /// Open a window at `now_ms`
    pub const fn open(now_ms: u32, duration_ms: u32) -> Self {
        Self {
            activated_at_ms: now_ms,
            duration_ms,
        }
    }

    /// Milliseconds since the window opened
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        time::elapsed_ms(now_ms, self.activated_at_ms)
    }

    /// Check if the window has closed at `now_ms`
    pub fn is_expired(&self, now_ms: u32) -> bool {
        time::has_elapsed(now_ms, self.activated_at_ms, self.duration_ms)
    }
}
