//! Power policy
//!
//! Applies the startup power settings and picks the wait between polls:
//! a low-power suspend while idle, a plain delay while the display is lit.

use crate::config::PowerConfig;
use crate::state::MotionState;
use crate::traits::{Clock, PowerController};

/// Best-effort power management on top of a [`PowerController`]
pub struct PowerPolicy<P> {
    controller: P,
    config: PowerConfig,
}

impl<P: PowerController> PowerPolicy<P> {
    /// Create a new policy
    pub fn new(controller: P, config: PowerConfig) -> Self {
        Self { controller, config }
    }

    /// Get access to the underlying controller
    pub fn controller(&self) -> &P {
        &self.controller
    }

    /// Apply clock speed and radio settings
    ///
    /// Failures are logged and otherwise ignored.
    pub fn startup(&mut self) {
        match self.controller.set_clock_speed(self.config.cpu_hz) {
            Ok(()) => info!("CPU clock set to {=u32} Hz", self.config.cpu_hz),
            Err(e) => warn!("Could not set CPU clock: {}", e),
        }

        for &radio in &self.config.disable_radios {
            match self.controller.disable_radio(radio) {
                Ok(()) => debug!("Radio {} disabled", radio),
                Err(e) => debug!("Radio {} not disabled: {}", radio, e),
            }
        }
    }

    /// Wait before the next poll
    pub fn idle_wait<C: Clock>(&mut self, state: MotionState, clock: &mut C) {
        match state {
            MotionState::Idle => {
                if let Err(e) = self.controller.suspend_for(self.config.idle_suspend_ms) {
                    trace!("Suspend unavailable ({}), delaying", e);
                    clock.delay_ms(self.config.idle_suspend_ms);
                }
            }
            MotionState::Active => clock.delay_ms(self.config.active_delay_ms),
        }
    }
}
