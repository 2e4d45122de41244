//! PIR motion sensor
//!
//! HC-SR501 style modules drive their output high while motion is
//! detected. The module does its own retriggering and hold time, so the
//! pin is sampled as-is.

use embedded_hal::digital::InputPin;
use pirtherm_core::traits::MotionInput;

/// PIR module on a digital input
pub struct Pir<P> {
    pin: P,
    /// If true, motion = pin LOW
    active_low: bool,
}

impl<P: InputPin> Pir<P> {
    /// Create a new PIR input
    ///
    /// # Arguments
    /// - `pin`: The input pin wired to the module's output
    /// - `active_low`: If true, motion is reported when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Create a PIR input with the usual active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }
}

impl<P: InputPin> MotionInput for Pir<P> {
    fn is_detected(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(_) => {
                warn!("PIR pin read failed");
                false
            }
        }
    }
}
