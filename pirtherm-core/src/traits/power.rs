//! Power management trait

/// Errors that can occur with power management
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerError {
    /// The platform has no such capability
    Unsupported,
    /// The request was refused by the hardware
    Rejected,
}

/// Radios that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Radio {
    Wifi,
    Bluetooth,
}

/// Platform power controls
///
/// All operations are best-effort from the application's point of view.
pub trait PowerController {
    /// Set the CPU clock frequency
    fn set_clock_speed(&mut self, hz: u32) -> Result<(), PowerError>;

    /// Switch a radio off
    fn disable_radio(&mut self, radio: Radio) -> Result<(), PowerError>;

    /// Low-power wait for `ms` milliseconds
    ///
    /// Must return after the duration has elapsed even if no other wake
    /// source fires.
    fn suspend_for(&mut self, ms: u32) -> Result<(), PowerError>;
}
