//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer in time
    Timeout,
    /// Corrupted transfer (bad framing or checksum)
    BusFault,
    /// Value missing or outside the accepted range
    InvalidReading,
    /// Anything else; not worth retrying within the same read
    Unexpected,
}

impl SensorError {
    /// Check if this is a communication fault that warrants a backoff
    pub fn is_communication_fault(&self) -> bool {
        matches!(self, SensorError::Timeout | SensorError::BusFault)
    }
}

/// Trait for slow single-shot temperature sensors (DHT11, DHT22, ...)
///
/// A reading is a two-step affair: [`measure`](Self::measure) triggers and
/// transfers a conversion, [`temperature_celsius`](Self::temperature_celsius)
/// returns the value decoded by the last successful `measure`.
pub trait TemperatureSensor {
    /// Trigger a measurement and fetch the result from the device
    fn measure(&mut self) -> Result<(), SensorError>;

    /// Temperature from the last measurement, if one was decoded
    fn temperature_celsius(&self) -> Option<f32>;
}
