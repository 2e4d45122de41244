//! DHT11 / DHT22 humidity and temperature sensors
//!
//! Both parts answer a start pulse with a 40-bit frame:
//!
//! ```text
//! byte 0  humidity high
//! byte 1  humidity low
//! byte 2  temperature high
//! byte 3  temperature low
//! byte 4  checksum (low 8 bits of the sum of bytes 0-3)
//! ```
//!
//! DHT11 sends integer and tenths parts in the high and low bytes, with
//! bit 7 of the tenths byte as sign on newer parts. DHT22 sends a 15-bit
//! magnitude in tenths with bit 7 of the high byte as sign.
//!
//! The bit-level protocol is timing critical and lives behind [`DhtBus`]
//! so it can be implemented per platform.

use pirtherm_core::config::SensorModel;
use pirtherm_core::traits::{SensorError, TemperatureSensor};

/// Length of a DHT frame in bytes
pub const FRAME_LEN: usize = 5;

/// Errors from the single-wire transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtError {
    /// Sensor did not answer the start pulse
    NoResponse,
    /// A bit edge did not arrive in time
    Timeout,
    /// Frame checksum mismatch
    Checksum,
}

impl From<DhtError> for SensorError {
    fn from(e: DhtError) -> Self {
        match e {
            DhtError::NoResponse | DhtError::Timeout => SensorError::Timeout,
            DhtError::Checksum => SensorError::BusFault,
        }
    }
}

/// Single-wire transport for DHT frames
pub trait DhtBus {
    /// Send the start pulse and clock in one raw frame
    fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], DhtError>;
}

/// A checksum-verified DHT frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DhtFrame {
    bytes: [u8; FRAME_LEN],
}

impl DhtFrame {
    /// Verify the checksum of a raw frame
    pub fn parse(bytes: [u8; FRAME_LEN]) -> Result<Self, DhtError> {
        let sum = bytes[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        if sum != bytes[4] {
            return Err(DhtError::Checksum);
        }
        Ok(Self { bytes })
    }

    /// Raw frame bytes
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Check if every data byte is zero
    ///
    /// A floating data line reads as all zeros, which passes the checksum.
    pub fn is_blank(&self) -> bool {
        self.bytes[..4].iter().all(|&b| b == 0)
    }

    /// Temperature in °C, decoded for `model`
    pub fn temperature_celsius(&self, model: SensorModel) -> f32 {
        let [_, _, high, low, _] = self.bytes;
        match model {
            SensorModel::Dht11 => {
                let magnitude = high as f32 + (low & 0x7F) as f32 / 10.0;
                if low & 0x80 != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
            SensorModel::Dht22 => {
                let tenths = u16::from_be_bytes([high & 0x7F, low]);
                let magnitude = tenths as f32 / 10.0;
                if high & 0x80 != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }

    /// Relative humidity in %, decoded for `model`
    pub fn humidity_percent(&self, model: SensorModel) -> f32 {
        let [high, low, _, _, _] = self.bytes;
        match model {
            SensorModel::Dht11 => high as f32 + low as f32 / 10.0,
            SensorModel::Dht22 => u16::from_be_bytes([high, low]) as f32 / 10.0,
        }
    }
}

/// DHT sensor on a [`DhtBus`]
pub struct Dht<B> {
    bus: B,
    model: SensorModel,
    last: Option<DhtFrame>,
}

impl<B: DhtBus> Dht<B> {
    /// Create a new sensor driver
    pub fn new(bus: B, model: SensorModel) -> Self {
        Self {
            bus,
            model,
            last: None,
        }
    }

    /// Sensor model
    pub fn model(&self) -> SensorModel {
        self.model
    }

    /// Humidity from the last successful measurement
    pub fn humidity_percent(&self) -> Option<f32> {
        self.last.map(|f| f.humidity_percent(self.model))
    }

    /// Get access to the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B: DhtBus> TemperatureSensor for Dht<B> {
    fn measure(&mut self) -> Result<(), SensorError> {
        self.last = None;

        let raw = self.bus.read_frame().map_err(|e| {
            debug!("DHT transfer failed: {}", e);
            SensorError::from(e)
        })?;
        let frame = DhtFrame::parse(raw).map_err(|e| {
            debug!("DHT frame rejected: {=[u8]:x}", &raw[..]);
            SensorError::from(e)
        })?;

        if frame.is_blank() {
            return Err(SensorError::InvalidReading);
        }

        self.last = Some(frame);
        Ok(())
    }

    fn temperature_celsius(&self) -> Option<f32> {
        self.last.map(|f| f.temperature_celsius(self.model))
    }
}
