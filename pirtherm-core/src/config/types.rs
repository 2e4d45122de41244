//! Configuration type definitions

use heapless::Vec;

use crate::traits::Radio;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum radios the power policy can switch off
pub const MAX_RADIOS: usize = 2;

/// Glyph cell size of the rasterizer font, in unscaled pixels
pub const GLYPH_SIZE: u32 = 8;

/// Readout limits: values must format to at most four digits and a sign
pub const READOUT_MIN_C: f32 = -999.0;
pub const READOUT_MAX_C: f32 = 9999.0;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sensor range is empty, inverted, or too wide to display
    InvalidRange,
    /// Retry budget of zero trials
    ZeroTrials,
    /// Glyph scale of zero, or small scale larger than large scale
    InvalidScale,
    /// Large glyphs do not fit the display height
    LayoutOverflow,
    /// Activation window of zero length
    InvalidWindow,
    /// Poll delay of zero length
    InvalidPollInterval,
    /// Binary configuration could not be decoded
    Decode,
}

/// Supported temperature sensor models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SensorModel {
    /// DHT11: integer resolution
    #[default]
    Dht11,
    /// DHT22 / AM2302: 0.1°C resolution, signed
    Dht22,
}

/// Accepted temperature window in °C (inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorRange {
    pub min_c: f32,
    pub max_c: f32,
}

impl SensorRange {
    /// Widest range, accepted regardless of model
    pub const WIDE: Self = Self {
        min_c: -40.0,
        max_c: 125.0,
    };

    /// Datasheet range for a specific model
    pub const fn for_model(model: SensorModel) -> Self {
        match model {
            SensorModel::Dht11 => Self {
                min_c: -40.0,
                max_c: 80.0,
            },
            SensorModel::Dht22 => Self::WIDE,
        }
    }

    /// Check if a value lies within the range (NaN never does)
    pub fn contains(&self, value_c: f32) -> bool {
        value_c >= self.min_c && value_c <= self.max_c
    }
}

impl Default for SensorRange {
    fn default() -> Self {
        Self::WIDE
    }
}

/// Temperature sensor sampling configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Sensor model (selects the frame decoder)
    pub model: SensorModel,
    /// Accepted temperature range
    pub range: SensorRange,
    /// Minimum time between successful reads (ms)
    pub min_interval_ms: u32,
    /// Trials per read cycle
    pub max_trials: u8,
    /// Settling delay before each measurement (ms)
    pub pre_measure_delay_ms: u32,
    /// Delay between measurement and fetch (ms)
    pub post_measure_delay_ms: u32,
    /// Extra wait after a communication fault (ms)
    pub fault_backoff_ms: u32,
    /// Stabilization time after power-on (ms)
    pub warmup_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            model: SensorModel::Dht11,
            range: SensorRange::WIDE,
            min_interval_ms: 2000,
            max_trials: 3,
            pre_measure_delay_ms: 100,
            post_measure_delay_ms: 50,
            fault_backoff_ms: 200,
            warmup_ms: 2000,
        }
    }
}

/// Display activation window configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActivationConfig {
    /// How long the reading stays on screen (ms)
    pub window_ms: u32,
    /// Hold `settle_ms` after the display goes dark before polling motion
    pub power_saving: bool,
    /// Settle time after deactivation (ms)
    ///
    /// The OLED's own light can re-trigger the PIR; this lets it decay.
    pub settle_ms: u32,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            window_ms: 8000,
            power_saving: true,
            settle_ms: 2000,
        }
    }
}

/// Display layout configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u32,
    /// Panel height in pixels
    pub height: u32,
    /// Scale of the integer digits
    pub large_scale: u32,
    /// Scale of the decimal point and fraction digit
    pub small_scale: u32,
    /// Horizontal gap between glyphs (px)
    pub glyph_spacing: u32,
    /// Character cell width of the display's built-in text font
    pub text_char_width: u32,
    /// Character cell height of the display's built-in text font
    pub text_char_height: u32,
    /// Vertical distance between message lines (px)
    pub message_line_spacing: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            large_scale: 3,
            small_scale: 2,
            glyph_spacing: 2,
            text_char_width: 6,
            text_char_height: 10,
            message_line_spacing: 20,
        }
    }
}

/// Power policy configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerConfig {
    /// CPU clock requested at startup (Hz)
    pub cpu_hz: u32,
    /// Radios switched off at startup
    pub disable_radios: Vec<Radio, MAX_RADIOS>,
    /// Low-power suspend between polls while idle (ms)
    pub idle_suspend_ms: u32,
    /// Plain delay between polls while the display is lit (ms)
    pub active_delay_ms: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        let mut disable_radios = Vec::new();
        let _ = disable_radios.push(Radio::Wifi);
        let _ = disable_radios.push(Radio::Bluetooth);
        Self {
            cpu_hz: 48_000_000,
            disable_radios,
            idle_suspend_ms: 100,
            active_delay_ms: 100,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub activation: ActivationConfig,
    pub display: DisplayConfig,
    pub power: PowerConfig,
}

impl AppConfig {
    /// Check the configuration for values the runtime cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sensor = &self.sensor;
        if !(sensor.range.min_c < sensor.range.max_c)
            || sensor.range.min_c < READOUT_MIN_C
            || sensor.range.max_c > READOUT_MAX_C
        {
            return Err(ConfigError::InvalidRange);
        }
        if sensor.max_trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }

        let display = &self.display;
        if display.small_scale == 0 || display.small_scale > display.large_scale {
            return Err(ConfigError::InvalidScale);
        }
        if GLYPH_SIZE * display.large_scale > display.height {
            return Err(ConfigError::LayoutOverflow);
        }

        if self.activation.window_ms == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        if self.power.idle_suspend_ms == 0 || self.power.active_delay_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        Ok(())
    }

    /// Decode and validate a postcard-encoded configuration
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
