//! Throttled, retrying temperature reader
//!
//! One-wire humidity/temperature sensors are slow and flaky: they must not
//! be polled faster than every couple of seconds, and individual transfers
//! regularly time out or fail their checksum. The reader wraps a
//! [`TemperatureSensor`] with:
//!
//! - a minimum interval between successful reads (a rate limiter, not a cache)
//! - a bounded number of trials per read cycle
//! - a longer backoff after communication faults
//! - range validation of every value before it becomes a sample

use crate::config::{SensorConfig, SensorRange};
use crate::time;
use crate::traits::{Clock, SensorError, TemperatureSensor};

/// A validated temperature reading
///
/// Only constructed through range validation, so `value_c` always lies in
/// the configured sensor range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    value_c: f32,
    timestamp_ms: u32,
}

impl TemperatureSample {
    /// Build a sample if `value_c` lies within `range`
    pub fn checked(value_c: f32, timestamp_ms: u32, range: &SensorRange) -> Option<Self> {
        range.contains(value_c).then_some(Self {
            value_c,
            timestamp_ms,
        })
    }

    /// Temperature in °C
    pub fn value_c(&self) -> f32 {
        self.value_c
    }

    /// Tick at which the read cycle started
    pub fn timestamp_ms(&self) -> u32 {
        self.timestamp_ms
    }
}

/// Result of a read cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// A valid sample
    Sample(TemperatureSample),
    /// Too soon after the last successful read; sensor not touched
    Throttled,
    /// Sensor still warming up; sensor not touched
    NotReady,
    /// All trials used up, or a non-recoverable fault
    Failed(SensorError),
}

impl ReadOutcome {
    /// The sample, if the cycle produced one
    pub fn sample(self) -> Option<TemperatureSample> {
        match self {
            ReadOutcome::Sample(sample) => Some(sample),
            _ => None,
        }
    }
}

/// Minimum spacing between successful reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThrottleWindow {
    last_read_ms: Option<u32>,
    min_interval_ms: u32,
}

impl ThrottleWindow {
    /// Create a window with no previous read
    pub const fn new(min_interval_ms: u32) -> Self {
        Self {
            last_read_ms: None,
            min_interval_ms,
        }
    }

    /// Check if a read may touch the sensor at `now_ms`
    pub fn allows(&self, now_ms: u32) -> bool {
        match self.last_read_ms {
            Some(last) => time::has_elapsed(now_ms, last, self.min_interval_ms),
            None => true,
        }
    }

    /// Tick of the last successful read
    pub fn last_read_ms(&self) -> Option<u32> {
        self.last_read_ms
    }

    fn record(&mut self, now_ms: u32) {
        self.last_read_ms = Some(now_ms);
    }
}

/// Temperature reader with throttling and bounded retry
pub struct TemperatureReader<S> {
    sensor: S,
    config: SensorConfig,
    throttle: ThrottleWindow,
    ready: bool,
}

impl<S: TemperatureSensor> TemperatureReader<S> {
    /// Create a new reader
    ///
    /// Reads are refused until [`warm_up`](Self::warm_up) has run.
    pub fn new(sensor: S, config: SensorConfig) -> Self {
        let throttle = ThrottleWindow::new(config.min_interval_ms);
        Self {
            sensor,
            config,
            throttle,
            ready: false,
        }
    }

    /// Block for the sensor's power-on stabilization time
    pub fn warm_up<C: Clock>(&mut self, clock: &mut C) {
        info!("Sensor warm-up: {=u32} ms", self.config.warmup_ms);
        clock.delay_ms(self.config.warmup_ms);
        self.ready = true;
    }

    /// Check if warm-up has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Get the throttle state
    pub fn throttle(&self) -> &ThrottleWindow {
        &self.throttle
    }

    /// Get access to the underlying sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Read a temperature, or `None` if throttled or failed
    pub fn read<C: Clock>(&mut self, now_ms: u32, clock: &mut C) -> Option<TemperatureSample> {
        self.attempt(now_ms, clock).sample()
    }

    /// Run one read cycle and report how it ended
    pub fn attempt<C: Clock>(&mut self, now_ms: u32, clock: &mut C) -> ReadOutcome {
        if !self.ready {
            return ReadOutcome::NotReady;
        }
        if !self.throttle.allows(now_ms) {
            trace!("Sensor read throttled");
            return ReadOutcome::Throttled;
        }

        let trials = self.config.max_trials;
        let mut last_error = SensorError::InvalidReading;

        for trial in 1..=trials {
            let final_trial = trial == trials;

            clock.delay_ms(self.config.pre_measure_delay_ms);

            match self.sensor.measure() {
                Ok(()) => {
                    clock.delay_ms(self.config.post_measure_delay_ms);
                    let value = self.sensor.temperature_celsius();
                    let sample = value
                        .and_then(|v| TemperatureSample::checked(v, now_ms, &self.config.range));

                    if let Some(sample) = sample {
                        self.throttle.record(now_ms);
                        debug!("Temperature {} C (trial {=u8})", sample.value_c(), trial);
                        return ReadOutcome::Sample(sample);
                    }

                    warn!("Invalid reading: {}", value);
                    last_error = SensorError::InvalidReading;
                }
                Err(SensorError::InvalidReading) => {
                    warn!("Sensor reported an invalid reading");
                    last_error = SensorError::InvalidReading;
                }
                Err(e) if e.is_communication_fault() => {
                    last_error = e;
                    if final_trial {
                        warn!("Sensor read failed (trial {=u8}/{=u8}): {}", trial, trials, e);
                    } else {
                        clock.delay_ms(self.config.fault_backoff_ms);
                    }
                }
                Err(e) => {
                    error!("Unexpected sensor fault: {}", e);
                    return ReadOutcome::Failed(e);
                }
            }
        }

        ReadOutcome::Failed(last_error)
    }
}
