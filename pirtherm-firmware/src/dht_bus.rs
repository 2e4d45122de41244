//! Bit-banged DHT single-wire bus
//!
//! ```text
//! host:   ‾‾‾|____18ms____|‾‾ release
//! sensor:                     |_80us_|‾80us‾|  40 x ( |_50us_|‾26us = 0 / 70us = 1‾| )
//! ```
//!
//! Bit values are decided by the length of the high pulse. Interrupts are
//! masked while the frame is clocked in.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration, Instant};
use pirtherm_drivers::sensor::{DhtBus, DhtError, FRAME_LEN};

/// Host start pulse (DHT11 needs at least 18 ms, DHT22 at least 1 ms)
const START_LOW: Duration = Duration::from_millis(18);
/// Release time before the sensor pulls the line low
const START_RELEASE: Duration = Duration::from_micros(30);
/// Longest expected level in the response and bit phases
const EDGE_TIMEOUT_US: u64 = 100;
/// High pulses longer than this are ones
const ONE_THRESHOLD_US: u64 = 40;

/// DHT bus on a bidirectional GPIO with pull-up
pub struct FlexDhtBus<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexDhtBus<'d> {
    /// Take the data pin, idle high
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }

    /// Wait until the line reaches `high`, returning how long it took
    fn wait_for(&self, high: bool) -> Result<u64, DhtError> {
        let start = Instant::now();
        while self.pin.is_high() != high {
            if start.elapsed().as_micros() > EDGE_TIMEOUT_US {
                return Err(DhtError::Timeout);
            }
        }
        Ok(start.elapsed().as_micros())
    }

    fn read_bits(&self) -> Result<[u8; FRAME_LEN], DhtError> {
        // Response: low 80us, high 80us, then the first bit's low phase
        self.wait_for(false).map_err(|_| DhtError::NoResponse)?;
        self.wait_for(true).map_err(|_| DhtError::NoResponse)?;
        self.wait_for(false).map_err(|_| DhtError::NoResponse)?;

        let mut frame = [0u8; FRAME_LEN];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                self.wait_for(true)?;
                let high_us = self.wait_for(false)?;
                *byte = (*byte << 1) | u8::from(high_us > ONE_THRESHOLD_US);
            }
        }
        Ok(frame)
    }
}

impl DhtBus for FlexDhtBus<'_> {
    fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], DhtError> {
        self.pin.set_as_output();
        self.pin.set_low();
        block_for(START_LOW);
        self.pin.set_high();
        block_for(START_RELEASE);
        self.pin.set_as_input();

        cortex_m::interrupt::free(|_| self.read_bits())
    }
}
