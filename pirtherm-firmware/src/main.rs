//! pirtherm - Motion-Activated Temperature Display Firmware
//!
//! RP2040 binary. A PIR module wakes the display, a DHT sensor is read
//! and the temperature is shown on an SSD1306 OLED until the activation
//! window closes.
//!
//! Wiring:
//!
//! | Signal      | Pin    |
//! |-------------|--------|
//! | PIR output  | GPIO27 |
//! | DHT data    | GPIO15 |
//! | OLED SDA    | GPIO4  |
//! | OLED SCL    | GPIO5  |
//!
//! The application runs as a single blocking poll loop; no executor.

#![no_std]
#![no_main]

use cortex_m_rt::{entry, exception};
use defmt::*;
use embassy_rp::clocks::ClockConfig;
use embassy_rp::config::Config;
use embassy_rp::gpio::{Flex, Input, Pull};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use pirtherm_core::config::AppConfig;
use pirtherm_core::ActivationController;
use pirtherm_drivers::display::Ssd1306;
use pirtherm_drivers::motion::Pir;
use pirtherm_drivers::sensor::Dht;

mod board;
mod dht_bus;

use board::{RpClock, RpPower};
use dht_bus::FlexDhtBus;

/// Configuration encoded by build.rs from device.toml
static DEVICE_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/device.postcard"));

/// OLED I2C clock
const I2C_FREQUENCY_HZ: u32 = 400_000;

#[entry]
fn main() -> ! {
    let config = load_config();

    let mut rp_config = Config::default();
    match ClockConfig::system_freq(config.power.cpu_hz) {
        Ok(clocks) => rp_config.clocks = clocks,
        Err(_) => warn!(
            "No clock setup for {=u32} Hz, keeping the default",
            config.power.cpu_hz
        ),
    }
    let p = embassy_rp::init(rp_config);
    let core = cortex_m::Peripherals::take();

    info!("pirtherm firmware starting...");

    let pir = Pir::new_active_high(Input::new(p.PIN_27, Pull::Down));
    let dht = Dht::new(FlexDhtBus::new(Flex::new(p.PIN_15)), config.sensor.model);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init() {
        error!("Display init failed: {}", e);
    }

    let mut controller = ActivationController::new(
        pir,
        dht,
        display,
        RpClock,
        RpPower::new(core.map(|c| c.SYST)),
        config,
    );
    controller.run()
}

/// Decode the embedded configuration, falling back to defaults
fn load_config() -> AppConfig {
    match AppConfig::from_postcard(DEVICE_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Embedded configuration rejected ({}), using defaults", e);
            AppConfig::default()
        }
    }
}

/// Wakes the core from WFI during power-saving suspends
#[exception]
fn SysTick() {}
