//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pirtherm-core for the display's hardware:
//!
//! - Temperature sensors (DHT11, DHT22 over a single-wire bus)
//! - Motion input (PIR on a digital pin)
//! - Display (SSD1306 128x64 OLED over I2C)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod display;
pub mod motion;
pub mod sensor;
