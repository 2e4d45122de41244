//! Board-agnostic core logic for the motion-activated temperature display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motion input, sensor, display, clock, power)
//! - Motion state machine and activation window
//! - Throttled, retrying temperature reader
//! - Glyph rasterizer and display presenter
//! - Activation controller (the poll loop)
//! - Power policy
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod power;
pub mod reader;
pub mod render;
pub mod state;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::ActivationController;
pub use power::PowerPolicy;
pub use reader::{ReadOutcome, TemperatureReader, TemperatureSample};
pub use render::DisplayPresenter;
pub use state::MotionState;
