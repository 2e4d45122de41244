//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware bakes a validated
//! configuration into the image as postcard binary data.

pub mod types;

pub use types::*;
