//! Motion input drivers

pub mod pir;

pub use pir::Pir;
