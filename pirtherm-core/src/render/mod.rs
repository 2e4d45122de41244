//! Glyph rendering and screen composition
//!
//! - `glyph`: the fixed 8x8 numeric font
//! - `rasterizer`: draws glyphs at an integer pixel scale
//! - `presenter`: lays out temperature readouts and status messages

pub mod glyph;
pub mod presenter;
pub mod rasterizer;

pub use glyph::{glyph_for, Glyph, GLYPHS};
pub use presenter::{DisplayPresenter, Element, Placed, TemperatureLayout, MAX_MESSAGE_LINES};
pub use rasterizer::{glyph_width, render_char};
