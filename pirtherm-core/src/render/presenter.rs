//! Screen composition
//!
//! Every public operation repaints the whole frame: clear, draw, flush.
//! Nothing is ever drawn on top of a previous frame.

use core::fmt::Write;

use heapless::{String, Vec};

use super::rasterizer::{glyph_width, render_char};
use crate::config::{DisplayConfig, GLYPH_SIZE};
use crate::reader::TemperatureSample;
use crate::traits::{DisplayError, GraphicDisplay};

/// Maximum number of message lines
pub const MAX_MESSAGE_LINES: usize = 2;

/// Unit suffix drawn after the reading
const SUFFIX: &str = "C";

/// Longest readout: sign, four digits, point, fraction digit, suffix
const MAX_ELEMENTS: usize = 8;

/// Something placed on the temperature screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Rasterized glyph at a scale
    Glyph { ch: char, scale: u32 },
    /// Unit suffix in the display's text font
    Suffix,
}

/// An element with its top-left position and width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub element: Element,
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

/// Computed position of every element of a temperature readout
///
/// Integer digits use the large scale; the decimal point and fraction
/// digit use the small scale and share the large glyphs' bottom edge, as
/// does the suffix. The whole cluster is centered horizontally and the
/// large glyph row is centered vertically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureLayout {
    pub start_x: i32,
    pub top_y: i32,
    pub total_width: u32,
    pub items: Vec<Placed, MAX_ELEMENTS>,
}

impl TemperatureLayout {
    /// Lay out a formatted reading such as `"23.5"` or `"-4.0"`
    pub fn compute(text: &str, config: &DisplayConfig) -> Self {
        let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));

        let large = config.large_scale;
        let small = config.small_scale;
        let large_h = GLYPH_SIZE * large;
        let small_h = GLYPH_SIZE * small;

        let mut elements: Vec<(Element, u32), MAX_ELEMENTS> = Vec::new();
        for ch in integer.chars() {
            let _ = elements.push((Element::Glyph { ch, scale: large }, glyph_width(large)));
        }
        if let Some(digit) = fraction.chars().next() {
            let _ = elements.push((Element::Glyph { ch: '.', scale: small }, glyph_width(small)));
            let _ = elements.push((Element::Glyph { ch: digit, scale: small }, glyph_width(small)));
        }
        let _ = elements.push((Element::Suffix, config.text_char_width * SUFFIX.len() as u32));

        let gaps = elements.len().saturating_sub(1) as u32;
        let total_width =
            elements.iter().map(|(_, w)| *w).sum::<u32>() + config.glyph_spacing * gaps;

        let start_x = (config.width.saturating_sub(total_width) / 2) as i32;
        let top_y = (config.height.saturating_sub(large_h) / 2) as i32;
        let bottom = top_y + large_h as i32;

        let mut items = Vec::new();
        let mut x = start_x;
        for (element, width) in elements {
            let y = match element {
                Element::Glyph { scale, .. } if scale == large => top_y,
                Element::Glyph { .. } => bottom - small_h as i32,
                Element::Suffix => bottom - config.text_char_height as i32,
            };
            let _ = items.push(Placed {
                element,
                x,
                y,
                width,
            });
            x += (width + config.glyph_spacing) as i32;
        }

        Self {
            start_x,
            top_y,
            total_width,
            items,
        }
    }
}

/// Format a reading to one decimal place
pub fn format_tenths(value_c: f32) -> String<8> {
    let mut text = String::new();
    let _ = write!(text, "{:.1}", value_c);
    text
}

/// Composes temperature readouts and status messages on a display
pub struct DisplayPresenter<D> {
    display: D,
    config: DisplayConfig,
}

impl<D: GraphicDisplay> DisplayPresenter<D> {
    /// Create a new presenter
    pub fn new(display: D, config: DisplayConfig) -> Self {
        Self { display, config }
    }

    /// Get access to the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Layout configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Show a temperature reading, centered
    pub fn show_temperature(&mut self, sample: &TemperatureSample) -> Result<(), DisplayError> {
        let text = format_tenths(sample.value_c());
        let layout = TemperatureLayout::compute(&text, &self.config);

        self.display.clear()?;
        for item in &layout.items {
            match item.element {
                Element::Glyph { ch, scale } => {
                    render_char(&mut self.display, ch, item.x, item.y, scale)?
                }
                Element::Suffix => self.display.draw_text(SUFFIX, item.x, item.y)?,
            }
        }
        self.display.flush()
    }

    /// Show up to [`MAX_MESSAGE_LINES`] lines of small text at fixed rows
    pub fn show_message(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        self.display.clear()?;
        for (row, line) in lines.iter().take(MAX_MESSAGE_LINES).enumerate() {
            let y = (row as u32 * self.config.message_line_spacing) as i32;
            self.display.draw_text(line, 0, y)?;
        }
        self.display.flush()
    }

    /// Blank the display
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.flush()
    }
}
