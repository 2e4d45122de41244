//! Scaled glyph rasterizer

use super::glyph::glyph_for;
use crate::config::GLYPH_SIZE;
use crate::traits::{Color, DisplayError, GraphicDisplay};

/// Width of one glyph cell at `scale`
pub const fn glyph_width(scale: u32) -> u32 {
    GLYPH_SIZE * scale
}

/// Draw one glyph with its top-left corner at (`x`, `y`)
///
/// Every set bit becomes a filled `scale` x `scale` square. Characters
/// without a glyph, and a scale of zero, draw nothing.
pub fn render_char<D: GraphicDisplay>(
    display: &mut D,
    ch: char,
    x: i32,
    y: i32,
    scale: u32,
) -> Result<(), DisplayError> {
    let Some(glyph) = glyph_for(ch) else {
        return Ok(());
    };
    if scale == 0 {
        return Ok(());
    }

    let step = scale as i32;
    for row in 0..GLYPH_SIZE as usize {
        for col in 0..GLYPH_SIZE as usize {
            if glyph.is_set(row, col) {
                display.fill_rect(
                    x + col as i32 * step,
                    y + row as i32 * step,
                    scale,
                    scale,
                    Color::On,
                )?;
            }
        }
    }

    Ok(())
}
