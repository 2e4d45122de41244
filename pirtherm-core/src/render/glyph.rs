//! Fixed 8x8 numeric font
//!
//! Each glyph is 8 rows of 8 bits. Bit 7 (MSB) of a row is the leftmost
//! column and bit 0 the rightmost; reading bits LSB-first mirrors the
//! character.

/// One character of the numeric font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Character this glyph draws
    pub ch: char,
    /// Row bitmaps, top to bottom
    pub rows: [u8; 8],
}

impl Glyph {
    /// Check if the pixel at (`row`, `col`) is set
    ///
    /// `col` 0 is the leftmost column.
    #[inline]
    pub const fn is_set(&self, row: usize, col: usize) -> bool {
        self.rows[row] & (0x80 >> col) != 0
    }
}

/// Supported glyphs: digits, minus sign and decimal point
pub static GLYPHS: [Glyph; 12] = [
    Glyph { ch: '0', rows: [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00] },
    Glyph { ch: '1', rows: [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00] },
    Glyph { ch: '2', rows: [0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00] },
    Glyph { ch: '3', rows: [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00] },
    Glyph { ch: '4', rows: [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00] },
    Glyph { ch: '5', rows: [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00] },
    Glyph { ch: '6', rows: [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00] },
    Glyph { ch: '7', rows: [0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00] },
    Glyph { ch: '8', rows: [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00] },
    Glyph { ch: '9', rows: [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00] },
    Glyph { ch: '-', rows: [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00] },
    Glyph { ch: '.', rows: [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00] },
];

/// Look up the glyph for a character
pub fn glyph_for(ch: char) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|g| g.ch == ch)
}
