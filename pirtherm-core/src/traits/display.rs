//! Graphic display trait

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    Off,
    /// Pixel lit
    On,
}

/// Buffered monochrome display
///
/// Drawing operations only touch the framebuffer; nothing reaches the panel
/// until [`flush`](Self::flush). Origin is top-left.
pub trait GraphicDisplay {
    /// Blank the whole framebuffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Fill a rectangle; parts outside the panel are clipped
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Draw text with the display's built-in small font, top-left at (x, y)
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), DisplayError>;

    /// Transfer the whole framebuffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
