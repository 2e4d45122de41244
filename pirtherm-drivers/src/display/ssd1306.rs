//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Drawing goes to
//! a page-organized framebuffer; [`GraphicDisplay::flush`] sends the whole
//! buffer in horizontal addressing mode.
//!
//! Text uses the embedded-graphics 6x10 mono font.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use pirtherm_core::traits::{Color, DisplayError, GraphicDisplay};

/// Default SSD1306 I2C address (0x3D with SA0 high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// I2C control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// Power-on command sequence for a 128x64 panel
const INIT_SEQUENCE: [u8; 25] = [
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    (HEIGHT - 1) as u8,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Internal charge pump
    cmd::SET_MEMORY_MODE,
    0x00, // Horizontal addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, bit 0 = top row of the page)
    buffer: [[u8; WIDTH]; PAGES],
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a new driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            initialized: false,
        }
    }

    /// Initialize the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let mut bytes = [0u8; INIT_SEQUENCE.len() + 1];
        bytes[0] = CONTROL_COMMAND;
        bytes[1..].copy_from_slice(&INIT_SEQUENCE);
        self.write(&bytes)?;

        self.initialized = true;
        info!("SSD1306 initialized at {=u8:#x}", self.address);
        Ok(())
    }

    /// Check if [`init`](Self::init) has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check if the framebuffer pixel at (`x`, `y`) is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !(0..WIDTH as i32).contains(&x) || !(0..HEIGHT as i32).contains(&y) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1 << (y % 8);
        if on {
            self.buffer[y / 8][x] |= mask;
        } else {
            self.buffer[y / 8][x] &= !mask;
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I2C: I2c> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C: I2c> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl<I2C: I2c> GraphicDisplay for Ssd1306<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer = [[0; WIDTH]; PAGES];
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError> {
        let area = Rectangle::new(Point::new(x, y), Size::new(width, height));
        let color = match color {
            Color::On => BinaryColor::On,
            Color::Off => BinaryColor::Off,
        };
        infallible(self.fill_solid(&area, color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        infallible(Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        self.write(&[
            CONTROL_COMMAND,
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ])?;

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            data[1..].copy_from_slice(&self.buffer[page]);
            self.write(&data)?;
        }

        Ok(())
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for RecordingI2c {
        type Error = ErrorKind;
    }

    impl I2c for RecordingI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn ready() -> Ssd1306<RecordingI2c> {
        let mut display = Ssd1306::new(RecordingI2c::default());
        display.init().unwrap();
        display
    }

    fn lit_count(display: &Ssd1306<RecordingI2c>) -> usize {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| display.pixel(x, y))
            .count()
    }

    #[test]
    fn test_page_bit_layout() {
        let mut display = ready();
        display.fill_rect(0, 0, 1, 1, Color::On).unwrap();
        display.fill_rect(5, 13, 1, 1, Color::On).unwrap();

        assert_eq!(display.buffer[0][0], 0x01);
        assert_eq!(display.buffer[1][5], 1 << 5);
        assert_eq!(lit_count(&display), 2);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut display = ready();
        display.fill_rect(-4, -4, 8, 8, Color::On).unwrap();
        assert_eq!(lit_count(&display), 16);

        display.fill_rect(120, 60, 20, 20, Color::On).unwrap();
        assert_eq!(lit_count(&display), 16 + 8 * 4);

        display.fill_rect(-4, -4, 8, 8, Color::Off).unwrap();
        assert_eq!(lit_count(&display), 8 * 4);
    }

    #[test]
    fn test_draw_text_stays_in_cell() {
        let mut display = ready();
        display.draw_text("C", 10, 20).unwrap();

        let mut lit = 0;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if display.pixel(x, y) {
                    assert!((10..16).contains(&x) && (20..30).contains(&y));
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_clear_blanks_buffer() {
        let mut display = ready();
        display.fill_rect(0, 0, 128, 64, Color::On).unwrap();
        GraphicDisplay::clear(&mut display).unwrap();
        assert_eq!(lit_count(&display), 0);
    }

    #[test]
    fn test_flush_requires_init() {
        let mut display = Ssd1306::new(RecordingI2c::default());
        assert_eq!(display.flush(), Err(DisplayError::NotInitialized));
        assert!(display.release().writes.is_empty());
    }

    #[test]
    fn test_init_sequence() {
        let display = ready();
        assert!(display.is_initialized());

        let writes = display.release().writes;
        assert_eq!(writes.len(), 1);
        let (address, bytes) = &writes[0];
        assert_eq!(*address, DEFAULT_ADDRESS);
        assert_eq!(bytes[0], CONTROL_COMMAND);
        assert_eq!(bytes[1], cmd::DISPLAY_OFF);
        assert!(bytes.windows(2).any(|w| w == [cmd::SET_CHARGE_PUMP, 0x14]));
        assert_eq!(bytes.last(), Some(&cmd::DISPLAY_ON));
    }

    #[test]
    fn test_flush_sends_every_page() {
        let mut display = ready();
        display.fill_rect(0, 8, 1, 1, Color::On).unwrap();
        display.flush().unwrap();

        let writes = display.release().writes;
        // Init, addressing window, eight pages
        assert_eq!(writes.len(), 10);
        assert_eq!(
            writes[1].1,
            [CONTROL_COMMAND, cmd::SET_COLUMN_ADDR, 0, 127, cmd::SET_PAGE_ADDR, 0, 7]
        );
        for (page, (_, bytes)) in writes[2..].iter().enumerate() {
            assert_eq!(bytes.len(), WIDTH + 1);
            assert_eq!(bytes[0], CONTROL_DATA);
            assert_eq!(bytes[1], if page == 1 { 0x01 } else { 0x00 });
        }
    }

    #[test]
    fn test_bus_failure() {
        let mut i2c = RecordingI2c::default();
        i2c.fail = true;
        let mut display = Ssd1306::with_address(i2c, 0x3D);
        assert_eq!(display.init(), Err(DisplayError::Communication));
        assert!(!display.is_initialized());
    }
}
