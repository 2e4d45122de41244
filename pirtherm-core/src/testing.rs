//! Mock collaborators shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::traits::{
    Clock, Color, DisplayError, GraphicDisplay, MotionInput, PowerController, PowerError, Radio,
    SensorError, TemperatureSensor,
};

/// Virtual time shared between the mock clock and the mock power controller
#[derive(Clone, Default)]
pub struct VirtualTime {
    now: Rc<Cell<u32>>,
    /// Every blocking wait, in order: (duration, was_suspend)
    waits: Rc<RefCell<Vec<(u32, bool)>>>,
}

impl VirtualTime {
    pub fn starting_at(now_ms: u32) -> Self {
        let time = Self::default();
        time.now.set(now_ms);
        time
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Plain delays recorded so far
    pub fn delays(&self) -> Vec<u32> {
        self.waits
            .borrow()
            .iter()
            .filter(|(_, suspend)| !suspend)
            .map(|(ms, _)| *ms)
            .collect()
    }

    /// Low-power suspends recorded so far
    pub fn suspends(&self) -> Vec<u32> {
        self.waits
            .borrow()
            .iter()
            .filter(|(_, suspend)| *suspend)
            .map(|(ms, _)| *ms)
            .collect()
    }

    pub fn clear_waits(&self) {
        self.waits.borrow_mut().clear();
    }

    fn record(&self, ms: u32, suspend: bool) {
        self.waits.borrow_mut().push((ms, suspend));
        self.advance(ms);
    }
}

/// Clock driven by [`VirtualTime`]
pub struct MockClock {
    pub time: VirtualTime,
}

impl MockClock {
    pub fn new(time: VirtualTime) -> Self {
        Self { time }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.time.now()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.record(ms, false);
    }
}

/// Scripted sensor
///
/// Each `measure` pops one entry: `Ok(value)` succeeds and stores the value,
/// `Err(e)` fails. An empty script succeeds with `fallback`.
pub struct MockSensor {
    script: VecDeque<Result<Option<f32>, SensorError>>,
    fallback: Option<f32>,
    value: Option<f32>,
    pub measure_calls: Rc<Cell<u32>>,
}

impl MockSensor {
    pub fn steady(value: f32) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: Some(value),
            value: None,
            measure_calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn scripted(script: &[Result<Option<f32>, SensorError>]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            fallback: None,
            value: None,
            measure_calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.measure_calls.get()
    }
}

impl TemperatureSensor for MockSensor {
    fn measure(&mut self) -> Result<(), SensorError> {
        self.measure_calls.set(self.measure_calls.get() + 1);
        match self.script.pop_front() {
            Some(Ok(value)) => {
                self.value = value;
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => {
                self.value = self.fallback;
                Ok(())
            }
        }
    }

    fn temperature_celsius(&self) -> Option<f32> {
        self.value
    }
}

/// Motion input that counts how often it was sampled
#[derive(Clone, Default)]
pub struct MockMotion {
    pub detected: Rc<Cell<bool>>,
    pub polls: Rc<Cell<u32>>,
}

impl MockMotion {
    pub fn set(&self, detected: bool) {
        self.detected.set(detected);
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl MotionInput for MockMotion {
    fn is_detected(&mut self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.detected.get()
    }
}

/// Recorded display operation
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    Clear,
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
    },
    Flush,
}

pub const MOCK_WIDTH: usize = 128;
pub const MOCK_HEIGHT: usize = 64;

/// Display that records operations and keeps a pixel map
pub struct MockDisplay {
    pub ops: Vec<DisplayOp>,
    pixels: [[bool; MOCK_WIDTH]; MOCK_HEIGHT],
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pixels: [[false; MOCK_WIDTH]; MOCK_HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&p| p).count()
    }

    pub fn flushes(&self) -> usize {
        self.ops.iter().filter(|op| **op == DisplayOp::Flush).count()
    }

    /// Text drawn since the most recent clear
    pub fn frame_texts(&self) -> Vec<(String, i32, i32)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |i| i + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Bounding box (min_x, min_y, max_x, max_y) of all lit pixels
    pub fn lit_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (y, row) in self.pixels.iter().enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                if lit {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }
}

impl GraphicDisplay for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Clear);
        self.pixels = [[false; MOCK_WIDTH]; MOCK_HEIGHT];
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
        self.ops.push(DisplayOp::Rect {
            x,
            y,
            width,
            height,
        });
        let on = color == Color::On;
        for py in y..y + height as i32 {
            for px in x..x + width as i32 {
                if (0..MOCK_WIDTH as i32).contains(&px) && (0..MOCK_HEIGHT as i32).contains(&py) {
                    self.pixels[py as usize][px as usize] = on;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Text {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Flush);
        Ok(())
    }
}

/// Power controller that suspends on [`VirtualTime`]
pub struct MockPower {
    pub time: VirtualTime,
    pub clock_hz: Option<u32>,
    pub radios_off: Vec<Radio>,
    /// Reject radio requests (platform without radios)
    pub no_radios: bool,
}

impl MockPower {
    pub fn new(time: VirtualTime) -> Self {
        Self {
            time,
            clock_hz: None,
            radios_off: Vec::new(),
            no_radios: false,
        }
    }
}

impl PowerController for MockPower {
    fn set_clock_speed(&mut self, hz: u32) -> Result<(), PowerError> {
        self.clock_hz = Some(hz);
        Ok(())
    }

    fn disable_radio(&mut self, radio: Radio) -> Result<(), PowerError> {
        if self.no_radios {
            return Err(PowerError::Unsupported);
        }
        self.radios_off.push(radio);
        Ok(())
    }

    fn suspend_for(&mut self, ms: u32) -> Result<(), PowerError> {
        self.time.record(ms, true);
        Ok(())
    }
}
