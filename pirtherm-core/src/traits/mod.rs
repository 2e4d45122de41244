//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;
pub mod motion;
pub mod power;
pub mod sensor;

pub use clock::Clock;
pub use display::{Color, DisplayError, GraphicDisplay};
pub use motion::MotionInput;
pub use power::{PowerController, PowerError, Radio};
pub use sensor::{SensorError, TemperatureSensor};
