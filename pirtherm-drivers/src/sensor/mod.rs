//! Temperature sensor drivers

pub mod dht;

pub use dht::{Dht, DhtBus, DhtError, DhtFrame, FRAME_LEN};
