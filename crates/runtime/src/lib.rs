pub mod event_bus;
pub mod frame;
pub mod generation;

pub use event_bus::*;
pub use frame::*;
pub use generation::*;
