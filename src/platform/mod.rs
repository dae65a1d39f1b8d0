//! Platform abstraction layer
//!
//! Handles terminal/OS details for:
//! - Time/ticks (monotonic millisecond clock)
//! - Input events (held keys and one-shot signals)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, MonotonicClock, TickSchedule};
pub use input::{GameKey, KeyboardState, map_key};
