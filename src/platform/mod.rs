//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events

pub mod input;
pub mod time;

pub use input::{Action, KeyEvent};
pub use time::{ManualTime, TimeSource};
