//! Frame timing
//!
//! The clock turns wall-clock frame times into a bounded number of fixed
//! simulation steps. Phased timers run on top of the clock for periodic
//! events that are not part of the simulation (debug reports and the like).

pub mod clock;
pub mod timer;

pub use clock::Clock;
pub use timer::{Phase, PhasedTimer, TimerConfig, TimerEvent, TimerMode};
