//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Block, Body, CollisionResult, check_axis, check_collision, mark_touched};
pub use state::{Controls, Direction, World};
pub use tick::{StepEvents, tick};
