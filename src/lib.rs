//! Brickbatch - A fixed-timestep Breakout game
//!
//! Core modules:
//! - `math`: Transform helpers on top of glam
//! - `time`: Fixed-timestep clock and phased interval timers
//! - `sim`: Deterministic simulation (bodies, collisions, level controller)
//! - `renderer`: Batched quad packing and the WebGPU pipeline that draws it
//! - `platform`: Time source and key mapping
//! - `game`: Per-frame orchestration tying the above together

pub mod error;
pub mod game;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod time;

pub use error::{BatchError, SettingsError};
pub use game::{FrameStats, Game};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 0.01;
    /// Frame delta clamp to prevent spiral of death after a hitch
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Play field dimensions (also the orthographic projection extent)
    pub const FIELD_WIDTH: f32 = 320.0;
    pub const FIELD_HEIGHT: f32 = 180.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 8.0;
    pub const BALL_SPEED: f32 = 75.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 24.0;
    pub const PADDLE_HEIGHT: f32 = 4.0;
    pub const PADDLE_SPEED: f32 = 200.0;

    /// Brick grid layout
    pub const GRID_COLUMNS: u32 = 10;
    pub const GRID_ROWS: u32 = 10;
    pub const GRID_ORIGIN: (f32, f32) = (35.0, 20.0);
    pub const GRID_PITCH: (f32, f32) = (25.0, 8.0);
    pub const BRICK_WIDTH: f32 = 24.0;
    pub const BRICK_HEIGHT: f32 = 4.0;

    /// Maximum quads the batch (and the GPU vertex buffer) can hold
    pub const MAX_INSTANCES: usize = 10_000;

    /// Debug report timer (ms)
    pub const REPORT_DELAY_MS: u32 = 2000;
    pub const REPORT_RESTART_DELAY_MS: u32 = 2000;
}
