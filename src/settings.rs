//! Game settings
//!
//! Read once at startup. Every field has a default, so a settings document
//! only needs the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Play field size, also the projection extent
    pub field_width: f32,
    pub field_height: f32,

    // === Timing ===
    /// Fixed simulation step (seconds)
    pub fixed_step: f32,
    /// Longest frame the clock will accumulate (seconds)
    pub max_frame_delta: f32,
    /// Divisor applied to timer time (2.0 = timers run at half speed)
    pub time_scale: f32,

    // === Gameplay ===
    pub ball_speed: f32,
    pub paddle_speed: f32,
    pub grid_columns: u32,
    pub grid_rows: u32,
    /// Brick color seed; wall clock when unset
    pub seed: Option<u64>,

    // === Rendering ===
    /// Maximum quads per frame
    pub batch_capacity: usize,

    // === Debug ===
    /// Debug report timer phase lengths (ms)
    pub report_delay_ms: u32,
    pub report_restart_delay_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            fixed_step: SIM_DT,
            max_frame_delta: MAX_FRAME_DELTA,
            time_scale: 1.0,

            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,
            grid_columns: GRID_COLUMNS,
            grid_rows: GRID_ROWS,
            seed: None,

            batch_capacity: MAX_INSTANCES,

            report_delay_ms: REPORT_DELAY_MS,
            report_restart_delay_ms: REPORT_RESTART_DELAY_MS,
        }
    }
}

impl Settings {
    /// Parse a JSON settings document and validate it
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(invalid("field_width", "field size must be positive"));
        }
        if !(self.fixed_step > 0.0) {
            return Err(invalid("fixed_step", "must be positive"));
        }
        if !(self.max_frame_delta >= self.fixed_step) {
            return Err(invalid(
                "max_frame_delta",
                format!("must be at least fixed_step ({})", self.fixed_step),
            ));
        }
        if !(self.time_scale > 0.0) {
            return Err(invalid("time_scale", "must be positive"));
        }

        // Paddle and ball are drawn on top of a full grid
        let needed = self.level_instances();
        if self.batch_capacity < needed {
            return Err(invalid(
                "batch_capacity",
                format!("{} quads cannot hold a full level of {}", self.batch_capacity, needed),
            ));
        }
        Ok(())
    }

    /// Max quads a level can put on screen at once
    pub fn level_instances(&self) -> usize {
        (self.grid_columns as usize) * (self.grid_rows as usize) + 2
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}
