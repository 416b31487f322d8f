//! Fixed-timestep clock
//!
//! Rendering runs as fast as frames arrive; the simulation advances in
//! exact `step` increments drained from an accumulator:
//!
//! ```ignore
//! clock.update(now_ms);
//! while clock.consume_step() {
//!     sim::step(&mut world, clock.step());
//! }
//! ```
//!
//! There is no interpolation between the last consumed step and the render
//! time: a frame always shows the state after the last full step.

use crate::consts::{MAX_FRAME_DELTA, SIM_DT};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Clock {
    paused: bool,
    /// Frames seen since reset (starts at 1, like the fps baseline)
    frames: u32,
    fps: u32,
    /// Divisor applied to wall time for timers (2.0 = half speed)
    time_scale: f32,

    /// Wall time of the latest and previous update, in seconds
    current: f64,
    previous: f64,
    /// Clamped duration of the latest frame, in seconds
    frame_delta: f32,
    step: f32,
    max_frame_delta: f32,
    accumulator: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DELTA)
    }
}

impl Clock {
    pub fn new(step: f32, max_frame_delta: f32) -> Self {
        let mut clock = Self {
            paused: false,
            frames: 1,
            fps: 1,
            time_scale: 1.0,
            current: 0.0,
            previous: 0.0,
            frame_delta: 0.0,
            step,
            max_frame_delta,
            accumulator: 0.0,
        };
        clock.reset();
        clock
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut clock = Self::new(settings.fixed_step, settings.max_frame_delta);
        clock.time_scale = settings.time_scale;
        clock
    }

    /// Return to the fresh baseline. Step, clamp and time scale are kept.
    pub fn reset(&mut self) {
        self.paused = false;
        self.frames = 1;
        self.fps = 1;
        self.current = 0.0;
        self.previous = 0.0;
        self.frame_delta = 0.0;
        self.accumulator = 0.0;
    }

    /// Advance to wall time `now_ms`. Call once per rendered frame.
    ///
    /// The frame delta is clamped to `max_frame_delta` before it is added to
    /// the accumulator. While paused the delta is still measured (timers use
    /// it) but nothing is accumulated, so no steps run.
    pub fn update(&mut self, now_ms: f64) {
        self.previous = self.current;
        self.current = now_ms / 1000.0;
        self.frame_delta = ((self.current - self.previous) as f32)
            .min(self.max_frame_delta)
            .max(0.0);

        if !self.paused {
            self.accumulator += self.frame_delta;
        }

        // Coarse running average over the whole run
        if self.current > 0.0 {
            self.fps = (self.frames as f64 / self.current) as u32;
        }
        self.frames = self.frames.saturating_add(1);
    }

    /// Take one fixed step out of the accumulator, if a full one is there.
    #[inline]
    pub fn consume_step(&mut self) -> bool {
        // A non-positive step would never drain
        if self.step > 0.0 && self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Fixed step length in seconds
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Clamped duration of the latest frame, in seconds
    #[inline]
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Latest frame delta in scaled milliseconds
    pub fn frame_delta_ms(&self) -> f64 {
        self.frame_delta as f64 * 1000.0 / self.time_scale as f64
    }

    /// Current time in scaled milliseconds, the time base of phased timers
    pub fn now_ms(&self) -> f64 {
        self.current * 1000.0 / self.time_scale as f64
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
