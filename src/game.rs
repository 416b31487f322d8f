//! Per-frame orchestration
//!
//! One call to [`Game::frame`] per rendered frame:
//! 1. the clock takes the new wall time,
//! 2. the world runs however many fixed steps the accumulator holds,
//! 3. every live block is packed into the batch,
//! 4. the debug report timer advances.
//!
//! The platform then uploads [`Game::batch`] and issues the draw.

use crate::error::{BatchError, SettingsError};
use crate::platform::{Action, KeyEvent};
use crate::renderer::Batch;
use crate::settings::Settings;
use crate::sim::{Controls, World, tick};
use crate::time::{Clock, PhasedTimer, TimerConfig, TimerEvent};

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fixed steps simulated this frame
    pub steps: u32,
    pub bricks_destroyed: u32,
    pub regenerated: bool,
    /// Quads packed into the batch
    pub instances: usize,
    /// Indices the draw call must consume
    pub index_count: u32,
    pub report: Option<TimerEvent>,
}

pub struct Game {
    clock: Clock,
    world: World,
    controls: Controls,
    batch: Batch,
    report_timer: PhasedTimer,
    running: bool,
}

impl Game {
    /// `fallback_seed` is used when the settings do not pin one.
    ///
    /// The settings are validated first, so a zero step or an undersized
    /// batch is rejected here instead of stalling [`Game::frame`].
    pub fn new(settings: &Settings, fallback_seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!("Starting level with seed {}", seed);

        Ok(Self {
            clock: Clock::from_settings(settings),
            world: World::new(settings, seed),
            controls: Controls::default(),
            batch: Batch::with_capacity(settings.batch_capacity),
            report_timer: PhasedTimer::new(
                TimerConfig::two_way().looping(),
                settings.report_delay_ms,
                settings.report_restart_delay_ms,
            ),
            running: true,
        })
    }

    /// Apply a key edge from the platform
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(direction) = event.action.direction() {
            self.controls.set(direction, event.pressed);
            return;
        }

        if !event.pressed || event.repeat {
            return;
        }
        match event.action {
            Action::Pause => {
                self.clock.toggle_pause();
                log::info!("Paused: {}", self.clock.is_paused());
            }
            Action::Quit => self.quit(),
            Action::MoveLeft | Action::MoveRight => {}
        }
    }

    /// Run one frame at wall time `now_ms`.
    ///
    /// Fails only if the level no longer fits in the batch, which callers
    /// must treat as fatal.
    pub fn frame(&mut self, now_ms: f64) -> Result<FrameStats, BatchError> {
        let mut stats = FrameStats::default();

        self.clock.update(now_ms);

        let dt = self.clock.step();
        while self.clock.consume_step() {
            let events = tick(&mut self.world, &self.controls, dt);
            stats.steps += 1;
            stats.regenerated |= events.regenerated;
            if events.brick_destroyed {
                stats.bricks_destroyed += 1;
            }
        }

        self.batch.clear();
        self.batch.extend(self.world.live_blocks())?;
        stats.instances = self.batch.instance_count();
        stats.index_count = self.batch.index_count();

        stats.report = self.report_timer.update(&self.clock);
        match stats.report {
            Some(TimerEvent::Started) => log::debug!("Report timer started"),
            Some(TimerEvent::Waited) => log::debug!("Report timer waiting"),
            Some(TimerEvent::Done) => log::info!(
                "FPS: {} | bricks: {} | wave: {}",
                self.clock.fps(),
                self.world.bricks.len(),
                self.world.waves
            ),
            None => {}
        }

        Ok(stats)
    }

    pub fn quit(&mut self) {
        log::info!("Quit");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Packed geometry of the latest frame
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Release all held keys (focus lost)
    pub fn release_all(&mut self) {
        self.controls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;

    fn game() -> Game {
        Game::new(&Settings::default(), 2024).unwrap()
    }

    #[test]
    fn test_frame_steps_and_packs() {
        let mut game = game();
        let first = game.frame(0.0).unwrap();
        assert_eq!(first.steps, 0);
        assert_eq!(first.instances, 102);
        assert_eq!(first.index_count, 612);
        assert_eq!(first.report, Some(TimerEvent::Started));

        let second = game.frame(16.0).unwrap();
        assert_eq!(second.steps, 1);
        assert_eq!(game.batch().vertex_count(), 4 * 102);
        assert!(game.clock().accumulator() < game.clock().step());
    }

    #[test]
    fn test_hitch_is_bounded() {
        let mut game = game();
        game.frame(0.0).unwrap();
        let stats = game.frame(5000.0).unwrap();
        assert!((24..=25).contains(&stats.steps), "ran {}", stats.steps);
    }

    #[test]
    fn test_batch_is_rebuilt_each_frame() {
        let mut game = game();
        game.frame(0.0).unwrap();
        game.world_mut().bricks.truncate(10);
        let stats = game.frame(1.0).unwrap();
        assert_eq!(stats.instances, 12);
        assert_eq!(game.batch().index_count(), 72);
    }

    #[test]
    fn test_overflow_is_reported() {
        let settings = Settings {
            batch_capacity: 102,
            ..Settings::default()
        };
        let mut game = Game::new(&settings, 1).unwrap();
        assert_eq!(game.frame(0.0).unwrap().instances, 102);

        let extra = game.world().bricks[0];
        game.world_mut().bricks.push(extra);
        let err = game.frame(1.0).unwrap_err();
        assert_eq!(
            err,
            BatchError::Overflow {
                capacity: 102,
                requested: 103
            }
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let zero_step = Settings {
            fixed_step: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            Game::new(&zero_step, 1),
            Err(SettingsError::Invalid { field: "fixed_step", .. })
        ));

        let negative_clamp = Settings {
            max_frame_delta: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            Game::new(&negative_clamp, 1),
            Err(SettingsError::Invalid { field: "max_frame_delta", .. })
        ));

        let small_batch = Settings {
            batch_capacity: 50,
            ..Settings::default()
        };
        assert!(Game::new(&small_batch, 1).is_err());
    }

    #[test]
    fn test_movement_keys_drive_paddle() {
        let mut game = game();
        let start = game.world().paddle.body.pos.x;

        game.handle_key(KeyEvent::down(Action::MoveLeft));
        assert!(game.controls().is_held(Direction::Left));
        game.frame(0.0).unwrap();
        game.frame(100.0).unwrap();
        assert!(game.world().paddle.body.pos.x < start);

        game.handle_key(KeyEvent::up(Action::MoveLeft));
        let stopped = game.world().paddle.body.pos.x;
        game.frame(200.0).unwrap();
        assert_eq!(game.world().paddle.body.pos.x, stopped);
    }

    #[test]
    fn test_pause_stops_simulation() {
        let mut game = game();
        game.frame(0.0).unwrap();
        game.handle_key(KeyEvent::down(Action::Pause));
        assert!(game.clock().is_paused());

        let ball = game.world().ball.body.pos;
        let stats = game.frame(100.0).unwrap();
        assert_eq!(stats.steps, 0);
        assert_eq!(game.world().ball.body.pos, ball);
        // Still drawn while paused
        assert_eq!(stats.instances, 102);

        // Repeat edges do not toggle
        game.handle_key(KeyEvent {
            action: Action::Pause,
            pressed: true,
            repeat: true,
        });
        assert!(game.clock().is_paused());
    }

    #[test]
    fn test_quit_stops_running() {
        let mut game = game();
        assert!(game.is_running());
        game.handle_key(KeyEvent::up(Action::Quit));
        assert!(game.is_running());
        game.handle_key(KeyEvent::down(Action::Quit));
        assert!(!game.is_running());
    }

    #[test]
    fn test_settings_seed_wins() {
        let settings = Settings {
            seed: Some(5),
            ..Settings::default()
        };
        let a = Game::new(&settings, 1).unwrap();
        let b = Game::new(&settings, 2).unwrap();
        assert_eq!(a.world().seed, 5);
        assert_eq!(a.world().bricks, b.world().bricks);
    }
}
