//! World state and player controls
//!
//! The world owns every body in the level. It is only ever mutated by
//! [`tick`](super::tick::tick) and by brick regeneration.

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Block;
use crate::consts::*;
use crate::settings::Settings;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The set of movement keys currently held down.
///
/// Paddle velocity is derived from this set every step, so a lost key
/// event can never leave a residual velocity behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    left: bool,
    right: bool,
}

impl Controls {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        self.set(direction, true);
    }

    pub fn release(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Paddle velocity for `speed`; opposite keys cancel out
    pub fn paddle_velocity(&self, speed: f32) -> f32 {
        let mut vel = 0.0;
        if self.left {
            vel -= speed;
        }
        if self.right {
            vel += speed;
        }
        vel
    }
}

/// Complete level state
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Block,
    pub paddle: Block,
    /// Destructible bricks, order irrelevant to gameplay
    pub bricks: Vec<Block>,
    pub ball_vel: Vec2,
    /// Paddle velocity used by the latest step
    pub paddle_vel: f32,
    /// Play field extent
    pub field: Vec2,
    pub ball_speed: f32,
    pub paddle_speed: f32,
    pub grid_columns: u32,
    pub grid_rows: u32,
    /// Number of brick grids generated so far
    pub waves: u32,
    /// Fixed steps simulated so far
    pub time_ticks: u64,
    pub seed: u64,
    rng: Pcg32,
}

impl World {
    /// Build the starting level and its first brick grid.
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let field = Vec2::new(settings.field_width, settings.field_height);

        let paddle = Block::new(
            Vec2::new(field.x / 2.0 - PADDLE_WIDTH / 2.0, field.y - 10.0),
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            Vec4::ONE,
        );
        let ball = Block::new(
            Vec2::new(field.x / 2.0 - BALL_SIZE / 2.0, field.y - 20.0),
            Vec2::splat(BALL_SIZE),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        );

        let mut world = Self {
            ball,
            paddle,
            bricks: Vec::new(),
            ball_vel: Vec2::splat(settings.ball_speed),
            paddle_vel: 0.0,
            field,
            ball_speed: settings.ball_speed,
            paddle_speed: settings.paddle_speed,
            grid_columns: settings.grid_columns,
            grid_rows: settings.grid_rows,
            waves: 0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        world.generate_bricks();
        world
    }

    /// Replace the brick list with a fresh grid in random opaque colors.
    pub fn generate_bricks(&mut self) {
        let (ox, oy) = GRID_ORIGIN;
        let (px, py) = GRID_PITCH;
        let size = Vec2::new(BRICK_WIDTH, BRICK_HEIGHT);

        self.bricks.clear();
        self.bricks
            .reserve((self.grid_columns * self.grid_rows) as usize);

        for col in 0..self.grid_columns {
            for row in 0..self.grid_rows {
                let pos = Vec2::new(ox + col as f32 * px, oy + row as f32 * py);
                let color = Vec4::new(
                    self.rng.random::<f32>(),
                    self.rng.random::<f32>(),
                    self.rng.random::<f32>(),
                    1.0,
                );
                self.bricks.push(Block::new(pos, size, color));
            }
        }

        self.waves += 1;
        log::info!("Wave {}: {} bricks", self.waves, self.bricks.len());
    }

    /// Everything that gets drawn, paddle and ball first
    pub fn live_blocks(&self) -> impl Iterator<Item = &Block> {
        [&self.paddle, &self.ball].into_iter().chain(self.bricks.iter())
    }

    pub fn live_count(&self) -> usize {
        self.bricks.len() + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_derive_velocity() {
        let mut controls = Controls::default();
        assert_eq!(controls.paddle_velocity(200.0), 0.0);

        controls.press(Direction::Left);
        assert_eq!(controls.paddle_velocity(200.0), -200.0);

        controls.press(Direction::Right);
        assert_eq!(controls.paddle_velocity(200.0), 0.0);

        controls.release(Direction::Left);
        assert_eq!(controls.paddle_velocity(200.0), 200.0);

        // Repeated edges cannot accumulate
        controls.press(Direction::Right);
        controls.press(Direction::Right);
        assert_eq!(controls.paddle_velocity(200.0), 200.0);

        controls.clear();
        assert!(!controls.is_held(Direction::Right));
    }

    #[test]
    fn test_new_world_layout() {
        let world = World::new(&Settings::default(), 7);
        assert_eq!(world.bricks.len(), 100);
        assert_eq!(world.waves, 1);
        assert_eq!(world.live_count(), 102);
        assert_eq!(world.live_blocks().count(), 102);
        assert_eq!(world.bricks[0].body.pos, Vec2::new(35.0, 20.0));
        assert_eq!(world.bricks[99].body.pos, Vec2::new(35.0 + 9.0 * 25.0, 20.0 + 9.0 * 8.0));
        assert!(world.bricks.iter().all(|b| b.color.w == 1.0));
        assert_eq!(world.ball_vel, Vec2::new(75.0, 75.0));
    }

    #[test]
    fn test_brick_colors_are_seeded() {
        let a = World::new(&Settings::default(), 42);
        let b = World::new(&Settings::default(), 42);
        assert_eq!(a.bricks, b.bricks);

        let c = World::new(&Settings::default(), 43);
        assert_ne!(a.bricks, c.bricks);
    }
}
