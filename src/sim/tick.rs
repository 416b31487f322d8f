//! Fixed timestep simulation tick
//!
//! Advances the level by exactly one fixed step.

use super::collision::{check_collision, mark_touched};
use super::state::{Controls, World};

/// What happened during a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// A fresh brick grid was generated before the step ran
    pub regenerated: bool,
    pub paddle_hit: bool,
    pub brick_destroyed: bool,
}

/// Advance the world by one fixed timestep of `dt` seconds.
///
/// After integration the paddle is clamped inside the field.
///
/// A cleared grid is refilled at the start of the next step, before the
/// ball moves. If the ball still sits on the slot of the last brick it
/// destroys the fresh brick in that slot and bounces back into the grid.
pub fn tick(world: &mut World, controls: &Controls, dt: f32) -> StepEvents {
    let mut events = StepEvents::default();

    if world.bricks.is_empty() {
        world.generate_bricks();
        events.regenerated = true;
    }

    world.time_ticks += 1;

    // Integrate
    world.paddle_vel = controls.paddle_velocity(world.paddle_speed);
    world.ball.body.pos += world.ball_vel * dt;
    world.paddle.body.pos.x += world.paddle_vel * dt;
    let paddle_max_x = (world.field.x - world.paddle.body.size.x).max(0.0);
    world.paddle.body.pos.x = world.paddle.body.pos.x.clamp(0.0, paddle_max_x);

    let World {
        ball,
        paddle,
        bricks,
        ball_vel,
        paddle_vel,
        ball_speed,
        ..
    } = world;

    // Paddle steers the ball toward the direction it is moving
    let result = check_collision(&paddle.body, &ball.body);
    if mark_touched(&result, &mut paddle.body, &mut ball.body) {
        events.paddle_hit = true;
        if *paddle_vel > 0.0 {
            ball_vel.x = *ball_speed;
        } else if *paddle_vel < 0.0 {
            ball_vel.x = -*ball_speed;
        }
        log::debug!("Paddle hit at x={:.1}", ball.body.pos.x);
    }

    // At most one brick per step: the first one hit in list order
    let hit = bricks.iter_mut().position(|brick| {
        let result = check_collision(&ball.body, &brick.body);
        mark_touched(&result, &mut ball.body, &mut brick.body)
    });
    if let Some(index) = hit {
        let brick = bricks.remove(index);
        events.brick_destroyed = true;
        log::debug!(
            "Brick destroyed at ({:.0}, {:.0}), {} left",
            brick.body.pos.x,
            brick.body.pos.y,
            bricks.len()
        );
    }

    if ball.body.touched {
        ball_vel.y = -ball_vel.y;
    }

    // Field edges always send the ball back inside
    let field = world.field;
    let ball = &mut world.ball.body;
    if ball.pos.x <= 0.0 {
        world.ball_vel.x = world.ball_speed;
    } else if ball.pos.x + ball.size.x >= field.x {
        world.ball_vel.x = -world.ball_speed;
    }
    if ball.pos.y <= 0.0 {
        world.ball_vel.y = world.ball_speed;
    } else if ball.pos.y + ball.size.y >= field.y {
        world.ball_vel.y = -world.ball_speed;
    }

    ball.touched = false;
    world.paddle.body.touched = false;

    events
}
