//! Game state and core simulation types
//!
//! A `GameSession` owns the ball and both paddles; the `Arena` is fixed when
//! the session is created and only ever handed out by value.

use glam::Vec2;

use super::intent::Intent;
use crate::consts::PADDLE_SPEED;
use crate::settings::Settings;

/// Which paddle (and which arena wall) something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];
}

/// Rectangular bounds the simulation is constrained to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// What happened to the ball during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallMotion {
    /// Vertical velocity was reflected off the top or bottom wall
    pub wall_bounce: bool,
    /// The ball crossed a side wall and was re-centred
    pub exited: Option<Side>,
}

/// The ball. `pos` is its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Move one tick, then apply wall bounce and off-arena reset.
    ///
    /// The bounce test runs after the move and never clamps `pos.y`, so the
    /// ball can overlap a wall by up to one tick of travel. On reset both
    /// velocity components are negated.
    pub fn advance(&mut self, arena: &Arena) -> BallMotion {
        self.pos += self.vel;

        let wall_bounce =
            self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= arena.height;
        if wall_bounce {
            self.vel.y = -self.vel.y;
        }

        let exited = if self.pos.x - self.radius <= 0.0 {
            Some(Side::Left)
        } else if self.pos.x + self.radius >= arena.width {
            Some(Side::Right)
        } else {
            None
        };
        if exited.is_some() {
            self.pos = arena.center();
            self.vel = -self.vel;
        }

        BallMotion {
            wall_bounce,
            exited,
        }
    }
}

/// A player paddle. `y` is the top edge; `x` is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub side: Side,
    x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity for the current tick
    pub vy: f32,
    /// Magnitude applied for MoveUp/MoveDown
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            side,
            x,
            y,
            width,
            height,
            vy: 0.0,
            speed: PADDLE_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn set_intent(&mut self, intent: Intent) {
        self.vy = intent.velocity(self.speed);
    }

    /// Move by `vy`, then clamp into `[0, arena.height - height]`.
    ///
    /// Clamps every tick, so a paddle placed out of bounds corrects itself on
    /// its first advance. An oversized paddle pins to `y = 0`.
    pub fn advance(&mut self, arena: &Arena) {
        self.y += self.vy;
        self.y = self.y.min(arena.height - self.height).max(0.0);
    }
}

/// Discrete things that happened during a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    BallReset { exited: Side },
    PaddleHit(Side),
}

/// Everything one round of play owns. Built fresh on every Play/Restart.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    arena: Arena,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    /// Simulation ticks run so far
    pub tick_count: u64,
}

impl GameSession {
    /// Create the opening layout: ball centred, paddles centred vertically
    pub fn new(settings: &Settings) -> Self {
        let arena = Arena::new(settings.arena.width, settings.arena.height);
        let ball = Ball::new(
            arena.center(),
            settings.ball.start_velocity,
            settings.ball.radius,
        );

        let paddles = &settings.paddles;
        let y = arena.height / 2.0 - paddles.height / 2.0;
        let left = Paddle::new(Side::Left, paddles.inset, y, paddles.width, paddles.height)
            .with_speed(paddles.speed);
        let right = Paddle::new(
            Side::Right,
            arena.width - paddles.inset,
            y,
            paddles.width,
            paddles.height,
        )
        .with_speed(paddles.speed);

        Self::from_parts(arena, ball, left, right)
    }

    pub fn from_parts(arena: Arena, ball: Ball, left: Paddle, right: Paddle) -> Self {
        Self {
            arena,
            ball,
            left,
            right,
            tick_count: 0,
        }
    }

    #[inline]
    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
