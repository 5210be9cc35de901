//! Duel Pong - two paddles, one ball, one fixed tick
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, tick ordering)
//! - `settings`: Read-only session configuration
//! - `platform`: Input and frame pacing collaborators
//! - `renderer`: Scene composition and terminal drawing
//! - `session`: Fixed-rate loop tying the simulation to its collaborators
//! - `app`: Menu and application lifecycle

pub mod app;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use app::{AppState, MenuChoice, MenuError};
pub use session::{SessionSummary, run_session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_START_VELOCITY: Vec2 = Vec2::new(2.0, 2.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Distance from each side wall to the paddle's left edge (left paddle) or
    /// from the right wall back to the paddle's left edge (right paddle)
    pub const PADDLE_INSET: f32 = 100.0;
    /// Paddle travel per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 5.0;
}
