//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one step)
//! - Stable update order (input, paddles, ball, collisions)
//! - No rendering or platform dependencies

pub mod collision;
pub mod intent;
pub mod state;
pub mod tick;

pub use collision::{CollisionResolver, Contacts, EdgeProbe, probe_contact};
pub use intent::{Intent, PaddleKeys, TickInput};
pub use state::{Arena, Ball, BallMotion, GameEvent, GameSession, Paddle, Side};
pub use tick::{TickOutcome, tick};
