//! Platform abstraction layer
//!
//! Collaborators the simulation loop consumes but does not own:
//! - Input: per-tick key snapshot (terminal or scripted)
//! - Time: fixed-rate tick pacing

pub mod input;
pub mod time;

pub use input::{InputSource, KeyTracker, PaddleKey, ScriptedInput, TerminalInput};
pub use time::{FixedRatePacer, Pacer, Unpaced};
