//! Per-tick input snapshot and the paddle intent derived from it

use super::state::Side;

/// Directional command for one paddle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    MoveUp,
    MoveDown,
    #[default]
    Hold,
}

impl Intent {
    /// Signed vertical velocity for this intent (screen y grows downward)
    #[inline]
    pub fn velocity(self, speed: f32) -> f32 {
        match self {
            Intent::MoveUp => -speed,
            Intent::MoveDown => speed,
            Intent::Hold => 0.0,
        }
    }
}

/// Held state of one paddle's up/down keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleKeys {
    pub up: bool,
    pub down: bool,
}

impl PaddleKeys {
    /// Up is checked first, so holding both keys moves up
    pub fn intent(self) -> Intent {
        if self.up {
            Intent::MoveUp
        } else if self.down {
            Intent::MoveDown
        } else {
            Intent::Hold
        }
    }
}

/// Raw input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Quit requested; checked before anything else runs
    pub quit: bool,
    pub left: PaddleKeys,
    pub right: PaddleKeys,
}

impl TickInput {
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }

    pub fn keys(&self, side: Side) -> PaddleKeys {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn keys_mut(&mut self, side: Side) -> &mut PaddleKeys {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
