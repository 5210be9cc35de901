//! Keyboard input sources
//!
//! Terminals report key presses (and auto-repeats), not held state. When the
//! terminal supports keyboard enhancement we also get release events and
//! can track held keys exactly. Otherwise a key counts as held for a window
//! after its last event: long after the first press, so the key survives the
//! OS auto-repeat delay, and short after a repeat.

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Side, TickInput};

/// Supplies one input snapshot per tick
pub trait InputSource {
    fn poll(&mut self) -> io::Result<TickInput>;
}

/// How long a key stays held after its initial press when no release events
/// arrive. Covers the usual auto-repeat delay of 250-660 ms.
pub const PRESS_HOLD_WINDOW: Duration = Duration::from_millis(700);

/// How long a key stays held after an auto-repeat when no release events arrive
pub const REPEAT_HOLD_WINDOW: Duration = Duration::from_millis(120);

/// Last event seen for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    Press(Instant),
    Repeat(Instant),
}

/// The four paddle controls: W/S for the left paddle, Up/Down for the right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleKey {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl PaddleKey {
    pub const ALL: [PaddleKey; 4] = [
        PaddleKey::LeftUp,
        PaddleKey::LeftDown,
        PaddleKey::RightUp,
        PaddleKey::RightDown,
    ];

    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w' | 'W') => Some(PaddleKey::LeftUp),
            KeyCode::Char('s' | 'S') => Some(PaddleKey::LeftDown),
            KeyCode::Up => Some(PaddleKey::RightUp),
            KeyCode::Down => Some(PaddleKey::RightDown),
            _ => None,
        }
    }

    pub fn side(self) -> Side {
        match self {
            PaddleKey::LeftUp | PaddleKey::LeftDown => Side::Left,
            PaddleKey::RightUp | PaddleKey::RightDown => Side::Right,
        }
    }

    pub fn is_up(self) -> bool {
        matches!(self, PaddleKey::LeftUp | PaddleKey::RightUp)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Turns key press/release events into held-key state
#[derive(Debug, Clone)]
pub struct KeyTracker {
    release_events: bool,
    last_seen: [Option<Seen>; 4],
}

impl KeyTracker {
    /// `release_events`: the source reports key releases, so keys stay held
    /// until released instead of timing out
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            last_seen: [None; 4],
        }
    }

    pub fn press(&mut self, key: PaddleKey, now: Instant) {
        self.last_seen[key.index()] = Some(Seen::Press(now));
    }

    /// Auto-repeat of a key that is already down
    pub fn repeat(&mut self, key: PaddleKey, now: Instant) {
        self.last_seen[key.index()] = Some(Seen::Repeat(now));
    }

    pub fn release(&mut self, key: PaddleKey) {
        self.last_seen[key.index()] = None;
    }

    pub fn is_held(&self, key: PaddleKey, now: Instant) -> bool {
        let (at, window) = match self.last_seen[key.index()] {
            Some(Seen::Press(at)) => (at, PRESS_HOLD_WINDOW),
            Some(Seen::Repeat(at)) => (at, REPEAT_HOLD_WINDOW),
            None => return false,
        };
        self.release_events || now.saturating_duration_since(at) <= window
    }

    /// Held-key snapshot at `now`
    pub fn snapshot(&self, now: Instant) -> TickInput {
        let mut input = TickInput::default();
        for key in PaddleKey::ALL {
            if self.is_held(key, now) {
                let keys = input.keys_mut(key.side());
                if key.is_up() {
                    keys.up = true;
                } else {
                    keys.down = true;
                }
            }
        }
        input
    }
}

/// Esc, `q` or Ctrl-C
fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Reads the keyboard through crossterm without blocking
#[derive(Debug)]
pub struct TerminalInput {
    tracker: KeyTracker,
    quit: bool,
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        Self {
            tracker: KeyTracker::new(release_events),
            quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Release && is_quit(&key) {
            log::debug!("quit key {:?}", key.code);
            self.quit = true;
            return;
        }
        if let Some(paddle_key) = PaddleKey::from_code(key.code) {
            match key.kind {
                KeyEventKind::Press => self.tracker.press(paddle_key, now),
                KeyEventKind::Repeat => self.tracker.repeat(paddle_key, now),
                KeyEventKind::Release => self.tracker.release(paddle_key),
            }
        }
    }

    /// Snapshot at `now` without touching the terminal
    pub fn snapshot(&self, now: Instant) -> TickInput {
        TickInput {
            quit: self.quit,
            ..self.tracker.snapshot(now)
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<TickInput> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
        }
        Ok(self.snapshot(Instant::now()))
    }
}

/// Replays a fixed sequence of snapshots, then reports quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `ticks` idle snapshots (no keys held)
    pub fn idle(ticks: usize) -> Self {
        Self::new(std::iter::repeat_n(TickInput::default(), ticks))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<TickInput> {
        Ok(self.frames.pop_front().unwrap_or_else(TickInput::quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PaddleKeys;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_bindings() {
        assert_eq!(PaddleKey::from_code(KeyCode::Char('w')), Some(PaddleKey::LeftUp));
        assert_eq!(PaddleKey::from_code(KeyCode::Char('S')), Some(PaddleKey::LeftDown));
        assert_eq!(PaddleKey::from_code(KeyCode::Up), Some(PaddleKey::RightUp));
        assert_eq!(PaddleKey::from_code(KeyCode::Down), Some(PaddleKey::RightDown));
        assert_eq!(PaddleKey::from_code(KeyCode::Left), None);
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_press_expires_without_release_events() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new(false);
        tracker.press(PaddleKey::LeftUp, t0);
        assert!(tracker.is_held(PaddleKey::LeftUp, t0 + ms(100)));
        assert!(tracker.is_held(PaddleKey::LeftUp, t0 + PRESS_HOLD_WINDOW));
        assert!(!tracker.is_held(PaddleKey::LeftUp, t0 + PRESS_HOLD_WINDOW + ms(1)));
    }

    #[test]
    fn test_key_stays_held_through_repeat_delay() {
        // Press, then the first auto-repeat 400 ms later, then repeats every 33 ms
        let t0 = Instant::now();
        let mut input = TerminalInput::new(false);
        input.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), t0);
        for step in (0..=400).step_by(16) {
            assert!(input.snapshot(t0 + ms(step)).left.down, "dropped at {step} ms");
        }
        let mut last = t0 + ms(400);
        for _ in 0..10 {
            input.handle_key(key(KeyCode::Char('s'), KeyEventKind::Repeat), last);
            assert!(input.snapshot(last + ms(33)).left.down);
            last += ms(33);
        }

        // Repeats stop once the key is let go
        let released = last - ms(33);
        assert!(!input.snapshot(released + REPEAT_HOLD_WINDOW + ms(1)).left.down);
    }

    #[test]
    fn test_release_events_hold_until_released() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new(true);
        tracker.press(PaddleKey::RightDown, t0);
        assert!(tracker.is_held(PaddleKey::RightDown, t0 + Duration::from_secs(5)));
        tracker.release(PaddleKey::RightDown);
        assert!(!tracker.is_held(PaddleKey::RightDown, t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_snapshot_maps_keys_to_sides() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new(true);
        tracker.press(PaddleKey::LeftUp, t0);
        tracker.press(PaddleKey::LeftDown, t0);
        tracker.press(PaddleKey::RightDown, t0);
        let input = tracker.snapshot(t0);
        let both = PaddleKeys {
            up: true,
            down: true,
        };
        let down = PaddleKeys {
            up: false,
            down: true,
        };
        assert_eq!(input.left, both);
        assert_eq!(input.right, down);
        assert!(!input.quit);
    }

    #[test]
    fn test_terminal_input_quit_keys() {
        let now = Instant::now();
        let mut input = TerminalInput::new(false);
        input.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press), now);
        assert!(!input.snapshot(now).quit);
        input.handle_key(key(KeyCode::Esc, KeyEventKind::Press), now);
        let snapshot = input.snapshot(now);
        assert!(snapshot.quit);
        assert!(snapshot.left.up);

        let mut input = TerminalInput::new(false);
        let mut ctrl_c = key(KeyCode::Char('c'), KeyEventKind::Press);
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        input.handle_key(ctrl_c, now);
        assert!(input.snapshot(now).quit);
    }

    #[test]
    fn test_terminal_input_release() {
        let now = Instant::now();
        let mut input = TerminalInput::new(true);
        input.handle_key(key(KeyCode::Up, KeyEventKind::Press), now);
        assert!(input.snapshot(now).right.up);
        input.handle_key(key(KeyCode::Up, KeyEventKind::Release), now);
        assert!(!input.snapshot(now).right.up);
    }

    #[test]
    fn test_scripted_input_quits_when_exhausted() {
        let mut script = ScriptedInput::idle(2);
        assert_eq!(script.poll().unwrap(), TickInput::default());
        assert_eq!(script.poll().unwrap(), TickInput::default());
        assert_eq!(script.remaining(), 0);
        assert!(script.poll().unwrap().quit);
    }
}
