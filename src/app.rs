//! Application lifecycle and text menu
//!
//! `Idle` until the player picks Play or Restart, `Running` while a session
//! loop is active, `Terminated` once they exit or quit. Every Play/Restart
//! builds a brand-new session; nothing carries over.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::session::SessionSummary;

/// Where the application is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// No session; menu is showing
    #[default]
    Idle,
    /// A session's tick loop is active
    Running,
    /// Exit or quit requested (absorbing)
    Terminated,
}

impl AppState {
    pub fn on_choice(self, choice: MenuChoice) -> AppState {
        match (self, choice) {
            (AppState::Terminated, _) => AppState::Terminated,
            (_, MenuChoice::Exit) => AppState::Terminated,
            (_, MenuChoice::Play | MenuChoice::Restart) => AppState::Running,
        }
    }

    /// Quit from inside a session, or end of menu input
    pub fn on_quit(self) -> AppState {
        AppState::Terminated
    }

    pub fn is_terminated(self) -> bool {
        self == AppState::Terminated
    }
}

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Exit,
    Restart,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [MenuChoice::Play, MenuChoice::Exit, MenuChoice::Restart];

    pub fn number(self) -> i64 {
        match self {
            MenuChoice::Play => 1,
            MenuChoice::Exit => 2,
            MenuChoice::Restart => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Play => "Play Game",
            MenuChoice::Exit => "Exit Game",
            MenuChoice::Restart => "Restart Game",
        }
    }
}

/// Rejected menu input; reported and re-prompted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A number, but not one on the menu
    InvalidChoice(i64),
    /// Not a number at all
    NonNumericInput(String),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChoice(_) => write!(f, "Invalid choice"),
            Self::NonNumericInput(_) => write!(f, "Please enter a valid number"),
        }
    }
}

impl std::error::Error for MenuError {}

impl FromStr for MenuChoice {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let n = match s.parse::<i64>() {
            Ok(n) => n,
            // Still a whole number, just not one of ours
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
            Err(_) => return Err(MenuError::NonNumericInput(s.to_string())),
        };
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.number() == n)
            .ok_or(MenuError::InvalidChoice(n))
    }
}

pub fn show_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "--- Pong Main Menu ---")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.number(), choice.label())?;
    }
    Ok(())
}

/// Drive the menu until the app terminates.
///
/// `play` runs one fresh session to completion; a session only ends when
/// the player quits, which terminates the app. End of input counts as Exit.
pub fn run_menu<B, W, F>(input: B, out: &mut W, mut play: F) -> io::Result<AppState>
where
    B: BufRead,
    W: Write,
    F: FnMut() -> io::Result<SessionSummary>,
{
    show_menu(out)?;

    let mut state = AppState::Idle;
    let mut lines = input.lines();
    while !state.is_terminated() {
        write!(out, "Please enter your choice: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            log::debug!("menu input closed");
            state = state.on_quit();
            break;
        };
        let line = line?;

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                log::debug!("rejected menu input {:?}: {:?}", line, e);
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let next = state.on_choice(choice);
        log::debug!("{:?} -> {:?} ({})", state, next, choice.label());
        state = next;

        match choice {
            MenuChoice::Exit => writeln!(out, "Goodbye!")?,
            MenuChoice::Play | MenuChoice::Restart => {
                if choice == MenuChoice::Restart {
                    writeln!(out, "Restarting Game...")?;
                }
                play()?;
                state = state.on_quit();
            }
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Play));
        assert_eq!(" 2\n".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("3".parse::<MenuChoice>(), Ok(MenuChoice::Restart));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("7".parse::<MenuChoice>(), Err(MenuError::InvalidChoice(7)));
        assert_eq!("-1".parse::<MenuChoice>(), Err(MenuError::InvalidChoice(-1)));
        assert_eq!(
            "99999999999999999999".parse::<MenuChoice>(),
            Err(MenuError::InvalidChoice(i64::MAX))
        );
        assert_eq!(
            "-99999999999999999999".parse::<MenuChoice>(),
            Err(MenuError::InvalidChoice(i64::MIN))
        );
        assert_eq!(
            "play".parse::<MenuChoice>(),
            Err(MenuError::NonNumericInput("play".to_string()))
        );
        assert_eq!(MenuError::InvalidChoice(0).to_string(), "Invalid choice");
        assert_eq!(
            MenuError::NonNumericInput(String::new()).to_string(),
            "Please enter a valid number"
        );
    }

    #[test]
    fn test_state_transitions() {
        assert_eq!(AppState::default(), AppState::Idle);
        assert_eq!(AppState::Idle.on_choice(MenuChoice::Play), AppState::Running);
        assert_eq!(AppState::Idle.on_choice(MenuChoice::Restart), AppState::Running);
        assert_eq!(AppState::Running.on_choice(MenuChoice::Restart), AppState::Running);
        assert_eq!(AppState::Idle.on_choice(MenuChoice::Exit), AppState::Terminated);
        assert_eq!(AppState::Running.on_quit(), AppState::Terminated);
        assert_eq!(
            AppState::Terminated.on_choice(MenuChoice::Play),
            AppState::Terminated
        );
    }

    #[test]
    fn test_show_menu() {
        let mut out = Vec::new();
        show_menu(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "--- Pong Main Menu ---\n1. Play Game\n2. Exit Game\n3. Restart Game\n"
        );
    }
}
