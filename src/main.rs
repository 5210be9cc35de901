//! Duel Pong entry point
//!
//! Loads settings, shows the menu and runs terminal sessions.

use std::io;
use std::process::ExitCode;

use duel_pong::app::run_menu;
use duel_pong::platform::{FixedRatePacer, TerminalInput};
use duel_pong::renderer::TerminalRenderer;
use duel_pong::sim::EdgeProbe;
use duel_pong::{SessionSummary, Settings, run_session};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Duel Pong starting...");

    let settings = Settings::load();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match run_menu(stdin.lock(), &mut stdout, || play(&settings)) {
        Ok(state) => {
            log::info!("exiting ({:?})", state);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("duel-pong: {e}");
            ExitCode::FAILURE
        }
    }
}

/// One terminal session; the terminal is restored when the renderer drops
fn play(settings: &Settings) -> io::Result<SessionSummary> {
    let mut renderer = TerminalRenderer::enter(settings)?;
    let mut input = TerminalInput::new(renderer.reports_key_release());
    let mut pacer = FixedRatePacer::from_hz(settings.tick_rate_hz);
    run_session(settings, &EdgeProbe, &mut input, &mut renderer, &mut pacer)
}
