//! Fixed-rate session loop
//!
//! One thread, one loop: wait for the tick, poll input, advance, present.
//! A quit snapshot ends the loop before anything else happens that tick.

use std::io;

use crate::platform::{InputSource, Pacer};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{CollisionResolver, GameEvent, GameSession, TickOutcome, tick};

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub wall_bounces: u64,
    pub paddle_hits: u64,
    pub resets: u64,
}

impl SessionSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::WallBounce => self.wall_bounces += 1,
                GameEvent::PaddleHit(_) => self.paddle_hits += 1,
                GameEvent::BallReset { .. } => self.resets += 1,
            }
        }
    }
}

/// Play one fresh session until input asks to quit
pub fn run_session<C, I, R, P>(
    settings: &Settings,
    resolver: &C,
    input: &mut I,
    renderer: &mut R,
    pacer: &mut P,
) -> io::Result<SessionSummary>
where
    C: CollisionResolver + ?Sized,
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
    P: Pacer + ?Sized,
{
    let mut session = GameSession::new(settings);
    let mut summary = SessionSummary::default();
    log::info!(
        "session started: arena {}x{}, {} Hz",
        settings.arena.width,
        settings.arena.height,
        settings.tick_rate_hz
    );

    loop {
        pacer.wait_for_next_tick();
        let snapshot = input.poll()?;
        match tick(&mut session, &snapshot, resolver) {
            TickOutcome::Quit => break,
            TickOutcome::Advanced(events) => summary.record(&events),
        }
        renderer.present(&session)?;
    }

    summary.ticks = session.tick_count;
    log::info!(
        "session ended after {} ticks ({} paddle hits, {} resets)",
        summary.ticks,
        summary.paddle_hits,
        summary.resets
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ScriptedInput, Unpaced};
    use crate::renderer::SceneRecorder;
    use crate::sim::EdgeProbe;

    #[test]
    fn test_summary_counts_events() {
        let mut summary = SessionSummary::default();
        summary.record(&[
            GameEvent::WallBounce,
            GameEvent::BallReset {
                exited: crate::sim::Side::Left,
            },
            GameEvent::PaddleHit(crate::sim::Side::Right),
            GameEvent::PaddleHit(crate::sim::Side::Left),
        ]);
        assert_eq!(summary.wall_bounces, 1);
        assert_eq!(summary.resets, 1);
        assert_eq!(summary.paddle_hits, 2);
    }

    #[test]
    fn test_immediate_quit_renders_nothing() {
        let settings = Settings::default();
        let mut input = ScriptedInput::idle(0);
        let mut recorder = SceneRecorder::new(settings.palette.clone());
        let summary =
            run_session(&settings, &EdgeProbe, &mut input, &mut recorder, &mut Unpaced).unwrap();
        assert_eq!(summary, SessionSummary::default());
        assert!(recorder.frames.is_empty());
    }
}
