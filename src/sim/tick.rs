//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one step. Ordering matters: paddles move
//! before the ball, so the collision test sees the paddles' post-move
//! positions.

use super::collision::CollisionResolver;
use super::intent::TickInput;
use super::state::{GameEvent, GameSession, Side};

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced one step; events in the order they happened
    Advanced(Vec<GameEvent>),
    /// Quit was requested; nothing was advanced
    Quit,
}

/// Advance the session by one tick
pub fn tick<R>(session: &mut GameSession, input: &TickInput, resolver: &R) -> TickOutcome
where
    R: CollisionResolver + ?Sized,
{
    if input.quit {
        log::debug!("quit requested at tick {}", session.tick_count);
        return TickOutcome::Quit;
    }

    session.tick_count += 1;
    let arena = session.arena();

    for side in Side::ALL {
        let intent = input.keys(side).intent();
        session.paddle_mut(side).set_intent(intent);
    }
    for side in Side::ALL {
        session.paddle_mut(side).advance(&arena);
    }

    let mut events = Vec::new();
    let motion = session.ball.advance(&arena);
    if motion.wall_bounce {
        events.push(GameEvent::WallBounce);
    }
    if let Some(exited) = motion.exited {
        events.push(GameEvent::BallReset { exited });
    }

    let contacts = resolver.resolve(&mut session.ball, &session.left, &session.right);
    events.extend(contacts.sides().map(GameEvent::PaddleHit));

    log::trace!(
        "tick {}: ball ({:.1}, {:.1}) vel ({:.1}, {:.1}), paddles y {:.1}/{:.1}",
        session.tick_count,
        session.ball.pos.x,
        session.ball.pos.y,
        session.ball.vel.x,
        session.ball.vel.y,
        session.left.y,
        session.right.y,
    );
    for event in &events {
        log::debug!("tick {}: {:?}", session.tick_count, event);
    }

    TickOutcome::Advanced(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::EdgeProbe;
    use crate::sim::intent::PaddleKeys;
    use crate::sim::state::{Arena, Ball, Paddle};
    use glam::Vec2;

    #[test]
    fn test_quit_is_checked_first() {
        let mut session = GameSession::new(&Settings::default());
        let before = session.clone();
        let input = TickInput {
            quit: true,
            left: PaddleKeys {
                up: true,
                down: false,
            },
            ..Default::default()
        };
        assert_eq!(tick(&mut session, &input, &EdgeProbe), TickOutcome::Quit);
        assert_eq!(session, before);
    }

    #[test]
    fn test_tick_moves_paddles_and_ball() {
        let mut session = GameSession::new(&Settings::default());
        let input = TickInput {
            left: PaddleKeys {
                up: true,
                down: true,
            },
            right: PaddleKeys {
                up: false,
                down: true,
            },
            ..Default::default()
        };
        let outcome = tick(&mut session, &input, &EdgeProbe);
        assert_eq!(outcome, TickOutcome::Advanced(Vec::new()));
        assert_eq!(session.tick_count, 1);
        assert_eq!(session.left.y, 235.0);
        assert_eq!(session.right.y, 245.0);
        assert_eq!(session.ball.pos, Vec2::new(502.0, 302.0));
    }

    #[test]
    fn test_intent_is_rederived_every_tick() {
        let mut session = GameSession::new(&Settings::default());
        let up = TickInput {
            left: PaddleKeys {
                up: true,
                down: false,
            },
            ..Default::default()
        };
        tick(&mut session, &up, &EdgeProbe);
        tick(&mut session, &TickInput::default(), &EdgeProbe);
        assert_eq!(session.left.vy, 0.0);
        assert_eq!(session.left.y, 235.0);
    }

    #[test]
    fn test_collision_sees_post_move_paddle() {
        // The paddle's top edge starts just below the ball's center and only
        // reaches it after this tick's move.
        let arena = Arena::new(1000.0, 600.0);
        let ball = Ball::new(Vec2::new(137.0, 200.0), Vec2::new(-2.0, 0.0), 15.0);
        let left = Paddle::new(Side::Left, 100.0, 203.0, 20.0, 120.0);
        let right = Paddle::new(Side::Right, 900.0, 240.0, 20.0, 120.0);
        let mut session = GameSession::from_parts(arena, ball, left, right);

        let input = TickInput {
            left: PaddleKeys {
                up: true,
                down: false,
            },
            ..Default::default()
        };
        let outcome = tick(&mut session, &input, &EdgeProbe);
        assert_eq!(session.left.y, 198.0);
        assert_eq!(
            outcome,
            TickOutcome::Advanced(vec![GameEvent::PaddleHit(Side::Left)])
        );
        assert_eq!(session.ball.vel.x, 2.0);
    }

    #[test]
    fn test_reset_precedes_collision() {
        let arena = Arena::new(1000.0, 600.0);
        let ball = Ball::new(Vec2::new(16.0, 300.0), Vec2::new(-2.0, 1.0), 15.0);
        let left = Paddle::new(Side::Left, 100.0, 240.0, 20.0, 120.0);
        let right = Paddle::new(Side::Right, 900.0, 240.0, 20.0, 120.0);
        let mut session = GameSession::from_parts(arena, ball, left, right);

        let outcome = tick(&mut session, &TickInput::default(), &EdgeProbe);
        assert_eq!(
            outcome,
            TickOutcome::Advanced(vec![GameEvent::BallReset { exited: Side::Left }])
        );
        assert_eq!(session.ball.pos, Vec2::new(500.0, 300.0));
        assert_eq!(session.ball.vel, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(&Settings::default());
        let mut b = GameSession::new(&Settings::default());
        let inputs = [
            TickInput::default(),
            TickInput {
                left: PaddleKeys {
                    up: true,
                    down: false,
                },
                ..Default::default()
            },
            TickInput {
                right: PaddleKeys {
                    up: false,
                    down: true,
                },
                ..Default::default()
            },
        ];
        for input in inputs.iter().cycle().take(600) {
            tick(&mut a, input, &EdgeProbe);
            tick(&mut b, input, &EdgeProbe);
        }
        assert_eq!(a, b);
        assert_eq!(a.tick_count, 600);
    }
}
