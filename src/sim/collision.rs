//! Ball/paddle collision detection and response
//!
//! `EdgeProbe` reproduces the classic one-axis test: only the ball's extreme
//! point facing the paddle is checked against the paddle's horizontal span,
//! and only the ball's center is checked against its vertical span. A ball
//! can graze a paddle corner without registering, and a large ball can
//! register before its circle touches the rectangle. Gameplay depends on
//! this, so an exact circle/rectangle test belongs in a separate resolver.

use super::state::{Ball, Paddle, Side};

/// Which paddles reversed the ball during one resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(move |side| match side {
            Side::Left => self.left,
            Side::Right => self.right,
        })
    }
}

/// Detects ball/paddle contact and applies its velocity change.
///
/// Holds no state between calls; called once per tick after the ball moves.
pub trait CollisionResolver {
    fn resolve(&self, ball: &mut Ball, left: &Paddle, right: &Paddle) -> Contacts;
}

/// Point-versus-span paddle test (see module docs)
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeProbe;

impl CollisionResolver for EdgeProbe {
    fn resolve(&self, ball: &mut Ball, left: &Paddle, right: &Paddle) -> Contacts {
        let mut contacts = Contacts::default();

        // Each side is tested independently; only one paddle is reachable at
        // a time in any arena wider than twice the inset.
        if probe_contact(ball, left, Side::Left) {
            ball.vel.x = -ball.vel.x;
            contacts.left = true;
        }
        if probe_contact(ball, right, Side::Right) {
            ball.vel.x = -ball.vel.x;
            contacts.right = true;
        }

        contacts
    }
}

/// The ball's horizontal extreme facing a paddle on `side`
#[inline]
pub fn probe_x(ball: &Ball, side: Side) -> f32 {
    match side {
        Side::Left => ball.pos.x - ball.radius,
        Side::Right => ball.pos.x + ball.radius,
    }
}

/// Inclusive span test: probe point inside `[x, x + width]` and ball center
/// inside `[y, y + height]`
pub fn probe_contact(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let probe = probe_x(ball, side);
    let in_span = paddle.x() <= probe && probe <= paddle.x() + paddle.width;
    let in_band = paddle.y <= ball.pos.y && ball.pos.y <= paddle.bottom();
    in_span && in_band
}
