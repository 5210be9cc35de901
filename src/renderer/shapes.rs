//! Shape generation for 2D primitives
//!
//! A `Scene` is the backend-neutral description of one frame, in arena
//! coordinates (origin top-left, y down).

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::settings::{Palette, Rgb};
use crate::sim::{Arena, GameSession, Paddle};

/// A filled 2D primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32, color: Rgb },
    /// `origin` is the top-left corner
    Rect { origin: Vec2, size: Vec2, color: Rgb },
}

/// Everything drawn for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub arena: Arena,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Ball first, then the left and right paddles
    pub fn compose(session: &GameSession, palette: &Palette) -> Self {
        let ball = &session.ball;
        Self {
            arena: session.arena(),
            background: palette.background,
            shapes: vec![
                circle(ball.pos, ball.radius, palette.ball),
                paddle_rect(&session.left, palette.paddle),
                paddle_rect(&session.right, palette.paddle),
            ],
        }
    }
}

pub fn circle(center: Vec2, radius: f32, color: Rgb) -> Shape {
    Shape::Circle {
        center,
        radius,
        color,
    }
}

pub fn paddle_rect(paddle: &Paddle, color: Rgb) -> Shape {
    Shape::Rect {
        origin: Vec2::new(paddle.x(), paddle.y),
        size: Vec2::new(paddle.width, paddle.height),
        color,
    }
}

/// Horizontal chords `(y, x_start, x_end)` covering a filled circle, `step` apart
pub fn circle_spans(center: Vec2, radius: f32, step: f32) -> Vec<(f32, f32, f32)> {
    let step = step.max(f32::EPSILON);
    let mut spans = Vec::new();
    let mut dy = -radius;
    while dy <= radius {
        let half = (radius * radius - dy * dy).max(0.0).sqrt();
        spans.push((center.y + dy, center.x - half, center.x + half));
        dy += step;
    }
    spans
}

/// Vertical line `x` positions covering a filled rectangle clipped to
/// `visible`, `step` apart (always includes both visible edges)
pub fn rect_columns(origin: Vec2, size: Vec2, step: f32, visible: RangeInclusive<f32>) -> Vec<f32> {
    let start = origin.x.max(*visible.start());
    let end = (origin.x + size.x).min(*visible.end());
    if !(start <= end) {
        return Vec::new();
    }
    let step = step.max(f32::EPSILON);
    let count = ((end - start) / step).ceil() as usize;
    let mut columns: Vec<f32> = (0..count).map(|i| start + i as f32 * step).collect();
    columns.push(end);
    columns
}
