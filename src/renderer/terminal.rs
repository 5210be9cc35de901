//! Terminal renderer (ratatui braille canvas)
//!
//! Owns the terminal for the lifetime of a session: raw mode, alternate
//! screen, window title and, where supported, key release reporting. All of
//! it is undone on drop.

use std::io::{self, Write};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{SetTitle, supports_keyboard_enhancement};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Context, Line};

use super::Renderer;
use super::shapes::{Scene, Shape, circle_spans, rect_columns};
use crate::settings::{Palette, Rgb, Settings};
use crate::sim::GameSession;

/// Braille cells hold 2x4 dots
const DOTS_PER_CELL_X: f32 = 2.0;
const DOTS_PER_CELL_Y: f32 = 4.0;

pub struct TerminalRenderer {
    terminal: DefaultTerminal,
    palette: Palette,
    title: String,
    key_release: bool,
}

impl TerminalRenderer {
    /// Take over the terminal
    pub fn enter(settings: &Settings) -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        // From here on an early return drops `renderer`, which restores the terminal
        let mut renderer = Self {
            terminal,
            palette: settings.palette.clone(),
            title: settings.title.clone(),
            key_release: false,
        };
        let supported = matches!(supports_keyboard_enhancement(), Ok(true));
        renderer.key_release = enable_key_release(&mut io::stdout(), supported)?;
        set_title(&mut io::stdout(), &settings.title)?;
        log::info!(
            "terminal renderer ready (key release events: {})",
            if renderer.key_release { "yes" } else { "no" }
        );
        Ok(renderer)
    }

    /// Whether the terminal reports key releases (see `TerminalInput::new`)
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if self.key_release {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
    }
}

impl Renderer for TerminalRenderer {
    fn present(&mut self, session: &GameSession) -> io::Result<()> {
        let scene = Scene::compose(session, &self.palette);
        let title = self.title.as_str();
        self.terminal.draw(|frame| {
            let area = frame.area();
            let (step_x, step_y) = dot_size(&scene, area);
            let canvas = Canvas::default()
                .block(Block::bordered().title(title))
                .marker(Marker::Braille)
                .background_color(color(scene.background))
                .x_bounds([0.0, f64::from(scene.arena.width)])
                .y_bounds([0.0, f64::from(scene.arena.height)])
                .paint(|ctx| paint_scene(ctx, &scene, step_x, step_y));
            frame.render_widget(canvas, area);
        })?;
        Ok(())
    }
}

/// Ask the terminal for release events; returns whether they are now on
fn enable_key_release<W: Write>(out: &mut W, supported: bool) -> io::Result<bool> {
    if supported {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(supported)
}

fn set_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    execute!(out, SetTitle(title))
}

fn color([r, g, b]: Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Arena units covered by one braille dot inside the border
fn dot_size(scene: &Scene, area: Rect) -> (f32, f32) {
    let cols = f32::from(area.width.saturating_sub(2).max(1)) * DOTS_PER_CELL_X;
    let rows = f32::from(area.height.saturating_sub(2).max(1)) * DOTS_PER_CELL_Y;
    (scene.arena.width / cols, scene.arena.height / rows)
}

/// Canvas y grows upward; arena y grows downward
fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, step_x: f32, step_y: f32) {
    let flip = |y: f32| f64::from(scene.arena.height - y);

    for shape in &scene.shapes {
        match *shape {
            Shape::Circle {
                center,
                radius,
                color: rgb,
            } => {
                for (y, x0, x1) in circle_spans(center, radius, step_y) {
                    ctx.draw(&Line {
                        x1: f64::from(x0),
                        y1: flip(y),
                        x2: f64::from(x1),
                        y2: flip(y),
                        color: color(rgb),
                    });
                }
            }
            Shape::Rect {
                origin,
                size,
                color: rgb,
            } => {
                for x in rect_columns(origin, size, step_x, 0.0..=scene.arena.width) {
                    ctx.draw(&Line {
                        x1: f64::from(x),
                        y1: flip(origin.y),
                        x2: f64::from(x),
                        y2: flip(origin.y + size.y),
                        color: color(rgb),
                    });
                }
            }
        }
    }
}
