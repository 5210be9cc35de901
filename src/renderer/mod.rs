//! Rendering module
//!
//! Renderers only read the session; they are called once per tick after
//! collision resolution.

pub mod shapes;
pub mod terminal;

use std::io;

use crate::settings::Palette;
use crate::sim::GameSession;

pub use shapes::{Scene, Shape};
pub use terminal::TerminalRenderer;

/// Presents the post-tick session
pub trait Renderer {
    fn present(&mut self, session: &GameSession) -> io::Result<()>;
}

/// Keeps every composed frame instead of drawing it (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct SceneRecorder {
    palette: Palette,
    pub frames: Vec<Scene>,
}

impl SceneRecorder {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            frames: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&Scene> {
        self.frames.last()
    }
}

impl Renderer for SceneRecorder {
    fn present(&mut self, session: &GameSession) -> io::Result<()> {
        self.frames.push(Scene::compose(session, &self.palette));
        Ok(())
    }
}
