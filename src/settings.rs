//! Session configuration
//!
//! One read-only `Settings` value is loaded at startup and passed by
//! reference into session construction and rendering. Stored as JSON; any
//! missing section or field falls back to its default.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Arena bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Ball size and serve velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Velocity at session start, arena units per tick
    pub start_velocity: Vec2,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            start_velocity: BALL_START_VELOCITY,
        }
    }
}

/// Paddle geometry and speed (shared by both sides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Left paddle x, and distance from the right wall to the right paddle's x
    pub inset: f32,
    /// Units per tick while a key is held
    pub speed: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            inset: PADDLE_INSET,
            speed: PADDLE_SPEED,
        }
    }
}

/// Colors used by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub ball: Rgb,
    pub paddle: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            ball: [255, 255, 255],
            paddle: [255, 192, 203],
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub ball: BallSettings,
    pub paddles: PaddleSettings,
    pub tick_rate_hz: u32,
    pub palette: Palette,
    /// Shown in the terminal title and the canvas border
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            ball: BallSettings::default(),
            paddles: PaddleSettings::default(),
            tick_rate_hz: TICK_RATE_HZ,
            palette: Palette::default(),
            title: "Duel Pong".to_string(),
        }
    }
}

/// Failure to load a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read settings: {e}"),
            Self::Parse(e) => write!(f, "malformed settings: {e}"),
            Self::Invalid(m) => write!(f, "invalid settings: {m}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Settings {
    /// Environment variable naming an explicit settings file
    pub const PATH_ENV: &'static str = "DUEL_PONG_SETTINGS";
    /// Settings file picked up from the working directory
    pub const DEFAULT_FILE: &'static str = "duel_pong.json";

    /// Parse and validate settings from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `$DUEL_PONG_SETTINGS` or `./duel_pong.json`,
    /// falling back to defaults on any problem
    pub fn load() -> Self {
        let path = match std::env::var_os(Self::PATH_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(Self::DEFAULT_FILE);
                if !local.exists() {
                    log::info!("Using default settings");
                    return Self::default();
                }
                local
            }
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Reject configurations the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid =
            |m: &str| -> Result<(), SettingsError> { Err(SettingsError::Invalid(m.to_string())) };

        let ArenaSettings { width, height } = self.arena;
        if !(width > 0.0 && height > 0.0) {
            return invalid("arena dimensions must be positive");
        }
        if !(self.ball.radius > 0.0 && self.ball.radius < width.min(height) / 2.0) {
            return invalid("ball radius must be positive and below half the smaller arena side");
        }
        if !(self.paddles.width > 0.0 && self.paddles.height > 0.0) {
            return invalid("paddle dimensions must be positive");
        }
        if self.paddles.height > height {
            return invalid("paddle is taller than the arena");
        }
        // Left paddle spans [inset, inset + w], right paddle [width - inset, width - inset + w]
        let PaddleSettings {
            width: paddle_width,
            inset,
            ..
        } = self.paddles;
        if !(paddle_width <= inset && inset + paddle_width <= width) {
            return invalid("paddles must fit inside the arena");
        }
        if self.paddles.speed < 0.0 {
            return invalid("paddle speed must not be negative");
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick rate must be non-zero");
        }
        Ok(())
    }
}
