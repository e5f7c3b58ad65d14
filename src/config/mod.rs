#![warn(clippy::all, clippy::pedantic)]

pub mod loader;

use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::components::PieceKind;
use crate::game;

/// Session tuning: board dimensions, movement cadence, scoring and the
/// difficulty curve. Validated before a session is created so malformed
/// values are rejected up front, never discovered mid-fall.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub base_fall_speed: f32,
    pub turbo_multiplier: f32,
    pub max_fall_speed: f32,
    pub horizontal_speed: f32,
    pub horizontal_first_repeat_factor: f32,
    pub rotate_first_repeat_delay: f32,
    pub rotate_repeat_delay: f32,
    pub points_per_row: u64,
    pub multi_row_bonus: f32,
    pub speed_score_threshold: u64,
    pub speed_score_divisor: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: game::BOARD_WIDTH,
            board_height: game::BOARD_HEIGHT,
            base_fall_speed: game::BASE_FALL_SPEED,
            turbo_multiplier: game::TURBO_MULTIPLIER,
            max_fall_speed: game::MAX_FALL_SPEED,
            horizontal_speed: game::HORIZONTAL_SPEED,
            horizontal_first_repeat_factor: game::HORIZONTAL_FIRST_REPEAT_FACTOR,
            rotate_first_repeat_delay: game::ROTATE_FIRST_REPEAT_DELAY,
            rotate_repeat_delay: game::ROTATE_REPEAT_DELAY,
            points_per_row: game::POINTS_PER_ROW,
            multi_row_bonus: game::MULTI_ROW_BONUS,
            speed_score_threshold: game::SPEED_SCORE_THRESHOLD,
            speed_score_divisor: game::SPEED_SCORE_DIVISOR,
        }
    }
}

impl GameConfig {
    /// Rejects configurations the simulation cannot run on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::ZeroBoardDimension {
                width: self.board_width,
                height: self.board_height,
            });
        }

        for (name, value) in [
            ("base_fall_speed", self.base_fall_speed),
            ("turbo_multiplier", self.turbo_multiplier),
            ("max_fall_speed", self.max_fall_speed),
            ("horizontal_speed", self.horizontal_speed),
            (
                "horizontal_first_repeat_factor",
                self.horizontal_first_repeat_factor,
            ),
            ("rotate_first_repeat_delay", self.rotate_first_repeat_delay),
            ("rotate_repeat_delay", self.rotate_repeat_delay),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveValue { name, value });
            }
        }

        if self.speed_score_divisor == 0 {
            return Err(ConfigError::NonPositiveValue {
                name: "speed_score_divisor",
                value: 0.0,
            });
        }

        // Every catalog shape must fit the board, or spawning could never
        // place it in bounds.
        for kind in PieceKind::ALL {
            let template = kind.template();
            if template.width() > self.board_width || template.height() > self.board_height {
                return Err(ConfigError::PieceDoesNotFit {
                    kind,
                    board_width: self.board_width,
                    board_height: self.board_height,
                });
            }
        }

        Ok(())
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    ZeroBoardDimension { width: usize, height: usize },
    NonPositiveValue { name: &'static str, value: f32 },
    PieceDoesNotFit {
        kind: PieceKind,
        board_width: usize,
        board_height: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config i/o error: {err}"),
            Self::Parse(err) => write!(f, "config parse error: {err}"),
            Self::Serialize(err) => write!(f, "config serialize error: {err}"),
            Self::ZeroBoardDimension { width, height } => {
                write!(f, "board dimensions must be non-zero, got {width}x{height}")
            }
            Self::NonPositiveValue { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::PieceDoesNotFit {
                kind,
                board_width,
                board_height,
            } => write!(
                f,
                "{kind:?} piece does not fit a {board_width}x{board_height} board"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
