//! Shared types module - plain data and configuration used across the workspace
//!
//! This crate defines the vocabulary shared by the engine, the input shell and
//! the renderer. Everything here is plain data: no board logic lives in this crate.
//!
//! # Coordinates
//!
//! Board coordinates are `(x, y)` pairs where `x` grows to the right and `y`
//! grows *down* the board, so row 0 is the top row. Coordinates are signed so a
//! candidate position (for example a piece nudged past the left wall) can be
//! represented long enough to be rejected.
//!
//! # Default Configuration
//!
//! | Setting | Value | Description |
//! |---------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 9 | Columns on the playing board |
//! | `DEFAULT_BOARD_DEPTH` | 15 | Rows on the playing board |
//! | `DEFAULT_SPAWN_X` | 4 | Column of a new piece's bounding-box corner |
//! | `DEFAULT_SPAWN_Y` | 0 | Row of a new piece's bounding-box corner |
//! | `DEFAULT_DROP_INTERVAL_MS` | 1000 | Cadence of the automatic drop |
//! | `DEFAULT_VICTORY_ROWS` | 10 | Rows to clear to win a game |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameConfig};
//!
//! // Parse a command (case-insensitive)
//! let command = Command::from_str("rotateLeft").unwrap();
//! assert_eq!(command, Command::RotateLeft);
//!
//! // Default configuration is always valid
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.spawn_point(), (4, 0));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (9 columns)
pub const DEFAULT_BOARD_WIDTH: u16 = 9;

/// Board depth in cells (15 rows)
pub const DEFAULT_BOARD_DEPTH: u16 = 15;

/// Spawn column for the top-left corner of a new piece
pub const DEFAULT_SPAWN_X: u16 = 4;

/// Spawn row for the top-left corner of a new piece
pub const DEFAULT_SPAWN_Y: u16 = 0;

/// Interval between automatic drops (1000ms = one row per second)
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 1000;

/// Rows that must be cleared to win
pub const DEFAULT_VICTORY_ROWS: u32 = 10;

/// `(x, y)` pair on the board or relative to a piece's bounding box.
pub type Coordinates = (i32, i32);

/// Discrete commands the input shell can send to the engine
///
/// Each command maps one-to-one onto a turn controller operation and carries
/// no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Drop the active piece one row (same as the timer tick)
    SoftDrop,
    /// Rotate the active piece a quarter turn to the left
    RotateLeft,
    /// Rotate the active piece a quarter turn to the right
    RotateRight,
    /// Mirror the active piece across its vertical axis
    FlipHorizontal,
}

impl Command {
    /// Every command, in input-help order.
    pub const ALL: [Command; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::RotateLeft,
        Command::RotateRight,
        Command::FlipHorizontal,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("SOFTDROP"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("flipHorizontal"), Some(Command::FlipHorizontal));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotateleft" => Some(Command::RotateLeft),
            "rotateright" => Some(Command::RotateRight),
            "fliphorizontal" => Some(Command::FlipHorizontal),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateLeft => "rotateLeft",
            Command::RotateRight => "rotateRight",
            Command::FlipHorizontal => "flipHorizontal",
        }
    }
}

/// Where a game stands, as shown by the end-of-game screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// Reasons a [`GameConfig`] cannot start a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{depth}")]
    EmptyBoard { width: u16, depth: u16 },
    #[error("spawn point ({x}, {y}) lies outside a {width}x{depth} board")]
    SpawnOutsideBoard { x: u16, y: u16, width: u16, depth: u16 },
    #[error("drop interval must be positive")]
    ZeroDropInterval,
    #[error("victory threshold must be at least one row")]
    ZeroVictoryRows,
}

/// Settings the embedding application chooses for a game.
///
/// Missing fields fall back to the defaults when deserialized, so a config file
/// only has to name what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_depth: u16,
    pub spawn_x: u16,
    pub spawn_y: u16,
    pub drop_interval_ms: u32,
    pub victory_rows: u32,
}

impl GameConfig {
    /// Board coordinates of the spawn point.
    pub fn spawn_point(&self) -> Coordinates {
        (self.spawn_x as i32, self.spawn_y as i32)
    }

    /// Check the settings are usable.
    ///
    /// This only catches settings that are wrong for every piece. A spawn point
    /// close to the right or bottom edge can still be too tight for the wider
    /// shapes; that surfaces when such a shape is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_depth == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                depth: self.board_depth,
            });
        }
        if self.spawn_x >= self.board_width || self.spawn_y >= self.board_depth {
            return Err(ConfigError::SpawnOutsideBoard {
                x: self.spawn_x,
                y: self.spawn_y,
                width: self.board_width,
                depth: self.board_depth,
            });
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.victory_rows == 0 {
            return Err(ConfigError::ZeroVictoryRows);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_depth: DEFAULT_BOARD_DEPTH,
            spawn_x: DEFAULT_SPAWN_X,
            spawn_y: DEFAULT_SPAWN_Y,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            victory_rows: DEFAULT_VICTORY_ROWS,
        }
    }
}
