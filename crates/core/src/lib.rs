//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game: the grid, the piece
//! catalog, piece geometry, the per-turn state machine and the shared progress
//! counters. It has no dependency on a terminal or any other front end.
//!
//! # Module Structure
//!
//! - [`board`]: rectangular occupancy grid with row clearing
//! - [`pieces`]: the five shapes and the [`ShapeSource`] seam
//! - [`rng`]: seeded LCG and the uniform shape source
//! - [`transform`]: piece movement, rotation and flip validation
//! - [`controller`]: turn lifecycle on top of a board
//! - [`progress`]: rows cleared, overflow and change listeners
//! - [`snapshot`]: owned board copies for the presentation layer
//! - [`session`]: one game assembled from a [`GameConfig`](types::GameConfig)
//!
//! # Rules
//!
//! - A piece spawns with its bounding box's top-left corner at the spawn point.
//! - Left, right, rotations and flip are rejected when the result would leave
//!   the board or overlap a settled block; nothing else happens.
//! - A rejected drop settles the piece, clears every full row and spawns the
//!   next piece.
//! - A spawn that overlaps the stack overflows the board and loses the game.
//! - Clearing the configured number of rows wins it.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{FixedShapes, GameSession, ShapeKind};
//! use blockfall_core::types::{Command, GameConfig, GameOutcome};
//!
//! let config = GameConfig {
//!     board_width: 4,
//!     board_depth: 4,
//!     spawn_x: 0,
//!     spawn_y: 0,
//!     ..GameConfig::default()
//! };
//! let mut game = GameSession::with_shapes(config, FixedShapes::always(ShapeKind::Square)).unwrap();
//! game.start().unwrap();
//!
//! game.apply(Command::MoveRight).unwrap();
//! let board = game.tick().unwrap();
//!
//! assert!(board.is_filled(1, 1));
//! assert_eq!(game.outcome(), GameOutcome::InProgress);
//! ```

pub mod board;
pub mod controller;
pub mod pieces;
pub mod progress;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod transform;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use controller::{BoardManager, DefaultBoardManager, TurnError, TurnState};
pub use pieces::{FixedShapes, PieceBody, ShapeKind, ShapeSource};
pub use progress::{GameProgress, ProgressSnapshot, Subscription};
pub use rng::{SimpleRng, UniformShapes};
pub use session::GameSession;
pub use snapshot::BoardSnapshot;
pub use transform::{ActivePiece, BoundingBox, DefaultPieceManager, PieceManager, SpawnError};
