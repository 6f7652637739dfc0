//! Controller module - the per-turn state machine
//!
//! [`DefaultBoardManager`] owns the board and the piece in play. Every command
//! follows the same protocol: erase the current piece, ask the
//! [`PieceManager`] for a candidate, then paint either the candidate or the
//! original piece back. A rejected command therefore leaves the board exactly
//! as it was.
//!
//! A rejected drop settles the piece: full rows are removed (rows above fall
//! by one, a blank row enters at the top), each removed row bumps the shared
//! rows-cleared counter, and the next piece is spawned in the same call.

use std::rc::Rc;

use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::board::Board;
use crate::pieces::ShapeSource;
use crate::progress::GameProgress;
use crate::snapshot::BoardSnapshot;
use crate::transform::{ActivePiece, DefaultPieceManager, PieceManager, SpawnError};
use crate::types::Coordinates;

/// Faults the turn controller cannot recover from by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error(
        "new piece is out of bounds on init at spawn point {spawn:?} on a {width}x{height} board; reconfigure the spawn point"
    )]
    SpawnOutOfBounds {
        spawn: Coordinates,
        width: usize,
        height: usize,
    },
}

/// Where the controller is in a piece's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No piece in play: before the first turn, or after a settle whose
    /// respawn failed. Commands are no-ops.
    Idle,
    /// A piece is in play and commands apply to it.
    Active(ActivePiece),
    /// The last spawn collided with the stack. Commands are no-ops.
    Overflowed,
}

/// Operations for running turns on a board.
///
/// Each operation returns the board as it stands afterwards.
pub trait BoardManager {
    /// Spawn a new piece at the spawn point. Call at the start of every turn.
    fn init_turn(&mut self) -> Result<BoardSnapshot, TurnError>;

    fn move_piece_left(&mut self) -> BoardSnapshot;

    fn move_piece_right(&mut self) -> BoardSnapshot;

    fn rotate_left(&mut self) -> BoardSnapshot;

    fn rotate_right(&mut self) -> BoardSnapshot;

    fn flip_horizontally(&mut self) -> BoardSnapshot;

    /// Drop the piece one row, settling it and starting the next turn when it
    /// cannot fall further.
    fn tick_drop(&mut self) -> Result<BoardSnapshot, TurnError>;
}

/// Result of routing one command through the erase/ask/paint protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    NoPiece,
    Moved,
    Rejected,
}

/// Default board manager
#[derive(Debug)]
pub struct DefaultBoardManager<M> {
    pieces: M,
    board: Board,
    spawn_point: Coordinates,
    state: TurnState,
    progress: Rc<GameProgress>,
    version: u64,
}

impl<S: ShapeSource> DefaultBoardManager<DefaultPieceManager<S>> {
    /// Board manager using the default piece manager over `shapes`
    pub fn with_shapes(
        board: Board,
        spawn_point: Coordinates,
        progress: Rc<GameProgress>,
        shapes: S,
    ) -> Self {
        Self::new(board, spawn_point, progress, DefaultPieceManager::new(shapes))
    }
}

impl<M: PieceManager> DefaultBoardManager<M> {
    pub fn new(
        board: Board,
        spawn_point: Coordinates,
        progress: Rc<GameProgress>,
        pieces: M,
    ) -> Self {
        Self {
            pieces,
            board,
            spawn_point,
            state: TurnState::Idle,
            progress,
            version: 0,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        match &self.state {
            TurnState::Active(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn spawn_point(&self) -> Coordinates {
        self.spawn_point
    }

    pub fn progress(&self) -> &Rc<GameProgress> {
        &self.progress
    }

    /// Version of the grid as last handed out
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(&self.board, self.version)
    }

    pub fn into_piece_manager(self) -> M {
        self.pieces
    }

    /// Swap in a fresh board and go back to `Idle`, keeping the piece manager.
    /// The version keeps counting up so consumers see the new grid.
    pub fn reset(&mut self, board: Board) {
        self.board = board;
        self.state = TurnState::Idle;
        self.version += 1;
    }

    fn paint(&mut self, piece: &ActivePiece, filled: bool) {
        for (x, y) in piece.blocks() {
            self.board.set(x, y, filled);
        }
    }

    fn update_active_piece<F>(&mut self, action: F) -> Step
    where
        F: FnOnce(&M, &ActivePiece, &Board) -> Option<ActivePiece>,
    {
        let TurnState::Active(current) = self.state else {
            trace!("command ignored in {:?}", self.state);
            return Step::NoPiece;
        };

        self.paint(&current, false);
        match action(&self.pieces, &current, &self.board) {
            Some(next) => {
                self.paint(&next, true);
                self.state = TurnState::Active(next);
                self.version += 1;
                Step::Moved
            }
            None => {
                self.paint(&current, true);
                Step::Rejected
            }
        }
    }

    fn spawn(&mut self) -> Result<(), TurnError> {
        match self.pieces.create_new_piece(self.spawn_point, &self.board) {
            Ok(piece) => {
                self.paint(&piece, true);
                self.state = TurnState::Active(piece);
                self.version += 1;
                debug!("spawned piece {:?} at {:?}", piece.body, piece.anchor);
                Ok(())
            }
            Err(SpawnError::OutOfBounds { anchor }) => Err(TurnError::SpawnOutOfBounds {
                spawn: anchor,
                width: self.board.width(),
                height: self.board.height(),
            }),
            Err(SpawnError::CollidesWithExisting { anchor }) => {
                info!("board overflowed: no room to spawn at {:?}", anchor);
                self.state = TurnState::Overflowed;
                self.progress.set_board_overflowed(true);
                Ok(())
            }
        }
    }

    /// Settle the current piece, clear full rows and start the next turn.
    fn update_turn(&mut self) -> Result<(), TurnError> {
        if let TurnState::Active(piece) = self.state {
            debug!("piece settled at {:?}", piece.anchor);
        }
        self.state = TurnState::Idle;

        let full_rows = self.board.full_rows();
        for &y in &full_rows {
            self.board.clear_row(y);
            self.progress.increment_rows_cleared(1);
        }
        if !full_rows.is_empty() {
            self.version += 1;
            info!("cleared {} row(s): {:?}", full_rows.len(), full_rows);
        }

        self.spawn()
    }
}

impl<M: PieceManager> BoardManager for DefaultBoardManager<M> {
    fn init_turn(&mut self) -> Result<BoardSnapshot, TurnError> {
        if let TurnState::Active(piece) = self.state {
            warn!(
                "init_turn while a piece is in play; leaving it settled at {:?}",
                piece.anchor
            );
        }
        self.spawn()?;
        Ok(self.snapshot())
    }

    fn move_piece_left(&mut self) -> BoardSnapshot {
        self.update_active_piece(M::move_left);
        self.snapshot()
    }

    fn move_piece_right(&mut self) -> BoardSnapshot {
        self.update_active_piece(M::move_right);
        self.snapshot()
    }

    fn rotate_left(&mut self) -> BoardSnapshot {
        self.update_active_piece(M::rotate_left);
        self.snapshot()
    }

    fn rotate_right(&mut self) -> BoardSnapshot {
        self.update_active_piece(M::rotate_right);
        self.snapshot()
    }

    fn flip_horizontally(&mut self) -> BoardSnapshot {
        self.update_active_piece(M::flip_horizontally);
        self.snapshot()
    }

    fn tick_drop(&mut self) -> Result<BoardSnapshot, TurnError> {
        if self.update_active_piece(M::tick_drop) == Step::Rejected {
            self.update_turn()?;
        }
        Ok(self.snapshot())
    }
}
