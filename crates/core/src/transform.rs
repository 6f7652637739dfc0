//! Transform module - pure piece geometry
//!
//! Validates and produces candidate positions for the piece in play. Nothing in
//! this module mutates a board or a piece: every operation takes the current
//! piece by reference and hands back a new one, or `None` when the candidate
//! would leave the board or overlap a settled block.
//!
//! Rotations are built from two primitive reflections, and the body is
//! re-anchored at (0, 0) after *each* primitive so the anchor keeps meaning
//! "top-left corner of the bounding box":
//!
//! - rotate left: reflect over the x axis, then swap axes
//! - rotate right: swap axes, then reflect over the x axis
//! - flip: reflect over the y axis

use log::trace;
use thiserror::Error;

use crate::board::Board;
use crate::pieces::{PieceBody, ShapeSource};
use crate::types::Coordinates;

/// Why a new piece could not be placed at the spawn point.
///
/// The two kinds call for different reactions: `OutOfBounds` means the spawn
/// point does not suit the board, `CollidesWithExisting` means the stack has
/// reached the spawn area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("active piece is out of board bounds right upon init (anchor {anchor:?})")]
    OutOfBounds { anchor: Coordinates },
    #[error("active piece collides with existing blocks right upon init (anchor {anchor:?})")]
    CollidesWithExisting { anchor: Coordinates },
}

/// Absolute extent of a piece on the board (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// The piece the player currently controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    /// Board position of the body's bounding-box top-left corner
    pub anchor: Coordinates,
    pub body: PieceBody,
}

impl ActivePiece {
    pub fn new(anchor: Coordinates, body: PieceBody) -> Self {
        debug_assert!(
            body.iter().all(|&(x, y)| x >= 0 && y >= 0),
            "piece body offsets must not be negative: {:?}",
            body
        );
        Self { anchor, body }
    }

    /// Absolute board coordinates of each block
    pub fn blocks(&self) -> impl Iterator<Item = Coordinates> + '_ {
        let (ax, ay) = self.anchor;
        self.body.iter().map(move |&(dx, dy)| (ax + dx, ay + dy))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let (ax, ay) = self.anchor;
        let mut bb = BoundingBox {
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
        };
        for &(x, y) in &self.body {
            bb.top = bb.top.min(y);
            bb.bottom = bb.bottom.max(y);
            bb.left = bb.left.min(x);
            bb.right = bb.right.max(x);
        }
        BoundingBox {
            top: bb.top + ay,
            bottom: bb.bottom + ay,
            left: bb.left + ax,
            right: bb.right + ax,
        }
    }

    fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: (self.anchor.0 + dx, self.anchor.1 + dy),
            body: self.body,
        }
    }

    fn with_body(&self, body: PieceBody) -> Self {
        Self::new(self.anchor, body)
    }
}

/// Services for creating and moving the piece in play.
///
/// Every method except `create_new_piece` is a pure query against `board`.
/// Callers are expected to erase the current piece from the board first so
/// that it does not collide with itself.
pub trait PieceManager {
    /// Draw a shape and place it with its top-left corner at `anchor`.
    fn create_new_piece(
        &mut self,
        anchor: Coordinates,
        board: &Board,
    ) -> Result<ActivePiece, SpawnError>;

    fn move_left(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;

    fn move_right(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;

    /// One-row drop. `None` ends the piece's turn.
    fn tick_drop(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;

    fn rotate_left(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;

    fn rotate_right(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;

    fn flip_horizontally(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece>;
}

/// Default piece manager, drawing shapes from `S`
#[derive(Debug, Clone)]
pub struct DefaultPieceManager<S> {
    shapes: S,
}

impl<S: ShapeSource> DefaultPieceManager<S> {
    pub fn new(shapes: S) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &S {
        &self.shapes
    }

    pub fn into_shapes(self) -> S {
        self.shapes
    }
}

impl<S: ShapeSource> PieceManager for DefaultPieceManager<S> {
    fn create_new_piece(
        &mut self,
        anchor: Coordinates,
        board: &Board,
    ) -> Result<ActivePiece, SpawnError> {
        let shape = self.shapes.next_shape();
        let piece = ActivePiece::new(anchor, shape.body());
        if !is_within_bounds(&piece, board) {
            return Err(SpawnError::OutOfBounds { anchor });
        }
        if collides_with_existing(&piece, board) {
            return Err(SpawnError::CollidesWithExisting { anchor });
        }
        trace!("created {} piece at {:?}", shape.as_str(), anchor);
        Ok(piece)
    }

    fn move_left(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        allowed(piece.shifted(-1, 0), board)
    }

    fn move_right(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        allowed(piece.shifted(1, 0), board)
    }

    fn tick_drop(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        allowed(piece.shifted(0, 1), board)
    }

    fn rotate_left(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        let body = swap_axes(reflect_over_x(piece.body));
        allowed(piece.with_body(body), board)
    }

    fn rotate_right(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        let body = reflect_over_x(swap_axes(piece.body));
        allowed(piece.with_body(body), board)
    }

    fn flip_horizontally(&self, piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
        allowed(piece.with_body(reflect_over_y(piece.body)), board)
    }
}

fn allowed(piece: ActivePiece, board: &Board) -> Option<ActivePiece> {
    if is_within_bounds(&piece, board) && !collides_with_existing(&piece, board) {
        Some(piece)
    } else {
        trace!("rejected candidate at {:?}", piece.anchor);
        None
    }
}

/// Left, right and bottom edges only: bodies never reach above their anchor,
/// and a piece that cannot fit at the top is reported through collision.
pub fn is_within_bounds(piece: &ActivePiece, board: &Board) -> bool {
    let bb = piece.bounding_box();
    bb.left >= 0 && bb.right < board.width() as i32 && bb.bottom < board.height() as i32
}

/// True when any block lands on a filled cell.
pub fn collides_with_existing(piece: &ActivePiece, board: &Board) -> bool {
    piece.blocks().any(|(x, y)| board.is_occupied(x, y))
}

/// Translate the body so its minimum x and minimum y are 0. Order is kept.
pub fn normalize(body: PieceBody) -> PieceBody {
    let min_x = body.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = body.iter().map(|&(_, y)| y).min().unwrap_or(0);
    body.map(|(x, y)| (x - min_x, y - min_y))
}

/// (x, y) -> (y, x)
pub fn swap_axes(body: PieceBody) -> PieceBody {
    normalize(body.map(|(x, y)| (y, x)))
}

/// (x, y) -> (x, -y)
pub fn reflect_over_x(body: PieceBody) -> PieceBody {
    normalize(body.map(|(x, y)| (x, -y)))
}

/// (x, y) -> (-x, y)
pub fn reflect_over_y(body: PieceBody) -> PieceBody {
    normalize(body.map(|(x, y)| (-x, y)))
}
