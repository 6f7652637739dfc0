//! Pieces module - the piece catalog
//!
//! Every shape is four blocks given as offsets from the top-left corner of the
//! shape's bounding box, so the minimum x and the minimum y are always 0.
//! Offsets are array-index style: x grows right, y grows down.

use crate::types::Coordinates;

/// Offsets of the four blocks making up a piece
pub type PieceBody = [Coordinates; 4];

/// The five shapes available in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Square,
    Line,
    LShape,
    ZShape,
    TShape,
}

impl ShapeKind {
    /// Every shape, in catalog order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Square,
        ShapeKind::Line,
        ShapeKind::LShape,
        ShapeKind::ZShape,
        ShapeKind::TShape,
    ];

    /// Block offsets of the shape in its spawn orientation
    pub fn body(&self) -> PieceBody {
        match self {
            // ##
            // ##
            ShapeKind::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
            // vertical bar
            ShapeKind::Line => [(0, 0), (0, 1), (0, 2), (0, 3)],
            // #
            // #
            // ##
            ShapeKind::LShape => [(0, 0), (0, 1), (0, 2), (1, 2)],
            // ##
            //  ##
            ShapeKind::ZShape => [(0, 0), (1, 0), (1, 1), (2, 1)],
            // ###
            //  #
            ShapeKind::TShape => [(0, 0), (1, 0), (1, 1), (2, 0)],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
            ShapeKind::LShape => "l",
            ShapeKind::ZShape => "z",
            ShapeKind::TShape => "t",
        }
    }
}

/// Supplies the shape for each new piece.
///
/// The production source draws uniformly at random; tests inject a fixed
/// sequence so boards are reproducible.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

/// Deterministic source that cycles through a fixed list of shapes
#[derive(Debug, Clone)]
pub struct FixedShapes {
    shapes: Vec<ShapeKind>,
    next: usize,
}

impl FixedShapes {
    /// Cycle through `shapes` in order
    ///
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        assert!(!shapes.is_empty(), "FixedShapes needs at least one shape");
        Self { shapes, next: 0 }
    }

    /// Always hand out the same shape
    pub fn always(shape: ShapeKind) -> Self {
        Self::new(vec![shape])
    }
}

impl ShapeSource for FixedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}
