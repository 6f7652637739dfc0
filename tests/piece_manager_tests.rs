//! Piece manager tests - creation, movement, rotation and flip validation

use blockfall::core::{
    ActivePiece, Board, DefaultPieceManager, FixedShapes, PieceManager, ShapeKind, SpawnError,
};

const F: bool = false;
const T: bool = true;

fn manager(shape: ShapeKind) -> DefaultPieceManager<FixedShapes> {
    DefaultPieceManager::new(FixedShapes::always(shape))
}

fn empty() -> Board {
    Board::new(4, 4)
}

fn right_column_filled() -> Board {
    Board::from_rows(vec![vec![F, F, F, T]; 4]).unwrap()
}

const SQUARE: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const L_SHAPE: [(i32, i32); 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];

#[test]
fn test_create_at_given_anchor() {
    let mut pm = manager(ShapeKind::Square);
    let piece = pm.create_new_piece((0, 1), &empty()).unwrap();
    assert_eq!(piece, ActivePiece::new((0, 1), SQUARE));
}

#[test]
fn test_create_out_of_bounds() {
    let mut pm = manager(ShapeKind::Square);
    assert_eq!(
        pm.create_new_piece((3, 0), &empty()),
        Err(SpawnError::OutOfBounds { anchor: (3, 0) })
    );
}

#[test]
fn test_create_colliding_with_existing() {
    let mut pm = manager(ShapeKind::Square);
    assert_eq!(
        pm.create_new_piece((2, 0), &right_column_filled()),
        Err(SpawnError::CollidesWithExisting { anchor: (2, 0) })
    );
}

#[test]
fn test_spawn_errors_have_distinct_messages() {
    let oob = SpawnError::OutOfBounds { anchor: (3, 0) }.to_string();
    let collides = SpawnError::CollidesWithExisting { anchor: (3, 0) }.to_string();
    assert!(oob.contains("out of board bounds"));
    assert!(collides.contains("collides with existing"));
}

#[test]
fn test_move_left() {
    let board = empty();
    let mut pm = manager(ShapeKind::Square);

    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(
        pm.move_left(&piece, &board),
        Some(ActivePiece::new((0, 0), SQUARE))
    );

    let at_wall = pm.create_new_piece((0, 0), &board).unwrap();
    assert_eq!(pm.move_left(&at_wall, &board), None);
}

#[test]
fn test_move_right() {
    let board = empty();
    let mut pm = manager(ShapeKind::Square);

    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(
        pm.move_right(&piece, &board),
        Some(ActivePiece::new((2, 0), SQUARE))
    );

    let at_wall = pm.create_new_piece((2, 0), &board).unwrap();
    assert_eq!(pm.move_right(&at_wall, &board), None);
}

#[test]
fn test_tick_drop() {
    let mut pm = manager(ShapeKind::Square);

    let board = empty();
    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(
        pm.tick_drop(&piece, &board),
        Some(ActivePiece::new((1, 1), SQUARE))
    );

    let floor = Board::from_rows(vec![vec![F; 4], vec![F; 4], vec![F; 4], vec![T; 4]]).unwrap();
    let resting = pm.create_new_piece((1, 1), &floor).unwrap();
    assert_eq!(pm.tick_drop(&resting, &floor), None);
}

#[test]
fn test_flip_horizontally() {
    let mut pm = manager(ShapeKind::LShape);

    let board = empty();
    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(piece.body, L_SHAPE);
    assert_eq!(
        pm.flip_horizontally(&piece, &board),
        Some(ActivePiece::new((1, 0), [(1, 0), (1, 1), (1, 2), (0, 2)]))
    );

    let blocked = Board::from_rows(vec![
        vec![F, F, T, T],
        vec![F, F, T, T],
        vec![F, F, F, T],
        vec![F, F, F, T],
    ])
    .unwrap();
    let piece = pm.create_new_piece((1, 0), &blocked).unwrap();
    assert_eq!(pm.flip_horizontally(&piece, &blocked), None);
}

#[test]
fn test_rotate_left() {
    let mut pm = manager(ShapeKind::LShape);
    let board = empty();

    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(
        pm.rotate_left(&piece, &board),
        Some(ActivePiece::new((1, 0), [(2, 0), (1, 0), (0, 0), (0, 1)]))
    );

    // Three columns wide from x=2 runs off a four-column board.
    let piece = pm.create_new_piece((2, 0), &board).unwrap();
    assert_eq!(pm.rotate_left(&piece, &board), None);
}

#[test]
fn test_rotate_right() {
    let mut pm = manager(ShapeKind::LShape);

    let board = empty();
    let piece = pm.create_new_piece((1, 0), &board).unwrap();
    assert_eq!(
        pm.rotate_right(&piece, &board),
        Some(ActivePiece::new((1, 0), [(0, 1), (1, 1), (2, 1), (2, 0)]))
    );

    let blocked = right_column_filled();
    let piece = pm.create_new_piece((1, 0), &blocked).unwrap();
    assert_eq!(pm.rotate_right(&piece, &blocked), None);
}

#[test]
fn test_every_transform_keeps_body_at_origin() {
    let board = Board::new(8, 8);
    for shape in ShapeKind::ALL {
        let mut pm = manager(shape);
        let piece = pm.create_new_piece((2, 2), &board).unwrap();
        let candidates = [
            pm.rotate_left(&piece, &board),
            pm.rotate_right(&piece, &board),
            pm.flip_horizontally(&piece, &board),
            pm.move_left(&piece, &board),
            pm.move_right(&piece, &board),
            pm.tick_drop(&piece, &board),
        ];
        for candidate in candidates.into_iter().flatten() {
            let min_x = candidate.body.iter().map(|&(x, _)| x).min();
            let min_y = candidate.body.iter().map(|&(_, y)| y).min();
            assert_eq!((min_x, min_y), (Some(0), Some(0)), "{:?}", shape);
        }
    }
}

#[test]
fn test_rotation_round_trip_restores_body_set() {
    let board = Board::new(6, 6);
    let mut pm = manager(ShapeKind::LShape);
    let piece = pm.create_new_piece((1, 1), &board).unwrap();

    let mut original = piece.body.to_vec();
    original.sort();

    let right_then_left = pm
        .rotate_left(&pm.rotate_right(&piece, &board).unwrap(), &board)
        .unwrap();
    let mut restored = right_then_left.body.to_vec();
    restored.sort();
    assert_eq!(restored, original);
}

#[test]
fn test_four_rotations_return_to_start() {
    let board = Board::new(8, 8);
    for shape in ShapeKind::ALL {
        let mut pm = manager(shape);
        let start = pm.create_new_piece((2, 2), &board).unwrap();
        let mut piece = start;
        for _ in 0..4 {
            piece = pm.rotate_right(&piece, &board).unwrap();
        }
        let mut a = start.body.to_vec();
        let mut b = piece.body.to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b, "{:?}", shape);
    }
}
