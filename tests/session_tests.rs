//! Session tests - assembled games from configuration to end state

use std::cell::Cell;
use std::rc::Rc;

use blockfall::core::{FixedShapes, GameSession, ShapeKind, TurnError};
use blockfall::types::{Command, ConfigError, GameConfig, GameOutcome};

fn config(width: u16, depth: u16, spawn_x: u16, victory_rows: u32) -> GameConfig {
    GameConfig {
        board_width: width,
        board_depth: depth,
        spawn_x,
        spawn_y: 0,
        drop_interval_ms: 1000,
        victory_rows,
    }
}

#[test]
fn test_default_session_starts_with_a_piece() {
    let mut session = GameSession::new(GameConfig::default(), 12345).unwrap();
    let board = session.start().unwrap();
    assert_eq!(board.width(), 9);
    assert_eq!(board.height(), 15);
    assert_eq!(board.occupied_count(), 4);
    assert_eq!(session.outcome(), GameOutcome::InProgress);
}

#[test]
fn test_rejects_invalid_config() {
    let err = GameSession::new(config(4, 4, 4, 10), 1).unwrap_err();
    assert_eq!(
        err,
        ConfigError::SpawnOutsideBoard {
            x: 4,
            y: 0,
            width: 4,
            depth: 4
        }
    );
}

#[test]
fn test_same_seed_plays_the_same_game() {
    let script = [
        Command::MoveLeft,
        Command::RotateRight,
        Command::SoftDrop,
        Command::FlipHorizontal,
        Command::MoveRight,
        Command::RotateLeft,
    ];

    let play = |seed: u32| {
        let mut session = GameSession::new(GameConfig::default(), seed).unwrap();
        session.start().unwrap();
        let mut boards = Vec::new();
        for _ in 0..40 {
            for &command in &script {
                boards.push(session.apply(command).unwrap());
            }
            boards.push(session.tick().unwrap());
        }
        (boards, *session.progress_snapshot())
    };

    assert_eq!(play(7), play(7));
}

#[test]
fn test_loss_when_spawn_is_blocked() {
    // A square fills the whole depth of a 4x2 board, so the second one cannot spawn.
    let mut session =
        GameSession::with_shapes(config(4, 2, 0, 1), FixedShapes::always(ShapeKind::Square))
            .unwrap();
    session.start().unwrap();
    session.tick().unwrap();
    assert_eq!(session.outcome(), GameOutcome::Lost);
}

#[test]
fn test_win_after_clearing_victory_rows() {
    let mut session =
        GameSession::with_shapes(config(4, 2, 2, 1), FixedShapes::always(ShapeKind::Square))
            .unwrap();
    let notified = Rc::new(Cell::new(0));
    let n = Rc::clone(&notified);
    let _sub = session.progress().subscribe(move || n.set(n.get() + 1));

    session.start().unwrap();
    session.apply(Command::MoveLeft).unwrap();
    session.apply(Command::MoveLeft).unwrap();
    // Settles at x=0; the next square spawns at x=2 and completes both rows,
    // which clear when that square settles in turn.
    session.tick().unwrap();
    assert_eq!(session.outcome(), GameOutcome::InProgress);
    session.tick().unwrap();

    assert_eq!(session.progress_snapshot().rows_cleared, 2);
    assert_eq!(session.outcome(), GameOutcome::Won);
    assert_eq!(notified.get(), 2);
}

#[test]
fn test_finished_game_ignores_input() {
    let mut session =
        GameSession::with_shapes(config(4, 4, 0, 10), FixedShapes::always(ShapeKind::Line))
            .unwrap();
    session.start().unwrap();
    session.tick().unwrap();
    assert_eq!(session.outcome(), GameOutcome::Lost);

    let frozen = session.board();
    for command in Command::ALL {
        assert_eq!(session.apply(command).unwrap(), frozen);
    }
    assert_eq!(session.tick().unwrap(), frozen);
}

#[test]
fn test_play_again_resets_board_and_counters() {
    let mut session =
        GameSession::with_shapes(config(4, 4, 0, 10), FixedShapes::always(ShapeKind::Line))
            .unwrap();
    let notified = Rc::new(Cell::new(0));
    let n = Rc::clone(&notified);
    let _sub = session.progress().subscribe(move || n.set(n.get() + 1));

    session.start().unwrap();
    session.tick().unwrap();
    assert!(session.progress_snapshot().is_board_overflown);
    let before = session.board();

    let fresh = session.play_again().unwrap();
    assert!(!session.progress_snapshot().is_board_overflown);
    assert_eq!(session.progress_snapshot().rows_cleared, 0);
    assert_eq!(fresh.occupied_count(), 4);
    assert!(fresh.version() > before.version());
    // Overflow, then reset.
    assert_eq!(notified.get(), 2);
}

#[test]
fn test_spawn_too_close_to_edge_surfaces_on_start() {
    // The spawn point is on the board, but a Z needs three columns from it.
    let mut session =
        GameSession::with_shapes(config(4, 4, 3, 10), FixedShapes::always(ShapeKind::ZShape))
            .unwrap();
    assert!(matches!(
        session.start(),
        Err(TurnError::SpawnOutOfBounds { spawn: (3, 0), .. })
    ));
}
