//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
///
/// Letters follow the home-row layout: `a`/`s`/`d` move the piece,
/// `j`/`k`/`l` rotate left, flip and rotate right. Arrow keys are kept as
/// an alternative for movement, with `Up` rotating right.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::RotateLeft),
        KeyCode::Up | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::RotateRight),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::FlipHorizontal),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key asks for a new game from the end screen.
pub fn is_play_again(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
    )
}
