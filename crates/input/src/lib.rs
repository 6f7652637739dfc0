//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`] and buffers the
//! resulting commands between frames. Holds no game state.

pub mod batch;
pub mod map;

pub use blockfall_types as types;

pub use batch::{CommandBatch, BATCH_CAPACITY};
pub use map::{is_play_again, map_key, should_quit};
