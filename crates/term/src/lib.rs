//! Terminal "game renderer" module.
//!
//! Renders the game into a simple framebuffer of styled cells and flushes it to
//! the terminal with crossterm. Board cells are drawn two columns wide to make
//! up for the usual terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
