//! GameView: maps a board snapshot and the progress counters into a terminal
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{BoardSnapshot, ProgressSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::GameOutcome;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const BLOCK_FG: Rgb = Rgb::new(80, 220, 220);
const PANEL_MIN_WIDTH: u16 = 10;

/// Stateless terminal view of one game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Shown next to the rows counter when set.
    target_rows: Option<u32>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            target_rows: None,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_target_rows(mut self, rows: u32) -> Self {
        self.target_rows = Some(rows);
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        board: &BoardSnapshot,
        progress: &ProgressSnapshot,
        outcome: GameOutcome,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = u16::try_from(board.width()).unwrap_or(u16::MAX);
        let board_h = u16::try_from(board.height()).unwrap_or(u16::MAX);
        let frame_w = board_w.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = board_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let filled = CellStyle::new(BLOCK_FG, PLAY_BG).bold();
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        // Boards larger than the viewport are cut off at its edges.
        for y in 0..board_h {
            let py = start_y.saturating_add(1).saturating_add(y);
            if py >= viewport.height {
                break;
            }
            for x in 0..board_w {
                let px = start_x
                    .saturating_add(1)
                    .saturating_add(x.saturating_mul(self.cell_w));
                if px >= viewport.width {
                    break;
                }
                let (ch, style) = if board.is_filled(x as usize, y as usize) {
                    ('█', filled)
                } else {
                    ('·', empty)
                };
                fb.fill_rect(px, py, self.cell_w, 1, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, progress, viewport, panel_x, start_y);

        let banner = match outcome {
            GameOutcome::InProgress => None,
            GameOutcome::Won => Some("YOU WON!"),
            GameOutcome::Lost => Some("GAME OVER"),
        };
        if let Some(text) = banner {
            let mid_y = start_y.saturating_add(frame_h / 2);
            let title = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            let hint = CellStyle::default().dim();
            self.draw_centered(fb, start_x, frame_w, mid_y.saturating_sub(1), text, title);
            self.draw_centered(fb, start_x, frame_w, mid_y, "r: play again", hint);
            let quit_y = mid_y.saturating_add(1);
            self.draw_centered(fb, start_x, frame_w, quit_y, "q: quit", hint);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        board: &BoardSnapshot,
        progress: &ProgressSnapshot,
        outcome: GameOutcome,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, progress, outcome, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        // Sides past the framebuffer edge are clipped anyway.
        let w = w.min(fb.width().saturating_sub(x).saturating_add(1));
        let h = h.min(fb.height().saturating_sub(y).saturating_add(1));
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(right, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        progress: &ProgressSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "ROWS", label);
        y += 1;
        let digits = fb.put_u32(panel_x, y, progress.rows_cleared, value);
        if let Some(target) = self.target_rows {
            fb.put_char(panel_x + digits, y, '/', help);
            fb.put_u32(panel_x + digits + 1, y, target, help);
        }
        y += 2;

        for line in ["a d  move", "s    drop", "j l  rotate", "k    flip", "q    quit"] {
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_centered(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        frame_w: u16,
        y: u16,
        text: &str,
        style: CellStyle,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}
