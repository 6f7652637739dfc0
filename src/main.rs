//! Terminal falling-block game (default binary).
//!
//! Reads the game settings from an optional JSON file and command-line flags,
//! then runs the game in the terminal with crossterm input and the
//! framebuffer renderer. Set `RUST_LOG` and redirect stderr to see the engine's
//! log output.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::core::{GameSession, ProgressSnapshot};
use blockfall::input::{is_play_again, map_key, should_quit, CommandBatch};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// JSON file with game settings; flags below override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board depth in cells.
    #[arg(long)]
    depth: Option<u16>,

    /// Spawn column of a new piece's top-left corner.
    #[arg(long)]
    spawn_x: Option<u16>,

    /// Spawn row of a new piece's top-left corner.
    #[arg(long)]
    spawn_y: Option<u16>,

    /// Milliseconds between automatic drops.
    #[arg(long, value_name = "ms")]
    drop_ms: Option<u32>,

    /// Rows to clear to win.
    #[arg(long)]
    victory_rows: Option<u32>,

    /// Seed for the shape sequence. Defaults to the current time.
    #[arg(long)]
    seed: Option<u32>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(v) = self.width {
            config.board_width = v;
        }
        if let Some(v) = self.depth {
            config.board_depth = v;
        }
        if let Some(v) = self.spawn_x {
            config.spawn_x = v;
        }
        if let Some(v) = self.spawn_y {
            config.spawn_y = v;
        }
        if let Some(v) = self.drop_ms {
            config.drop_interval_ms = v;
        }
        if let Some(v) = self.victory_rows {
            config.victory_rows = v;
        }
        config.validate()?;
        Ok(config)
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.game_config()?;
    let seed = args.seed();
    info!("starting with {:?}, seed {}", config, seed);
    let session = GameSession::new(config, seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let config = *session.config();
    let view = GameView::default().with_target_rows(config.victory_rows);
    let drop_interval = Duration::from_millis(config.drop_interval_ms as u64);

    let mut fb = FrameBuffer::new(0, 0);
    let mut batch = CommandBatch::new();
    let mut drawn: Option<(u64, Rc<ProgressSnapshot>, Viewport)> = None;

    session.start()?;
    let mut next_drop = Instant::now() + drop_interval;

    loop {
        // Render only when something visible changed.
        let board = session.board();
        let progress = session.progress_snapshot();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let stale = match &drawn {
            Some((version, shown, vp)) => {
                *version != board.version() || !Rc::ptr_eq(shown, &progress) || *vp != viewport
            }
            None => true,
        };
        if stale {
            view.render_into(&board, &progress, session.outcome(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            drawn = Some((board.version(), progress, viewport));
        }

        // Wait for input until the next drop, then take everything queued.
        let timeout = next_drop.saturating_duration_since(Instant::now());
        let mut ready = event::poll(timeout)?;
        while ready {
            match handle_event(&mut session, &mut batch, event::read()?)? {
                Flow::Quit => return Ok(()),
                Flow::Restarted => next_drop = Instant::now() + drop_interval,
                Flow::Redraw => term.invalidate(),
                Flow::Continue => {}
            }
            ready = event::poll(Duration::ZERO)?;
        }

        for command in batch.drain() {
            session.apply(command)?;
        }
        if batch.dropped() > 0 {
            warn!("dropped {} key presses", batch.dropped());
            batch.reset_dropped();
        }

        if let Some(next) = tick_due(next_drop, Instant::now(), drop_interval) {
            next_drop = next;
            session.tick()?;
        }
    }
}

/// Deadline for the drop after this one, if a drop is due at `now`.
///
/// Counts from `now` rather than the missed deadline, so a stalled frame
/// yields a single drop.
fn tick_due(deadline: Instant, now: Instant, interval: Duration) -> Option<Instant> {
    (now >= deadline).then(|| now + interval)
}

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
    Restarted,
    Redraw,
}

fn handle_event(session: &mut GameSession, batch: &mut CommandBatch, event: Event) -> Result<Flow> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if should_quit(key) {
                return Ok(Flow::Quit);
            }
            if session.outcome().is_over() {
                if is_play_again(key) {
                    batch.clear();
                    session.play_again()?;
                    return Ok(Flow::Restarted);
                }
            } else if let Some(command) = map_key(key) {
                batch.push(command);
            }
            Ok(Flow::Continue)
        }
        Event::Resize(..) => Ok(Flow::Redraw),
        _ => Ok(Flow::Continue),
    }
}
