//! Session module - one assembled game
//!
//! Owns the configuration, the shared [`GameProgress`] context and the turn
//! controller, and routes [`Command`]s to the controller one-to-one. This is
//! the layer an input shell and a timer talk to.

use std::rc::Rc;

use log::info;

use crate::board::Board;
use crate::controller::{BoardManager, DefaultBoardManager, TurnError};
use crate::pieces::ShapeSource;
use crate::progress::{GameProgress, ProgressSnapshot};
use crate::rng::UniformShapes;
use crate::snapshot::BoardSnapshot;
use crate::transform::DefaultPieceManager;
use crate::types::{Command, ConfigError, GameConfig, GameOutcome};

type Controller<S> = DefaultBoardManager<DefaultPieceManager<S>>;

/// A game wired from a [`GameConfig`]
#[derive(Debug)]
pub struct GameSession<S: ShapeSource = UniformShapes> {
    config: GameConfig,
    progress: Rc<GameProgress>,
    controller: Controller<S>,
}

impl GameSession<UniformShapes> {
    /// Session drawing shapes uniformly at random from `seed`
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_shapes(config, UniformShapes::new(seed))
    }
}

impl<S: ShapeSource> GameSession<S> {
    pub fn with_shapes(config: GameConfig, shapes: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let progress = GameProgress::new();
        let controller = DefaultBoardManager::with_shapes(
            empty_board(&config),
            config.spawn_point(),
            Rc::clone(&progress),
            shapes,
        );
        Ok(Self {
            config,
            progress,
            controller,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared progress context, for subscribing to changes
    pub fn progress(&self) -> &Rc<GameProgress> {
        &self.progress
    }

    pub fn progress_snapshot(&self) -> Rc<ProgressSnapshot> {
        self.progress.get_snapshot()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.progress.get_snapshot().outcome(self.config.victory_rows)
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub fn board(&self) -> BoardSnapshot {
        self.controller.snapshot()
    }

    /// Spawn the first piece
    pub fn start(&mut self) -> Result<BoardSnapshot, TurnError> {
        self.controller.init_turn()
    }

    /// Apply one input command. Ignored once the game is won or lost.
    pub fn apply(&mut self, command: Command) -> Result<BoardSnapshot, TurnError> {
        if self.outcome().is_over() {
            return Ok(self.board());
        }

        let controller = &mut self.controller;
        let snapshot = match command {
            Command::MoveLeft => controller.move_piece_left(),
            Command::MoveRight => controller.move_piece_right(),
            Command::SoftDrop => controller.tick_drop()?,
            Command::RotateLeft => controller.rotate_left(),
            Command::RotateRight => controller.rotate_right(),
            Command::FlipHorizontal => controller.flip_horizontally(),
        };
        Ok(snapshot)
    }

    /// Timer-driven drop. Ignored once the game is won or lost.
    pub fn tick(&mut self) -> Result<BoardSnapshot, TurnError> {
        self.apply(Command::SoftDrop)
    }

    /// Reset the counters, clear the board and spawn the first piece of a new
    /// game. Subscribers stay registered and the shape sequence carries on.
    pub fn play_again(&mut self) -> Result<BoardSnapshot, TurnError> {
        self.progress.reset_game_state();
        self.controller.reset(empty_board(&self.config));
        info!("starting a new game");
        self.start()
    }
}

fn empty_board(config: &GameConfig) -> Board {
    Board::new(config.board_width as usize, config.board_depth as usize)
}
