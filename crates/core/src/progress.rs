//! Progress module - rows cleared and overflow, with change notification
//!
//! [`GameProgress`] is the shared context the turn controller writes and the
//! presentation layer reads. It is created once by whoever assembles the game
//! and handed out as `Rc<GameProgress>`; there is no global instance.
//!
//! Readers either poll [`GameProgress::get_snapshot`] or subscribe a callback
//! that runs synchronously after every change, in subscription order.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::types::GameOutcome;

/// Immutable view of the progress counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ProgressSnapshot {
    pub rows_cleared: u32,
    pub is_board_overflown: bool,
}

impl ProgressSnapshot {
    /// Derive the end-of-game status. An overflow loses even if the victory
    /// threshold was also reached.
    pub fn outcome(&self, victory_rows: u32) -> GameOutcome {
        if self.is_board_overflown {
            GameOutcome::Lost
        } else if self.rows_cleared >= victory_rows {
            GameOutcome::Won
        } else {
            GameOutcome::InProgress
        }
    }
}

type Listener = Rc<dyn Fn()>;

/// Rows-cleared counter and overflow flag for one game at a time
pub struct GameProgress {
    state: Cell<ProgressSnapshot>,
    cached: RefCell<Rc<ProgressSnapshot>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
}

impl GameProgress {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: Cell::new(ProgressSnapshot::default()),
            cached: RefCell::new(Rc::new(ProgressSnapshot::default())),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
        })
    }

    /// Register `listener` to run after every state change.
    pub fn subscribe(self: &Rc<Self>, listener: impl Fn() + 'static) -> Subscription {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        Subscription {
            id,
            progress: Rc::downgrade(self),
        }
    }

    /// Current counters.
    ///
    /// Returns the same `Rc` until the state changes, so callers can skip work
    /// with `Rc::ptr_eq`.
    pub fn get_snapshot(&self) -> Rc<ProgressSnapshot> {
        let current = self.state.get();
        let mut cached = self.cached.borrow_mut();
        if **cached != current {
            *cached = Rc::new(current);
        }
        Rc::clone(&*cached)
    }

    pub fn rows_cleared(&self) -> u32 {
        self.state.get().rows_cleared
    }

    pub fn is_board_overflown(&self) -> bool {
        self.state.get().is_board_overflown
    }

    pub fn increment_rows_cleared(&self, rows: u32) {
        let mut state = self.state.get();
        state.rows_cleared = state.rows_cleared.saturating_add(rows);
        self.state.set(state);
        self.notify_listeners();
    }

    pub fn set_board_overflowed(&self, overflown: bool) {
        let mut state = self.state.get();
        state.is_board_overflown = overflown;
        self.state.set(state);
        self.notify_listeners();
    }

    /// Back to zero rows and no overflow, for a new game.
    pub fn reset_game_state(&self) {
        self.state.set(ProgressSnapshot::default());
        self.notify_listeners();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn notify_listeners(&self) {
        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for GameProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameProgress")
            .field("state", &self.state.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle returned by [`GameProgress::subscribe`].
///
/// Dropping the handle keeps the listener registered.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    progress: Weak<GameProgress>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(progress) = self.progress.upgrade() {
            progress.unsubscribe(self.id);
        }
    }
}
