//! The session engine — wires the snapshot store to the host's lifecycle.
//!
//! SEQUENCE:
//!   1. Ready      → restore() exactly once, then the autosave clock starts.
//!   2. Advance    → one save_tick() when an autosave period has elapsed.
//!   3. NewLife    → clear(), show the creation panel, game handlers.
//!
//! RULES:
//!   - Nothing is saved before Ready. An unrestored session must never
//!     overwrite the stored save.
//!   - There is no shutdown hook. A save lost at teardown is acceptable.

use crate::{
    clock::AutosaveClock,
    config::SaveConfig,
    event::LifecycleEvent,
    hooks::NewLifeHandlers,
    session::GameSession,
    snapshot_store::{RestoreOutcome, SnapshotStore},
    storage::KeyValueStorage,
    ui::UiSurface,
};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the environment to become ready.
    Uninitialized,
    /// A saved game was loaded.
    Restored,
    /// No usable save; playing a fresh game.
    Empty,
    /// The save was cleared for a new life and nothing has been saved since.
    Cleared,
}

pub struct SessionEngine<S: KeyValueStorage, U: UiSurface> {
    pub session:     GameSession,
    pub ui:          U,
    pub clock:       AutosaveClock,
    store:           SnapshotStore<S>,
    handlers:        NewLifeHandlers,
    phase:           SessionPhase,
    saves_ok:        u64,
    saves_failed:    u64,
}

impl<S: KeyValueStorage, U: UiSurface> SessionEngine<S, U> {
    pub fn new(store: SnapshotStore<S>, ui: U, config: &SaveConfig) -> Self {
        Self {
            session:      GameSession::default(),
            ui,
            clock:        AutosaveClock::new(config.autosave_interval()),
            store,
            handlers:     NewLifeHandlers::new(),
            phase:        SessionPhase::Uninitialized,
            saves_ok:     0,
            saves_failed: 0,
        }
    }

    /// Start from an existing session instead of an empty one.
    pub fn with_session(mut self, session: GameSession) -> Self {
        self.session = session;
        self
    }

    /// Game logic to run on every new life, after the save is cleared.
    pub fn handlers_mut(&mut self) -> &mut NewLifeHandlers {
        &mut self.handlers
    }

    pub fn store(&self) -> &SnapshotStore<S> {
        &self.store
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn saves_ok(&self) -> u64 {
        self.saves_ok
    }

    pub fn saves_failed(&self) -> u64 {
        self.saves_failed
    }

    /// Environment ready. Returns `None` if the session was already
    /// initialized, in which case nothing happens.
    pub fn on_ready(&mut self) -> Option<RestoreOutcome> {
        if self.phase != SessionPhase::Uninitialized {
            log::warn!("ready event ignored: session already initialized ({:?})", self.phase);
            return None;
        }
        let outcome = self.store.restore(&mut self.session, &mut self.ui);
        self.phase = match outcome {
            RestoreOutcome::Restored { .. } => SessionPhase::Restored,
            RestoreOutcome::NoSnapshot      => SessionPhase::Empty,
        };
        self.clock.resume();
        Some(outcome)
    }

    /// Feed elapsed time and autosave if at least one period came due.
    /// Returns the number of periods that elapsed.
    ///
    /// Periods that pile up inside one call collapse into a single save:
    /// the session cannot change between them, so every extra save would
    /// write the same document.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let due = self.clock.advance(elapsed);
        if due == 0 {
            return 0;
        }
        if self.store.save_tick(&self.session, &self.ui) {
            self.saves_ok += 1;
            if self.phase == SessionPhase::Cleared {
                self.phase = SessionPhase::Empty;
            }
        } else {
            self.saves_failed += 1;
        }
        due
    }

    /// Begin a new playthrough.
    pub fn on_new_life(&mut self) {
        self.store.begin_new_life(&mut self.session, &mut self.ui, &mut self.handlers);
        // Before Ready the save is gone either way; Ready still restores (to Empty).
        if self.phase != SessionPhase::Uninitialized {
            self.phase = SessionPhase::Cleared;
        }
    }

    /// Route one lifecycle event.
    pub fn dispatch(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Ready => {
                self.on_ready();
            }
            LifecycleEvent::Advance { elapsed_ms } => {
                self.advance(Duration::from_millis(elapsed_ms));
            }
            LifecycleEvent::NewLife => self.on_new_life(),
        }
    }
}
