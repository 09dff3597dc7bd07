//! The state snapshot store — capture, persist, restore, clear.
//!
//! RULES:
//!   - Nothing in here propagates an error or panic to the caller.
//!     Every failure becomes a log line and a degraded outcome.
//!   - A restore either applies a whole document or touches nothing.
//!     UI surfaces and refresh hooks run behind `catch_unwind`.
//!   - Revived entities are built with `Person::revive`; the raw records
//!     are consumed in the process and cannot be held onto.

use crate::{
    config::SaveConfig,
    error::{SaveError, SaveResult},
    hooks::{NewLifeHandlers, RefreshHooks},
    person::Person,
    session::GameSession,
    snapshot::SnapshotDocument,
    storage::KeyValueStorage,
    types::{DEFAULT_MONEY_TEXT, STORAGE_KEY},
    ui::{UiSurface, MONEY_ELEMENT, STORY_ELEMENT},
};
use std::panic::{self, AssertUnwindSafe};

/// Result of a restore attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing usable was stored. The session was left untouched.
    NoSnapshot,
    /// A snapshot was applied to the session.
    Restored { companions: usize },
}

pub struct SnapshotStore<S: KeyValueStorage> {
    storage:            S,
    key:                String,
    default_money_text: String,
    hooks:              Option<RefreshHooks>,
}

impl<S: KeyValueStorage> SnapshotStore<S> {
    /// A store on the default key with no refresh hooks.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: STORAGE_KEY.to_string(),
            default_money_text: DEFAULT_MONEY_TEXT.to_string(),
            hooks: None,
        }
    }

    pub fn from_config(storage: S, config: &SaveConfig) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            default_money_text: config.default_money_text.clone(),
            hooks: None,
        }
    }

    pub fn with_hooks(mut self, hooks: RefreshHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn hooks(&self) -> Option<&RefreshHooks> {
        self.hooks.as_ref()
    }

    /// Whether a document is currently stored. Storage errors read as false.
    pub fn has_snapshot(&self) -> bool {
        matches!(self.storage.get(&self.key), Ok(Some(text)) if !text.is_empty())
    }

    // ── Capture ────────────────────────────────────────────────

    /// Build a snapshot of the session and the current UI text.
    ///
    /// Missing, empty or failing UI sources fall back to the default money
    /// text and an empty story. A UI surface that panics yields `None`.
    pub fn capture(&self, session: &GameSession, ui: &dyn UiSurface) -> Option<SnapshotDocument> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.build_document(session, ui)));
        match result {
            Ok(doc) => Some(doc),
            Err(_) => {
                log::error!("Failed to capture game state: UI surface panicked");
                None
            }
        }
    }

    fn build_document(&self, session: &GameSession, ui: &dyn UiSurface) -> SnapshotDocument {
        let money = ui_text_or_default(MONEY_ELEMENT, ui.money_text(), &self.default_money_text);
        let story = ui_text_or_default(STORY_ELEMENT, ui.story_markup(), "");

        SnapshotDocument {
            player:               session.player.to_record(),
            companions:           session.companions.iter().map(Person::to_record).collect(),
            year:                 session.year,
            age:                  session.age,
            money,
            story,
            create_panel_visible: ui.create_panel_visible().unwrap_or(false),
        }
    }

    // ── Persist ────────────────────────────────────────────────

    /// Write the document under the store's key. Returns false on failure;
    /// the next autosave tick is the retry.
    pub fn persist(&mut self, doc: &SnapshotDocument) -> bool {
        match self.try_persist(doc) {
            Ok(bytes) => {
                log::debug!("Game saved: key={} bytes={bytes}", self.key);
                true
            }
            Err(e) => {
                log::error!("Failed to save game: {e}");
                false
            }
        }
    }

    fn try_persist(&mut self, doc: &SnapshotDocument) -> SaveResult<usize> {
        let json = doc.to_json()?;
        self.storage.set(&self.key, &json)?;
        Ok(json.len())
    }

    /// capture() + persist(), as run on every autosave tick.
    pub fn save_tick(&mut self, session: &GameSession, ui: &dyn UiSurface) -> bool {
        match self.capture(session, ui) {
            Some(doc) => self.persist(&doc),
            None => false,
        }
    }

    // ── Restore ────────────────────────────────────────────────

    /// Load the stored document and apply it to the session.
    ///
    /// On `NoSnapshot` the session is not touched and the creation panel
    /// is shown, so the game starts fresh.
    pub fn restore(&mut self, session: &mut GameSession, ui: &mut dyn UiSurface) -> RestoreOutcome {
        let doc = match self.load_document() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                log::info!("No saved game under '{}'", self.key);
                ui.set_create_panel_visible(true);
                return RestoreOutcome::NoSnapshot;
            }
            Err(e) => {
                log::error!("Failed to load game: {e}");
                ui.set_create_panel_visible(true);
                return RestoreOutcome::NoSnapshot;
            }
        };

        let default_money = self.default_money_text.as_str();
        let applied = panic::catch_unwind(AssertUnwindSafe(|| {
            apply_document(doc, &mut *ui, default_money)
        }));
        let revived = match applied {
            Ok(revived) => revived,
            Err(_) => {
                log::error!("Failed to load game: UI surface panicked while restoring");
                return RestoreOutcome::NoSnapshot;
            }
        };
        *session = revived;
        let companions = session.companions.len();

        let hooks_ok = panic::catch_unwind(AssertUnwindSafe(|| self.fire_hooks(session))).is_ok();
        if !hooks_ok {
            log::error!("A refresh hook panicked after restore; game state was still loaded");
        }

        log::info!(
            "Game loaded and resumed: year={} age={} companions={companions}",
            session.year,
            session.age
        );
        RestoreOutcome::Restored { companions }
    }

    fn load_document(&self) -> SaveResult<Option<SnapshotDocument>> {
        let Some(text) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(None);
        }
        SnapshotDocument::from_json(&text)
            .map(Some)
            .map_err(SaveError::from)
    }

    fn fire_hooks(&mut self, session: &mut GameSession) {
        let Some(hooks) = self.hooks.as_mut() else {
            return;
        };
        if let Some(hook) = hooks.update_stats_ui.as_mut() {
            hook(&session.player.stats);
        }
        if let Some(hook) = hooks.handle_stat_bars.as_mut() {
            hook(&session.player, true);
        }
        if let Some(hook) = hooks.life_stage_displayer.as_mut() {
            hook(session.age);
        }
        if let Some(hook) = hooks.money_viewer.as_mut() {
            hook(&session.player.money);
        }
        if let Some(hook) = hooks.job_assigner.as_mut() {
            hook(session.companions.as_mut_slice());
        }
    }

    // ── Clear ──────────────────────────────────────────────────

    /// Remove the stored document. An absent key is fine.
    pub fn clear(&mut self) -> bool {
        match self.storage.remove(&self.key) {
            Ok(()) => {
                log::info!("Saved game cleared");
                true
            }
            Err(e) => {
                log::error!("Failed to clear saved game: {e}");
                false
            }
        }
    }

    /// Start a new playthrough: clear the save, show the creation panel,
    /// then run the game's own new-life handlers in order.
    pub fn begin_new_life(
        &mut self,
        session: &mut GameSession,
        ui: &mut dyn UiSurface,
        handlers: &mut NewLifeHandlers,
    ) {
        self.clear();
        if !ui.set_create_panel_visible(true) {
            log::debug!("new life: no character-creation panel to show");
        }
        handlers.run_all(session);
    }
}

fn ui_text_or_default(element: &str, read: SaveResult<Option<String>>, default: &str) -> String {
    match read {
        Ok(Some(text)) if !text.is_empty() => text,
        Ok(Some(_)) => {
            log::debug!("UI element '{element}' empty, using default");
            default.to_string()
        }
        Ok(None) => {
            log::debug!("UI element '{element}' absent, using default");
            default.to_string()
        }
        Err(e) => {
            log::warn!("Reading UI element '{element}' failed, using default: {e}");
            default.to_string()
        }
    }
}

/// Revive the document into a fresh session and push the UI text back out.
/// The caller's session is only replaced once this has returned.
fn apply_document(doc: SnapshotDocument, ui: &mut dyn UiSurface, default_money: &str) -> GameSession {
    let SnapshotDocument { player, companions, year, age, money, story, create_panel_visible } = doc;

    let revived = GameSession {
        player:     Person::revive(player),
        companions: companions.into_iter().map(Person::revive).collect(),
        year,
        age,
    };

    let money = if money.is_empty() { default_money } else { money.as_str() };
    if let Err(e) = ui.set_money_text(money) {
        log::warn!("Restoring money readout skipped: {e}");
    }
    if let Err(e) = ui.set_story_markup(&story) {
        log::warn!("Restoring story panel skipped: {e}");
    }
    ui.set_create_panel_visible(create_panel_visible);

    revived
}
