//! Optional UI refresh callbacks fired after a successful restore.
//!
//! Every field is optional. An absent hook is a normal state, not an error.

use crate::{
    person::{Money, Person, Stats},
    session::GameSession,
    types::Age,
};

pub type StatsHook = Box<dyn FnMut(&Stats)>;
pub type StatBarsHook = Box<dyn FnMut(&Person, bool)>;
pub type LifeStageHook = Box<dyn FnMut(Age)>;
pub type MoneyHook = Box<dyn FnMut(&Money)>;
pub type JobHook = Box<dyn FnMut(&mut [Person])>;

#[derive(Default)]
pub struct RefreshHooks {
    pub update_stats_ui:      Option<StatsHook>,
    /// Receives the player and a force-refresh flag.
    pub handle_stat_bars:     Option<StatBarsHook>,
    pub life_stage_displayer: Option<LifeStageHook>,
    /// Receives the revived player's ledger, which is the money source of truth.
    pub money_viewer:         Option<MoneyHook>,
    pub job_assigner:         Option<JobHook>,
}

impl RefreshHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_update_stats_ui(mut self, hook: impl FnMut(&Stats) + 'static) -> Self {
        self.update_stats_ui = Some(Box::new(hook));
        self
    }

    pub fn on_handle_stat_bars(mut self, hook: impl FnMut(&Person, bool) + 'static) -> Self {
        self.handle_stat_bars = Some(Box::new(hook));
        self
    }

    pub fn on_life_stage_displayer(mut self, hook: impl FnMut(Age) + 'static) -> Self {
        self.life_stage_displayer = Some(Box::new(hook));
        self
    }

    pub fn on_money_viewer(mut self, hook: impl FnMut(&Money) + 'static) -> Self {
        self.money_viewer = Some(Box::new(hook));
        self
    }

    pub fn on_job_assigner(mut self, hook: impl FnMut(&mut [Person]) + 'static) -> Self {
        self.job_assigner = Some(Box::new(hook));
        self
    }

    /// Names of the hooks that are wired, for diagnostics.
    pub fn present(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.update_stats_ui.is_some()      { names.push("update_stats_ui"); }
        if self.handle_stat_bars.is_some()     { names.push("handle_stat_bars"); }
        if self.life_stage_displayer.is_some() { names.push("life_stage_displayer"); }
        if self.money_viewer.is_some()         { names.push("money_viewer"); }
        if self.job_assigner.is_some()         { names.push("job_assigner"); }
        names
    }
}

impl std::fmt::Debug for RefreshHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHooks").field("present", &self.present()).finish()
    }
}

/// Game-provided logic that runs when a new playthrough starts.
pub type NewLifeHandler = Box<dyn FnMut(&mut GameSession)>;

/// Ordered list of new-life handlers, run after the save is cleared.
#[derive(Default)]
pub struct NewLifeHandlers {
    handlers: Vec<(&'static str, NewLifeHandler)>,
}

impl NewLifeHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers run in registration order.
    pub fn register(
        &mut self,
        name: &'static str,
        handler: impl FnMut(&mut GameSession) + 'static,
    ) {
        self.handlers.push((name, Box::new(handler)));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn run_all(&mut self, session: &mut GameSession) {
        for (name, handler) in &mut self.handlers {
            log::debug!("new life: running handler '{name}'");
            handler(session);
        }
    }
}

impl std::fmt::Debug for NewLifeHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.handlers.iter().map(|(n, _)| *n).collect();
        f.debug_struct("NewLifeHandlers").field("handlers", &names).finish()
    }
}
