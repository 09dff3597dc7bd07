//! The UI surface the save store reads from and writes back to.
//!
//! Three elements matter: the money readout, the story panel, and the
//! character-creation panel. Any of them may be missing from the running
//! environment; reads report that as `Ok(None)`.

use crate::error::{SaveError, SaveResult};

pub const MONEY_ELEMENT: &str = "total-money";
pub const STORY_ELEMENT: &str = "text-container";
pub const CREATE_PANEL_ELEMENT: &str = "create-character-screen";

pub trait UiSurface {
    /// Displayed text of the money readout. `Ok(None)` when the element is absent.
    fn money_text(&self) -> SaveResult<Option<String>>;

    /// Inner markup of the story panel. `Ok(None)` when the element is absent.
    fn story_markup(&self) -> SaveResult<Option<String>>;

    fn set_money_text(&mut self, text: &str) -> SaveResult<()>;

    fn set_story_markup(&mut self, markup: &str) -> SaveResult<()>;

    /// Visibility of the character-creation panel, `None` if there is no panel.
    fn create_panel_visible(&self) -> Option<bool>;

    /// Show or hide the creation panel. Returns false if there is no panel.
    fn set_create_panel_visible(&mut self, visible: bool) -> bool;
}

/// In-memory UI used by the headless runner and by tests.
/// Each `None` element behaves as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessUi {
    pub money:        Option<String>,
    pub story:        Option<String>,
    pub create_panel: Option<bool>,
}

impl HeadlessUi {
    /// All three elements present, creation panel showing.
    pub fn with_all_elements() -> Self {
        Self {
            money:        Some(String::new()),
            story:        Some(String::new()),
            create_panel: Some(true),
        }
    }
}

impl UiSurface for HeadlessUi {
    fn money_text(&self) -> SaveResult<Option<String>> {
        Ok(self.money.clone())
    }

    fn story_markup(&self) -> SaveResult<Option<String>> {
        Ok(self.story.clone())
    }

    fn set_money_text(&mut self, text: &str) -> SaveResult<()> {
        match self.money.as_mut() {
            Some(slot) => {
                text.clone_into(slot);
                Ok(())
            }
            None => Err(SaveError::MissingUiElement { element: MONEY_ELEMENT.into() }),
        }
    }

    fn set_story_markup(&mut self, markup: &str) -> SaveResult<()> {
        match self.story.as_mut() {
            Some(slot) => {
                markup.clone_into(slot);
                Ok(())
            }
            None => Err(SaveError::MissingUiElement { element: STORY_ELEMENT.into() }),
        }
    }

    fn create_panel_visible(&self) -> Option<bool> {
        self.create_panel
    }

    fn set_create_panel_visible(&mut self, visible: bool) -> bool {
        match self.create_panel.as_mut() {
            Some(flag) => {
                *flag = visible;
                true
            }
            None => false,
        }
    }
}
