//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use quicklife_core::{
    error::{SaveError, SaveResult},
    person::{
        Item, Offense, Person, RelationKind, Relationship,
    },
    session::GameSession,
    storage::{KeyValueStorage, MemoryStorage},
    ui::{HeadlessUi, UiSurface},
};
use std::{cell::RefCell, rc::Rc};

/// A player with every sub-record populated, plus two companions.
pub fn sample_session() -> GameSession {
    let mut player = Person::new("Mara Quill");
    player.age = 34;
    player.job = Some("Journalist".into());
    player.inventory.items.push(Item { name: "Bicycle".into(), value: 300, quantity: 1 });
    player.inventory.items.push(Item { name: "Notebook".into(), value: 2, quantity: 12 });
    player.stats.health = 81;
    player.stats.happiness = 64;
    player.stats.smarts = 92;
    player.stats.looks = 40;
    player.relationships.entries.push(Relationship {
        name:      "Ione Quill".into(),
        kind:      RelationKind::Parent,
        closeness: 77,
    });
    player.skills.levels.insert("writing".into(), 8);
    player.skills.levels.insert("driving".into(), 3);
    player.free_time.hours_per_week = 14;
    player.free_time.activities.push("gym".into());
    player.money.record(2020, "salary", 42_000);
    player.money.record(2020, "rent", -14_400);
    player.criminal_record.offenses.push(Offense {
        year:           2015,
        crime:          "jaywalking".into(),
        sentence_years: 0,
    });
    player.prison.years_remaining = 0;
    player.actions.pending.push("ask_for_raise".into());
    player.social_media.followers = 1_250;
    player.social_media.accounts.push("mq_writes".into());
    player
        .extra
        .insert("favoriteColor".into(), serde_json::Value::from("teal"));

    let mut partner = Person::new("Oren Vale");
    partner.age = 36;
    partner.stats.happiness = 70;
    partner.money.record(2020, "salary", 51_000);

    let mut child = Person::new("Pip Quill");
    child.age = 4;
    child.skills.levels.insert("drawing".into(), 1);

    let mut session = GameSession::new(player, 2020);
    session.companions.push(partner);
    session.companions.push(child);
    session
}

/// UI with every element present and some text on screen.
pub fn sample_ui() -> HeadlessUi {
    HeadlessUi {
        money:        Some("27600 $".into()),
        story:        Some("<p>Age 34: You got promoted.</p>".into()),
        create_panel: Some(false),
    }
}

/// Storage wrapper that writes every operation into a shared journal.
pub struct JournalStorage {
    pub inner:   MemoryStorage,
    pub journal: Rc<RefCell<Vec<String>>>,
}

impl JournalStorage {
    pub fn new(journal: Rc<RefCell<Vec<String>>>) -> Self {
        Self { inner: MemoryStorage::new(), journal }
    }
}

impl KeyValueStorage for JournalStorage {
    fn get(&self, key: &str) -> SaveResult<Option<String>> {
        self.journal.borrow_mut().push(format!("get:{key}"));
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> SaveResult<()> {
        self.journal.borrow_mut().push(format!("set:{key}"));
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> SaveResult<()> {
        self.journal.borrow_mut().push(format!("remove:{key}"));
        self.inner.remove(key)
    }
}

/// A UI whose reads always fail.
pub struct BrokenUi;

impl UiSurface for BrokenUi {
    fn money_text(&self) -> SaveResult<Option<String>> {
        Err(SaveError::MissingUiElement { element: "total-money".into() })
    }

    fn story_markup(&self) -> SaveResult<Option<String>> {
        Err(SaveError::Other(anyhow::anyhow!("markup detached")))
    }

    fn set_money_text(&mut self, _text: &str) -> SaveResult<()> {
        Err(SaveError::MissingUiElement { element: "total-money".into() })
    }

    fn set_story_markup(&mut self, _markup: &str) -> SaveResult<()> {
        Err(SaveError::MissingUiElement { element: "text-container".into() })
    }

    fn create_panel_visible(&self) -> Option<bool> {
        None
    }

    fn set_create_panel_visible(&mut self, _visible: bool) -> bool {
        false
    }
}

/// A UI that panics when read, standing in for a faulting host.
pub struct PanickingUi;

impl UiSurface for PanickingUi {
    fn money_text(&self) -> SaveResult<Option<String>> {
        panic!("host element vanished mid-read")
    }

    fn story_markup(&self) -> SaveResult<Option<String>> {
        Ok(None)
    }

    fn set_money_text(&mut self, _text: &str) -> SaveResult<()> {
        Ok(())
    }

    fn set_story_markup(&mut self, _markup: &str) -> SaveResult<()> {
        Ok(())
    }

    fn create_panel_visible(&self) -> Option<bool> {
        None
    }

    fn set_create_panel_visible(&mut self, _visible: bool) -> bool {
        false
    }
}

/// A UI that reads fine but panics when the story panel is written.
pub struct PanickingWriteUi {
    pub money: String,
}

impl UiSurface for PanickingWriteUi {
    fn money_text(&self) -> SaveResult<Option<String>> {
        Ok(Some(self.money.clone()))
    }

    fn story_markup(&self) -> SaveResult<Option<String>> {
        Ok(None)
    }

    fn set_money_text(&mut self, text: &str) -> SaveResult<()> {
        text.clone_into(&mut self.money);
        Ok(())
    }

    fn set_story_markup(&mut self, _markup: &str) -> SaveResult<()> {
        panic!("story panel detached during write")
    }

    fn create_panel_visible(&self) -> Option<bool> {
        None
    }

    fn set_create_panel_visible(&mut self, _visible: bool) -> bool {
        false
    }
}
