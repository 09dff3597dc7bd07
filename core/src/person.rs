//! Character entities and their plain-data projection.
//!
//! A `Person` is the live, owned entity the game mutates. A `PersonRecord`
//! is what goes over the serialization boundary: every sub-record is
//! optional so that partial or older saves still revive.
//!
//! RULE: the only way from a record to a live entity is `Person::revive`.
//! It consumes the record and builds each sub-record as its own value.

use crate::types::{Age, Year};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ── Sub-records ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name:     String,
    pub value:    i64,
    pub quantity: u32,
}

/// Core stat bars, each on a 0–100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub health:    u8,
    pub happiness: u8,
    pub smarts:    u8,
    pub looks:     u8,
}

impl Default for Stats {
    fn default() -> Self {
        Self { health: 50, happiness: 50, smarts: 50, looks: 50 }
    }
}

impl Stats {
    /// Apply a signed delta to a bar, clamped to 0–100.
    pub fn nudge(bar: &mut u8, delta: i16) {
        *bar = (i16::from(*bar) + delta).clamp(0, 100) as u8;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationships {
    pub entries: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub name:      String,
    pub kind:      RelationKind,
    pub closeness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Parent,
    Sibling,
    Partner,
    Child,
    Friend,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub levels: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FreeTime {
    pub hours_per_week: u32,
    pub activities:     Vec<String>,
}

/// The money ledger. `total` is the source of truth for any money display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    pub total:  i64,
    pub ledger: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub year:   Year,
    pub label:  String,
    pub amount: i64,
}

impl Money {
    /// Post an entry and move the total by its amount.
    pub fn record(&mut self, year: Year, label: impl Into<String>, amount: i64) {
        self.total = self.total.saturating_add(amount);
        self.ledger.push(LedgerEntry { year, label: label.into(), amount });
    }

    /// Readout text in the same shape the game's money panel uses.
    pub fn display(&self) -> String {
        format!("{} $", self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriminalRecord {
    pub offenses: Vec<Offense>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offense {
    pub year:           Year,
    pub crime:          String,
    pub sentence_years: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Prison {
    pub incarcerated:    bool,
    pub years_remaining: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actions {
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub followers: u64,
    pub accounts:  Vec<String>,
    pub verified:  bool,
}

// ── Entity ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name:            String,
    pub age:             Age,
    pub alive:           bool,
    pub job:             Option<String>,
    pub inventory:       Inventory,
    pub stats:           Stats,
    pub relationships:   Relationships,
    pub skills:          Skills,
    pub free_time:       FreeTime,
    pub money:           Money,
    pub criminal_record: CriminalRecord,
    pub prison:          Prison,
    pub actions:         Actions,
    pub social_media:    SocialMedia,
    /// Keys written by the game that this crate does not model.
    /// Carried through a round trip untouched.
    pub extra:           BTreeMap<String, Value>,
}

impl Default for Person {
    fn default() -> Self {
        Self::new("")
    }
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:            name.into(),
            age:             0,
            alive:           true,
            job:             None,
            inventory:       Inventory::default(),
            stats:           Stats::default(),
            relationships:   Relationships::default(),
            skills:          Skills::default(),
            free_time:       FreeTime::default(),
            money:           Money::default(),
            criminal_record: CriminalRecord::default(),
            prison:          Prison::default(),
            actions:         Actions::default(),
            social_media:    SocialMedia::default(),
            extra:           BTreeMap::new(),
        }
    }

    /// Build a live entity from a plain-data record, field by field.
    /// Missing sub-records come back as their defaults.
    pub fn revive(record: PersonRecord) -> Self {
        Self {
            name:            record.name.unwrap_or_default(),
            age:             record.age.unwrap_or(0),
            alive:           record.alive.unwrap_or(true),
            job:             record.job,
            inventory:       record.inventory.unwrap_or_default(),
            stats:           record.stats.unwrap_or_default(),
            relationships:   record.relationships.unwrap_or_default(),
            skills:          record.skills.unwrap_or_default(),
            free_time:       record.free_time.unwrap_or_default(),
            money:           record.money.unwrap_or_default(),
            criminal_record: record.criminal_record.unwrap_or_default(),
            prison:          record.prison.unwrap_or_default(),
            actions:         record.actions.unwrap_or_default(),
            social_media:    record.social_media.unwrap_or_default(),
            extra:           record.extra,
        }
    }

    /// Project to plain data. Every sub-record is copied.
    pub fn to_record(&self) -> PersonRecord {
        PersonRecord {
            name:            Some(self.name.clone()),
            age:             Some(self.age),
            alive:           Some(self.alive),
            job:             self.job.clone(),
            inventory:       Some(self.inventory.clone()),
            stats:           Some(self.stats.clone()),
            relationships:   Some(self.relationships.clone()),
            skills:          Some(self.skills.clone()),
            free_time:       Some(self.free_time.clone()),
            money:           Some(self.money.clone()),
            criminal_record: Some(self.criminal_record.clone()),
            prison:          Some(self.prison.clone()),
            actions:         Some(self.actions.clone()),
            social_media:    Some(self.social_media.clone()),
            extra:           self.extra.clone(),
        }
    }
}

/// Plain-data projection of a `Person` as stored in a snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name:            Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age:             Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alive:           Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job:             Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory:       Option<Inventory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats:           Option<Stats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships:   Option<Relationships>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills:          Option<Skills>,
    #[serde(default, rename = "freetime", skip_serializing_if = "Option::is_none")]
    pub free_time:       Option<FreeTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money:           Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criminal_record: Option<CriminalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prison:          Option<Prison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions:         Option<Actions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media:    Option<SocialMedia>,
    #[serde(flatten)]
    pub extra:           BTreeMap<String, Value>,
}
