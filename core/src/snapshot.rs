//! Snapshot serialization — full live session state to/from JSON.
//!
//! A snapshot is taken on every autosave tick. It is a full copy, never a
//! diff, and it is dropped as soon as it has been written.

use crate::{
    person::PersonRecord,
    types::{Age, Year, DEFAULT_MONEY_TEXT},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player:     PersonRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    pub companions: Vec<PersonRecord>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year:       Year,
    #[serde(default, deserialize_with = "lenient_int")]
    pub age:        Age,
    /// Money readout text as displayed when the snapshot was taken.
    #[serde(default = "default_money_text", deserialize_with = "money_or_default")]
    pub money:      String,
    /// Story panel markup.
    #[serde(default, deserialize_with = "null_as_default")]
    pub story:      String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub create_panel_visible: bool,
}

impl SnapshotDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

fn default_money_text() -> String {
    DEFAULT_MONEY_TEXT.to_string()
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn money_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_money_text))
}

/// Integers saved by older builds can be null, strings, floats or booleans.
/// Anything that is not a usable number reads as 0.
fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}
