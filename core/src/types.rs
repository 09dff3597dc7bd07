//! Shared primitive types used across the save store.

/// An in-game calendar year.
pub type Year = i64;

/// A character's age in whole years.
pub type Age = i64;

/// The key the snapshot document lives under in durable storage.
pub const STORAGE_KEY: &str = "quicklife_save";

/// Money readout shown when the UI has nothing to report.
pub const DEFAULT_MONEY_TEXT: &str = "0 $";
