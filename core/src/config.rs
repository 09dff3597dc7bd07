use crate::types::{DEFAULT_MONEY_TEXT, STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browsers give each origin about 5 MiB of local storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

pub const DEFAULT_AUTOSAVE_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Key the snapshot document is stored under.
    pub storage_key: String,
    /// Storage namespace. Entries under other origins are invisible.
    pub origin: String,
    /// Rejected by `load` when zero; a hand-built zero is raised to
    /// `clock::MIN_PERIOD` by the autosave clock.
    pub autosave_interval_ms: u64,
    /// `None` turns quota enforcement off.
    pub quota_bytes: Option<usize>,
    /// Money text used when the readout is missing.
    pub default_money_text: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            storage_key:          STORAGE_KEY.to_string(),
            origin:               "quicklife".to_string(),
            autosave_interval_ms: DEFAULT_AUTOSAVE_INTERVAL_MS,
            quota_bytes:          Some(DEFAULT_QUOTA_BYTES),
            default_money_text:   DEFAULT_MONEY_TEXT.to_string(),
        }
    }
}

impl SaveConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    /// In tests, use SaveConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SaveConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.autosave_interval_ms == 0 {
            anyhow::bail!("{path}: autosave_interval_ms must be greater than zero");
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests: a separate
    /// origin and no quota.
    pub fn default_test() -> Self {
        Self {
            origin:      "quicklife-test".to_string(),
            quota_bytes: None,
            ..Self::default()
        }
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SaveConfig = serde_json::from_str(r#"{"autosave_interval_ms": 250}"#).unwrap();
        assert_eq!(config.autosave_interval(), Duration::from_millis(250));
        assert_eq!(config.storage_key, "quicklife_save");
        assert_eq!(config.default_money_text, "0 $");
        assert_eq!(config.quota_bytes, Some(DEFAULT_QUOTA_BYTES));
    }

    #[test]
    fn load_rejects_zero_interval() {
        let path = std::env::temp_dir().join(format!("quicklife-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"autosave_interval_ms": 0}"#).unwrap();
        let result = SaveConfig::load(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err(), "A zero autosave interval must be rejected");
    }
}
