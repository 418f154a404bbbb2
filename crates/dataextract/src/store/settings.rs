//! Persisted user settings.

use crate::error::{DataExtractError, Result};
use crate::store::kv::KeyValueStore;
use crate::types::Settings;
use std::sync::Arc;

const SETTINGS_KEY: &str = "settings";

/// Settings record persisted through a [`KeyValueStore`] on every change.
///
/// Loading merges the stored record over defaults, so records written by
/// older versions with missing fields still load.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current settings; defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Settings> {
        match self.store.get(SETTINGS_KEY)? {
            Some(json) => {
                let mut value: serde_json::Value =
                    serde_json::to_value(Settings::default())?;
                let saved: serde_json::Value = serde_json::from_str(&json).map_err(|e| {
                    DataExtractError::storage_with_source("Corrupt settings record", e)
                })?;

                // Merge saved fields over defaults.
                if let (Some(base), Some(overlay)) = (value.as_object_mut(), saved.as_object()) {
                    for (key, val) in overlay {
                        base.insert(key.clone(), val.clone());
                    }
                }
                Ok(serde_json::from_value(value)?)
            }
            None => Ok(Settings::default()),
        }
    }

    /// Validate and persist.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        let json = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &json)
    }

    /// Apply a mutation and persist the result in one step.
    pub fn update<F>(&self, mutate: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.load()?;
        mutate(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}
