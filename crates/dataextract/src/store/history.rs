//! History of saved editor snapshots.

use crate::error::{DataExtractError, Result};
use crate::store::kv::KeyValueStore;
use crate::types::{HistoryEntry, OutputFormat};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const HISTORY_KEY: &str = "history";

/// Maximum retained entries; oldest are evicted on overflow.
pub const HISTORY_CAP: usize = 50;

/// Preview length in characters before truncation.
const PREVIEW_LEN: usize = 100;

fn make_preview(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() > PREVIEW_LEN {
        let mut preview: String = chars[..PREVIEW_LEN].iter().collect();
        preview.push_str("...");
        preview
    } else {
        content.to_string()
    }
}

/// Newest-first list of saved snapshots, capped at [`HISTORY_CAP`] and
/// persisted through a [`KeyValueStore`] on every change.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Save a snapshot to the front of the history.
    ///
    /// # Errors
    ///
    /// Returns `DataExtractError::Validation` for blank content, `Storage`
    /// when persistence fails.
    pub fn add(&self, content: &str, format: OutputFormat) -> Result<HistoryEntry> {
        if content.trim().is_empty() {
            return Err(DataExtractError::validation("Nothing to save"));
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            content: content.to_string(),
            format,
            timestamp: Utc::now(),
            preview: make_preview(content),
        };

        let mut entries = self.list()?;
        entries.insert(0, entry.clone());
        entries.truncate(HISTORY_CAP);
        self.persist(&entries)?;

        tracing::debug!(format = %format, total = entries.len(), "history entry saved");
        Ok(entry)
    }

    /// All entries, newest first.
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        match self.store.get(HISTORY_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                DataExtractError::storage_with_source("Corrupt history record", e)
            }),
            None => Ok(vec![]),
        }
    }

    /// Entry at `index` (0 = newest), or `None` out of range.
    pub fn get(&self, index: usize) -> Result<Option<HistoryEntry>> {
        Ok(self.list()?.into_iter().nth(index))
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemoryStore;

    fn store() -> HistoryStore {
        HistoryStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_and_list_newest_first() {
        let history = store();
        history.add("first", OutputFormat::Json).unwrap();
        history.add("second", OutputFormat::Yaml).unwrap();

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "second");
        assert_eq!(entries[0].format, OutputFormat::Yaml);
        assert_eq!(entries[1].content, "first");
    }

    #[test]
    fn test_blank_content_rejected() {
        let history = store();
        assert!(history.add("   \n", OutputFormat::Json).is_err());
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let history = store();
        for i in 0..55 {
            history.add(&format!("entry {}", i), OutputFormat::Json).unwrap();
        }

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), HISTORY_CAP);
        assert_eq!(entries[0].content, "entry 54");
        // Entries 0-4 were evicted.
        assert_eq!(entries.last().unwrap().content, "entry 5");
    }

    #[test]
    fn test_preview_truncation() {
        let history = store();
        let long = "x".repeat(150);
        let entry = history.add(&long, OutputFormat::Json).unwrap();
        assert_eq!(entry.preview.len(), 103);
        assert!(entry.preview.ends_with("..."));

        let short = history.add("short", OutputFormat::Json).unwrap();
        assert_eq!(short.preview, "short");
    }

    #[test]
    fn test_get_by_index() {
        let history = store();
        history.add("a", OutputFormat::Json).unwrap();
        history.add("b", OutputFormat::Json).unwrap();

        assert_eq!(history.get(0).unwrap().unwrap().content, "b");
        assert_eq!(history.get(1).unwrap().unwrap().content, "a");
        assert!(history.get(2).unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let history = store();
        history.add("a", OutputFormat::Json).unwrap();
        history.clear().unwrap();
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let history = store();
        let content = "ü".repeat(120);
        let entry = history.add(&content, OutputFormat::Json).unwrap();
        assert!(entry.preview.ends_with("..."));
        assert_eq!(entry.preview.chars().count(), PREVIEW_LEN + 3);
    }
}
