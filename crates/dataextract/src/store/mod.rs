//! Persistence: key-value backends plus the history and settings stores.

pub mod history;
pub mod kv;
pub mod settings;

pub use history::{HistoryStore, HISTORY_CAP};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use settings::SettingsStore;
