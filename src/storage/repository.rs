/// Typed repository over the key-value store
///
/// Owns the document keys and the JSON (de)serialization of each document.
/// Reads never fail: a missing key, a storage error, or malformed JSON all
/// fall back to the empty document, logged but never surfaced.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{CompletedMap, Habit, HistoryMap, ReminderTime, StateSnapshot};
use crate::storage::{KvStore, StorageError};

/// Document keys in the flat store
pub const KEY_HABITS: &str = "habits";
pub const KEY_COMPLETED: &str = "completed";
pub const KEY_HISTORY: &str = "history";
pub const KEY_ARCHIVED: &str = "archived";
pub const KEY_REMINDER_TIME: &str = "reminderTime";
pub const KEY_LAST_RESET: &str = "lastReset";

/// Loads and saves the tracker documents through a KvStore
pub struct Repository<S: KvStore> {
    store: S,
}

impl<S: KvStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load all state documents into one snapshot
    pub fn load_state(&self) -> StateSnapshot {
        StateSnapshot {
            habits: self.load_or_default(KEY_HABITS),
            completed: self.load_or_default(KEY_COMPLETED),
            history: self.load_or_default(KEY_HISTORY),
            archived: self.load_or_default(KEY_ARCHIVED),
            last_reset: self.load_or_default(KEY_LAST_RESET),
        }
    }

    /// Write every state document back
    pub fn save_state(&self, state: &StateSnapshot) -> Result<(), StorageError> {
        self.save_habits(&state.habits)?;
        self.save_completed(&state.completed)?;
        self.save_history(&state.history)?;
        self.save_archived(&state.archived)?;
        self.save_last_reset(state.last_reset)?;
        Ok(())
    }

    pub fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        self.save(KEY_HABITS, &habits)
    }

    pub fn save_completed(&self, completed: &CompletedMap) -> Result<(), StorageError> {
        self.save(KEY_COMPLETED, completed)
    }

    pub fn save_history(&self, history: &HistoryMap) -> Result<(), StorageError> {
        self.save(KEY_HISTORY, history)
    }

    pub fn save_archived(&self, archived: &[Habit]) -> Result<(), StorageError> {
        self.save(KEY_ARCHIVED, &archived)
    }

    pub fn save_last_reset(&self, marker: Option<NaiveDate>) -> Result<(), StorageError> {
        self.save(KEY_LAST_RESET, &marker)
    }

    /// The stored reminder, if one is set and parseable
    pub fn load_reminder(&self) -> Option<ReminderTime> {
        let raw: Option<String> = self.load_or_default(KEY_REMINDER_TIME);
        let raw = raw?;

        match ReminderTime::from_timestamp(&raw) {
            Ok(time) => Some(time),
            Err(e) => {
                tracing::warn!("Ignoring unparseable reminder time {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Persist the reminder as a timestamp anchored to `anchor`
    pub fn save_reminder(&self, time: ReminderTime, anchor: NaiveDate) -> Result<(), StorageError> {
        self.save(KEY_REMINDER_TIME, &time.to_timestamp(anchor))
    }

    /// Wipe every document
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear()
    }

    /// Load one document, falling back to its default on any failure
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!("Failed to read document {:?}, using default: {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Malformed document {:?}, using default: {}", key, e);
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}
