/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a recurring
/// task the user tracks day by day, along with its identifier type and
/// title validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// Stored as a plain string so ids survive the JSON documents unchanged.
/// Fresh ids are random UUID v4 tokens; any non-empty string loaded from
/// storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A habit the user wants to keep up daily
///
/// The tracked state (completions per day) lives in the companion documents,
/// keyed by the habit's id; the habit itself is just identity plus title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display title (e.g., "Morning Run")
    pub title: String,
}

impl Habit {
    /// Create a new habit with a fresh id, validating the title
    pub fn new(title: String) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;

        Ok(Self {
            id: HabitId::new(),
            title,
        })
    }

    /// Create a habit from existing data (used when loading from storage
    /// and in tests that need fixed ids)
    pub fn from_existing(id: HabitId, title: String) -> Self {
        Self { id, title }
    }

    /// Change the title, applying the same validation as creation
    pub fn rename(&mut self, title: String) -> Result<(), DomainError> {
        Self::validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// Validate a habit title according to business rules
    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::InvalidTitle(
                "Habit title cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
