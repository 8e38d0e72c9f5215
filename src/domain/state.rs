/// The persisted state documents and the in-memory snapshot over them
///
/// Four documents make up the tracker's state: the active habit list,
/// today's completion map, the per-day history, and the archive list.
/// They are loaded together into a StateSnapshot, transformed by the
/// engine, and written back; no component mutates storage directly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Habit, HabitId};

/// Completion flags for a single day, keyed by habit id
///
/// Absence of a key means "not completed". Toggling a habit off leaves an
/// explicit `false` behind, so both shapes occur in stored documents.
pub type CompletedMap = BTreeMap<HabitId, bool>;

/// Completion maps bucketed by calendar day
///
/// Day keys serialize as `YYYY-MM-DD`. Ordered so that iteration walks
/// days chronologically.
pub type HistoryMap = BTreeMap<NaiveDate, CompletedMap>;

/// One coherent view of all persisted tracker state
///
/// Owned exclusively by the caller; the engine takes it, applies pure
/// transformations, and hands it back for the repository to persist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    /// Habits currently being tracked
    pub habits: Vec<Habit>,
    /// Today's in-progress completion map
    pub completed: CompletedMap,
    /// Finalized (and today's mirrored) completions per day
    pub history: HistoryMap,
    /// Habits retired after a sustained streak, kept for their history
    pub archived: Vec<Habit>,
    /// Day marker of the last observed rollover; None before first launch
    pub last_reset: Option<NaiveDate>,
}

impl StateSnapshot {
    /// Look up an active habit by id
    pub fn find_active(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    /// Look up an archived habit by id
    pub fn find_archived(&self, id: &HabitId) -> Option<&Habit> {
        self.archived.iter().find(|h| &h.id == id)
    }

    /// Look up a habit in either list
    pub fn find_any(&self, id: &HabitId) -> Option<&Habit> {
        self.find_active(id).or_else(|| self.find_archived(id))
    }
}

/// A daily reminder as wall-clock time-of-day
///
/// Persisted as an ISO-8601 timestamp whose time component is
/// authoritative, matching the stored document shape exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTime {
    pub hour: u32,
    pub minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidReminderTime(format!(
                "{:02}:{:02} is not a valid time of day",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse the time-of-day component out of a stored ISO-8601 timestamp
    pub fn from_timestamp(raw: &str) -> Result<Self, DomainError> {
        let parsed = chrono::DateTime::parse_from_rfc3339(raw)
            .map_err(|e| DomainError::InvalidReminderTime(e.to_string()))?;
        use chrono::Timelike;
        Self::new(parsed.hour(), parsed.minute())
    }

    /// Render as an ISO-8601 timestamp anchored to the given day
    pub fn to_timestamp(&self, day: NaiveDate) -> String {
        use chrono::TimeZone;
        let naive = day
            .and_hms_opt(self.hour, self.minute, 0)
            .unwrap_or_else(|| day.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        match chrono::Local.from_local_datetime(&naive).earliest() {
            Some(local) => local.to_rfc3339(),
            // Fall back to the naive rendering if the local time is skipped by a DST gap
            None => format!("{}+00:00", naive.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
