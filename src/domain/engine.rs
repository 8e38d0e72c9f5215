/// Streak and rollover engine
///
/// All state transitions live here as pure transformations over an owned
/// StateSnapshot: the daily rollover (finalize the outgoing day, reset the
/// completion map, migrate streak qualifiers to the archive) and the
/// direct user actions (add, rename, toggle, delete, unarchive).

use chrono::NaiveDate;

use crate::domain::{clock, DomainError, Habit, HabitId, HistoryMap, StateSnapshot};

/// Consecutive completed days required before a habit retires to the archive
pub const ARCHIVE_STREAK_DAYS: u32 = 7;

/// Result of a rollover check
pub struct RolloverOutcome {
    /// The (possibly unchanged) state to persist
    pub state: StateSnapshot,
    /// Habits migrated to the archive by this rollover
    pub archived_now: Vec<Habit>,
    /// Whether any document changed and needs to be written back
    pub changed: bool,
}

/// Run the day-boundary check against the loaded state
///
/// When no boundary has been crossed this returns the inputs unchanged, so
/// calling it any number of times within one day is a no-op. When a boundary
/// has been crossed, the day that just ended is finalized into history under
/// its own key (the marker is snapshotted before it advances), the
/// completion map resets, and each habit's trailing streak is evaluated
/// against the outgoing day to decide archive migration.
pub fn run_rollover(mut state: StateSnapshot, today: NaiveDate) -> RolloverOutcome {
    let outgoing = match state.last_reset {
        Some(marker) => marker,
        None => {
            // First launch: adopt today as the marker, nothing to finalize
            state.last_reset = Some(today);
            return RolloverOutcome {
                state,
                archived_now: Vec::new(),
                changed: true,
            };
        }
    };

    if !clock::has_day_changed(outgoing, today) {
        return RolloverOutcome {
            state,
            archived_now: Vec::new(),
            changed: false,
        };
    }

    tracing::debug!("Day boundary crossed: {} -> {}", outgoing, today);

    // Finalize the outgoing day. Toggles mirror into history as they happen,
    // so this only matters when the map is non-empty; an empty map would add
    // a no-information day entry.
    if !state.completed.is_empty() {
        state
            .history
            .insert(outgoing, std::mem::take(&mut state.completed));
    }
    state.last_reset = Some(today);

    // Partition active habits on their streak over the week ending at the
    // outgoing day. Ids already in the archive are never re-added.
    let mut still_active = Vec::with_capacity(state.habits.len());
    let mut archived_now = Vec::new();

    for habit in std::mem::take(&mut state.habits) {
        let qualified = streak_length(&state.history, &habit.id, outgoing) >= ARCHIVE_STREAK_DAYS;
        if qualified && state.find_archived(&habit.id).is_none() {
            tracing::info!("Habit '{}' held a full streak, archiving ({})", habit.title, habit.id);
            state.archived.push(habit.clone());
            archived_now.push(habit);
        } else {
            still_active.push(habit);
        }
    }
    state.habits = still_active;

    RolloverOutcome {
        state,
        archived_now,
        changed: true,
    }
}

/// Completed-day count over the week ending at (and including) `ending`
///
/// Days with no history entry count as not done, so a habit younger than
/// the window can never reach a full streak.
pub fn streak_length(history: &HistoryMap, id: &HabitId, ending: NaiveDate) -> u32 {
    clock::trailing_days(ending, ARCHIVE_STREAK_DAYS)
        .into_iter()
        .filter(|day| {
            history
                .get(day)
                .and_then(|completions| completions.get(id))
                .copied()
                .unwrap_or(false)
        })
        .count() as u32
}

impl StateSnapshot {
    /// Create a habit with a fresh id and add it to the active list
    pub fn add_habit(&mut self, title: &str) -> Result<Habit, DomainError> {
        let habit = Habit::new(title.to_string())?;
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Edit an active habit's title in place
    pub fn rename_habit(&mut self, id: &HabitId, title: &str) -> Result<(), DomainError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| &h.id == id)
            .ok_or_else(|| DomainError::HabitNotFound(id.to_string()))?;
        habit.rename(title.to_string())
    }

    /// Flip a habit's completion flag for today
    ///
    /// The full completion map is mirrored into today's history entry in the
    /// same step, so `completed` and `history[today]` never diverge.
    pub fn toggle(&mut self, id: &HabitId, today: NaiveDate) -> Result<bool, DomainError> {
        if self.find_active(id).is_none() {
            return Err(DomainError::HabitNotFound(id.to_string()));
        }

        let now_done = !self.completed.get(id).copied().unwrap_or(false);
        self.completed.insert(id.clone(), now_done);
        self.history.insert(today, self.completed.clone());
        Ok(now_done)
    }

    /// Remove a habit and every trace of it, as one logical transaction
    ///
    /// Cascades through the completion map and every day of history; any day
    /// whose map becomes empty is pruned. Works on active and archived
    /// habits alike.
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<(), DomainError> {
        let before = self.habits.len() + self.archived.len();
        self.habits.retain(|h| &h.id != id);
        self.archived.retain(|h| &h.id != id);
        if self.habits.len() + self.archived.len() == before {
            return Err(DomainError::HabitNotFound(id.to_string()));
        }

        self.completed.remove(id);
        self.history.retain(|_, completions| {
            completions.remove(id);
            !completions.is_empty()
        });
        Ok(())
    }

    /// Move an archived habit back to active tracking
    ///
    /// History is left untouched; if the trailing window still qualifies,
    /// the next rollover will archive the habit again.
    pub fn unarchive(&mut self, id: &HabitId) -> Result<Habit, DomainError> {
        let pos = self
            .archived
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| DomainError::HabitNotFound(id.to_string()))?;

        let habit = self.archived.remove(pos);
        self.habits.push(habit.clone());
        Ok(habit)
    }
}
