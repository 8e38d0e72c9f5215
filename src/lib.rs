/// Public library interface for the habix habit tracker
///
/// This module exports the application orchestrator and the public types
/// used by the CLI and by tests.

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod notify;
pub mod cli;

// Re-export public modules and types
pub use analytics::{
    habit_consistency, today_progress, week_window, weekly_summary, ConsistencyReport,
    DaySummary, Progress, WeekSummary, DAY_LABELS,
};
pub use domain::*;
pub use notify::{LocalNotifier, Notifier, NotifyError};
pub use storage::{KvStore, Repository, SqliteStore, StorageError};

/// Errors that can occur during application operation
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// The application core: repository plus notifier behind every user action
///
/// Each method is one synchronous read-modify-write: load the documents,
/// apply the engine transformation, persist what changed. The rollover
/// check in `on_enter_foreground` runs before any action is dispatched, so
/// a day boundary crossed since the last launch is applied before any
/// stale state is acted on.
pub struct HabitApp<S: KvStore, N: Notifier> {
    repo: Repository<S>,
    notifier: N,
}

impl<S: KvStore, N: Notifier> HabitApp<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            repo: Repository::new(store),
            notifier,
        }
    }

    /// The app regained focus: detect a day-boundary crossing and roll over
    ///
    /// Returns the habits migrated to the archive by this rollover, so the
    /// surface can report them. Calling this repeatedly within one day
    /// changes nothing.
    pub fn on_enter_foreground(&mut self) -> Result<Vec<Habit>, AppError> {
        let state = self.repo.load_state();
        let outcome = run_rollover(state, clock::today());

        if outcome.changed {
            self.repo.save_state(&outcome.state)?;
        }

        Ok(outcome.archived_now)
    }

    /// A fresh snapshot of all persisted state
    pub fn state(&self) -> StateSnapshot {
        self.repo.load_state()
    }

    pub fn add_habit(&mut self, title: &str) -> Result<Habit, AppError> {
        let mut state = self.repo.load_state();
        let habit = state.add_habit(title)?;
        self.repo.save_habits(&state.habits)?;

        tracing::debug!("Created habit: {} ({})", habit.title, habit.id);
        Ok(habit)
    }

    pub fn rename_habit(&mut self, id: &HabitId, title: &str) -> Result<(), AppError> {
        let mut state = self.repo.load_state();
        state.rename_habit(id, title)?;
        self.repo.save_habits(&state.habits)?;
        Ok(())
    }

    /// Flip today's completion flag; returns the new state of the flag
    pub fn toggle(&mut self, id: &HabitId) -> Result<bool, AppError> {
        let mut state = self.repo.load_state();
        let now_done = state.toggle(id, clock::today())?;

        self.repo.save_completed(&state.completed)?;
        self.repo.save_history(&state.history)?;
        Ok(now_done)
    }

    pub fn delete_habit(&mut self, id: &HabitId) -> Result<(), AppError> {
        let mut state = self.repo.load_state();
        state.delete_habit(id)?;

        self.repo.save_habits(&state.habits)?;
        self.repo.save_archived(&state.archived)?;
        self.repo.save_completed(&state.completed)?;
        self.repo.save_history(&state.history)?;

        tracing::debug!("Deleted habit and its completion records: {}", id);
        Ok(())
    }

    pub fn unarchive(&mut self, id: &HabitId) -> Result<Habit, AppError> {
        let mut state = self.repo.load_state();
        let habit = state.unarchive(id)?;

        self.repo.save_habits(&state.habits)?;
        self.repo.save_archived(&state.archived)?;
        Ok(habit)
    }

    /// This week's per-day completion counts, Sunday through Saturday
    pub fn weekly_stats(&self) -> WeekSummary {
        let state = self.repo.load_state();
        weekly_summary(&state.history, &state.habits, clock::today())
    }

    /// A habit (active or archived) with its full completion record
    pub fn habit_detail(&self, id: &HabitId) -> Result<(Habit, ConsistencyReport), AppError> {
        let state = self.repo.load_state();
        let habit = state
            .find_any(id)
            .cloned()
            .ok_or_else(|| DomainError::HabitNotFound(id.to_string()))?;

        Ok((habit, habit_consistency(&state.history, id)))
    }

    pub fn reminder(&self) -> Option<ReminderTime> {
        self.repo.load_reminder()
    }

    /// Persist the reminder time and (re)schedule the daily notification
    ///
    /// Returns false when the scheduler refused (e.g. permission denied):
    /// the time stays persisted but the feature is inert until it succeeds.
    pub fn set_reminder(&mut self, time: ReminderTime) -> Result<bool, AppError> {
        self.repo.save_reminder(time, clock::today())?;

        if let Err(e) = self.notifier.cancel_all() {
            tracing::warn!("Could not cancel previous reminders: {}", e);
        }

        match self.notifier.schedule_daily(time.hour, time.minute) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!("Reminder scheduling degraded: {}", e);
                Ok(false)
            }
        }
    }

    /// Wipe all stored data and cancel scheduled notifications
    pub fn reset_all(&mut self) -> Result<(), AppError> {
        self.repo.clear()?;

        if let Err(e) = self.notifier.cancel_all() {
            tracing::warn!("Could not cancel reminders during reset: {}", e);
        }

        tracing::info!("All tracker data reset");
        Ok(())
    }
}
