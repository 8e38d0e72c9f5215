/// Analytics over the completion history
///
/// This module derives the read-only views the tracker presents: today's
/// progress, the Sunday-to-Saturday weekly summary, and the per-habit
/// consistency report shown for archived habits.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{CompletedMap, Habit, HabitId, HistoryMap};

/// Single-letter column labels for the weekly chart, Sunday first
pub const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Completion count for one day of the weekly window
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: NaiveDate,
    /// Habits marked done on that day
    pub done: usize,
}

/// One week of completion counts, Sunday through Saturday
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub days: Vec<DaySummary>,
    /// Active-habit count at the time of the query
    pub total_habits: usize,
    /// Largest daily count, floored at 1 for chart scaling
    pub max: usize,
}

/// Today's completion progress for the list header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub percent: u32,
}

/// Full-history completion record for a single habit
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReport {
    /// Every recorded day in ascending order with the habit's done flag
    pub entries: Vec<(NaiveDate, bool)>,
    pub successes: usize,
    pub percent: u32,
}

/// The Sunday-to-Saturday week containing `today`
pub fn week_window(today: NaiveDate) -> [NaiveDate; 7] {
    let sunday = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}

/// Count completions per day over the week containing `today`
pub fn weekly_summary(history: &HistoryMap, habits: &[Habit], today: NaiveDate) -> WeekSummary {
    let days: Vec<DaySummary> = week_window(today)
        .into_iter()
        .map(|day| {
            let done = history
                .get(&day)
                .map(|completions| completions.values().filter(|done| **done).count())
                .unwrap_or(0);
            DaySummary { day, done }
        })
        .collect();

    let max = days.iter().map(|d| d.done).max().unwrap_or(0).max(1);

    WeekSummary {
        days,
        total_habits: habits.len(),
        max,
    }
}

/// How much of today's list is done, as shown in the list header
pub fn today_progress(habits: &[Habit], completed: &CompletedMap) -> Progress {
    let total = habits.len();
    let done = completed.values().filter(|done| **done).count();
    let percent = if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as u32
    };

    Progress {
        done,
        total,
        percent,
    }
}

/// Walk the whole history for one habit, oldest day first
///
/// Days with no entry for the habit count as missed; the percentage is over
/// recorded days only, 0 when the history is empty.
pub fn habit_consistency(history: &HistoryMap, id: &HabitId) -> ConsistencyReport {
    let entries: Vec<(NaiveDate, bool)> = history
        .iter()
        .map(|(day, completions)| (*day, completions.get(id).copied().unwrap_or(false)))
        .collect();

    let successes = entries.iter().filter(|(_, done)| *done).count();
    let percent = if entries.is_empty() {
        0
    } else {
        ((successes as f64 / entries.len() as f64) * 100.0).round() as u32
    };

    ConsistencyReport {
        entries,
        successes,
        percent,
    }
}
