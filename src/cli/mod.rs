/// Command-line surface for the tracker
///
/// Each subcommand is one user action against the application core. The
/// day-rollover check runs before every action, since invoking the CLI is
/// this program's equivalent of the app coming to the foreground.

use clap::Subcommand;

use crate::{
    today_progress, AppError, DomainError, Habit, HabitApp, HabitId, KvStore, Notifier,
    ReminderTime, StateSnapshot, DAY_LABELS,
};

/// Width of the longest bar in the weekly chart
const CHART_WIDTH: usize = 20;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List habits with today's completion state
    List,

    /// Add a new habit
    Add {
        /// Habit title
        title: String,
    },

    /// Toggle a habit's completion for today
    Done {
        /// Habit id or unique title prefix
        habit: String,
    },

    /// Edit a habit's title
    Edit {
        /// Habit id or unique title prefix
        habit: String,
        /// New title
        title: String,
    },

    /// Delete a habit and all its completion records
    Delete {
        /// Habit id or unique title prefix
        habit: String,
    },

    /// Show this week's completion chart
    Stats,

    /// List archived habits
    Archive,

    /// Move an archived habit back to active tracking
    Unarchive {
        /// Habit id or unique title prefix
        habit: String,
    },

    /// Show a habit's full completion record
    Detail {
        /// Habit id or unique title prefix
        habit: String,
    },

    /// Set the daily reminder time (HH:MM)
    Reminder {
        /// Time of day, e.g. 07:30
        time: String,
    },

    /// Delete all habits, history, and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Which habit list a selector may match against
enum Pool {
    Active,
    Archived,
    Any,
}

/// Run one command against the application core
pub fn run<S: KvStore, N: Notifier>(
    app: &mut HabitApp<S, N>,
    command: Command,
) -> Result<(), AppError> {
    // Foreground pass first: roll the day over before acting on stale state
    let archived_now = app.on_enter_foreground()?;
    for habit in &archived_now {
        println!(
            "🎉 '{}' held a 7-day streak and moved to the archive",
            habit.title
        );
    }

    match command {
        Command::List => {
            let state = app.state();
            let progress = today_progress(&state.habits, &state.completed);
            println!(
                "{}/{} done today ({}%)",
                progress.done, progress.total, progress.percent
            );

            if state.habits.is_empty() {
                println!("No habits yet. Add one with: habix add <title>");
            }
            for habit in &state.habits {
                let mark = if state.completed.get(&habit.id).copied().unwrap_or(false) {
                    "✅"
                } else {
                    "⬜"
                };
                println!("{} {}  ({})", mark, habit.title, short_id(&habit.id));
            }
        }

        Command::Add { title } => {
            let habit = app.add_habit(&title)?;
            println!("Added '{}' ({})", habit.title, short_id(&habit.id));
        }

        Command::Done { habit } => {
            let id = resolve_habit(&app.state(), &habit, Pool::Active)?;
            let title = habit_title(&app.state(), &id);
            if app.toggle(&id)? {
                println!("✅ '{}' done today", title);
            } else {
                println!("⬜ '{}' unmarked for today", title);
            }
        }

        Command::Edit { habit, title } => {
            let id = resolve_habit(&app.state(), &habit, Pool::Active)?;
            app.rename_habit(&id, &title)?;
            println!("Renamed to '{}'", title);
        }

        Command::Delete { habit } => {
            let id = resolve_habit(&app.state(), &habit, Pool::Any)?;
            let title = habit_title(&app.state(), &id);
            app.delete_habit(&id)?;
            println!("Deleted '{}' and its completion records", title);
        }

        Command::Stats => print_stats(app),

        Command::Archive => {
            let state = app.state();
            if state.archived.is_empty() {
                println!("No archived habits yet.");
            }
            for habit in &state.archived {
                println!("📦 {}  ({})", habit.title, short_id(&habit.id));
            }
        }

        Command::Unarchive { habit } => {
            let id = resolve_habit(&app.state(), &habit, Pool::Archived)?;
            let habit = app.unarchive(&id)?;
            println!("'{}' is active again", habit.title);
        }

        Command::Detail { habit } => {
            let id = resolve_habit(&app.state(), &habit, Pool::Any)?;
            let (habit, report) = app.habit_detail(&id)?;

            println!("{}", habit.title);
            println!("Consistency: {}%", report.percent);
            for (day, done) in &report.entries {
                println!("{}: {}", day, if *done { "1/1 ✅" } else { "0/1 ❌" });
            }
        }

        Command::Reminder { time } => {
            let time = parse_reminder(&time)?;
            if app.set_reminder(time)? {
                println!("⏰ Daily reminder set for {}", time);
            } else {
                // One-time notice; the time stays saved and the app keeps working
                println!(
                    "Notification permission denied. Reminder saved as {} but inactive.",
                    time
                );
            }
        }

        Command::Reset { yes } => {
            if !yes {
                println!("This deletes every habit, all history, and all settings.");
                println!("Run again with --yes to confirm.");
                return Ok(());
            }
            app.reset_all()?;
            println!("All data reset.");
        }
    }

    Ok(())
}

/// Render the Sunday-to-Saturday chart and the per-day summary
fn print_stats<S: KvStore, N: Notifier>(app: &HabitApp<S, N>) {
    let summary = app.weekly_stats();

    println!("Weekly stats ({} active habits)", summary.total_habits);
    for (day, label) in summary.days.iter().zip(DAY_LABELS) {
        let bar = "█".repeat(day.done * CHART_WIDTH / summary.max);
        println!("{} {:<width$} {}", label, bar, day.done, width = CHART_WIDTH);
    }

    println!();
    println!("This week:");
    for day in &summary.days {
        println!("{}: {}/{}", day.day, day.done, summary.total_habits);
    }
}

/// Resolve a user-supplied selector to a habit id
///
/// Exact id match wins; otherwise a case-insensitive title prefix must match
/// exactly one habit in the pool.
fn resolve_habit(
    state: &StateSnapshot,
    selector: &str,
    pool: Pool,
) -> Result<HabitId, DomainError> {
    let candidates: Vec<&Habit> = match pool {
        Pool::Active => state.habits.iter().collect(),
        Pool::Archived => state.archived.iter().collect(),
        Pool::Any => state.habits.iter().chain(state.archived.iter()).collect(),
    };

    let selector = selector.trim();
    if let Some(habit) = candidates.iter().find(|h| h.id.as_str() == selector) {
        return Ok(habit.id.clone());
    }

    let prefix = selector.to_lowercase();
    let matches: Vec<&&Habit> = candidates
        .iter()
        .filter(|h| h.title.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(DomainError::HabitNotFound(selector.to_string())),
        1 => Ok(matches[0].id.clone()),
        _ => Err(DomainError::AmbiguousSelector {
            selector: selector.to_string(),
            candidates: matches
                .iter()
                .map(|h| h.title.clone())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn habit_title(state: &StateSnapshot, id: &HabitId) -> String {
    state
        .find_any(id)
        .map(|h| h.title.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Parse "HH:MM" into a reminder time
fn parse_reminder(raw: &str) -> Result<ReminderTime, DomainError> {
    let (hour, minute) = raw
        .split_once(':')
        .ok_or_else(|| DomainError::InvalidReminderTime(format!("expected HH:MM, got {:?}", raw)))?;

    let hour: u32 = hour
        .trim()
        .parse()
        .map_err(|_| DomainError::InvalidReminderTime(format!("bad hour in {:?}", raw)))?;
    let minute: u32 = minute
        .trim()
        .parse()
        .map_err(|_| DomainError::InvalidReminderTime(format!("bad minute in {:?}", raw)))?;

    ReminderTime::new(hour, minute)
}

/// First chunk of an id, enough to disambiguate in a personal list
fn short_id(id: &HabitId) -> &str {
    let s = id.as_str();
    &s[..s.len().min(8)]
}
