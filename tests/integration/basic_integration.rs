/// End-to-end tests driving the application core against a real store
use chrono::{Duration, NaiveDate};
use habix::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn open_app(path: std::path::PathBuf) -> HabitApp<SqliteStore, LocalNotifier> {
        let store = SqliteStore::new(path).expect("Failed to open store");
        HabitApp::new(store, LocalNotifier::new())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Seed the store so the given habit was done each of the 7 days ending
    /// yesterday, with the marker still on yesterday
    fn seed_week_long_streak(path: std::path::PathBuf, id: &str, title: &str) {
        let repo = Repository::new(SqliteStore::new(path).expect("store"));
        let mut state = StateSnapshot::default();
        state
            .habits
            .push(Habit::from_existing(HabitId::from(id), title.to_string()));

        let yesterday = clock::today() - Duration::days(1);
        for offset in 0..7 {
            let mut completions = CompletedMap::new();
            completions.insert(HabitId::from(id), true);
            state.history.insert(yesterday - Duration::days(offset), completions);
        }
        state.last_reset = Some(yesterday);

        repo.save_state(&state).expect("seed");
    }

    #[test]
    fn test_add_toggle_and_progress_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");

        let run = app.add_habit("Run").expect("add");
        let read = app.add_habit("Read").expect("add");

        assert!(app.toggle(&run.id).expect("toggle"));

        let state = app.state();
        let progress = today_progress(&state.habits, &state.completed);
        assert_eq!((progress.done, progress.total), (1, 2));
        assert_eq!(state.completed.get(&read.id), None);

        // Today's history mirror never diverges from the completion map
        assert_eq!(state.history[&clock::today()], state.completed);

        // Toggling off keeps them equal too
        assert!(!app.toggle(&run.id).expect("toggle"));
        let state = app.state();
        assert_eq!(state.history[&clock::today()], state.completed);
        assert_eq!(state.completed[&run.id], false);
    }

    #[test]
    fn test_delete_cascades_across_all_documents() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");

        let run = app.add_habit("Run").expect("add");
        let read = app.add_habit("Read").expect("add");
        app.toggle(&run.id).expect("toggle");
        app.toggle(&read.id).expect("toggle");

        app.delete_habit(&run.id).expect("delete");

        let state = app.state();
        assert!(state.find_any(&run.id).is_none());
        assert!(!state.completed.contains_key(&run.id));
        assert!(state
            .history
            .values()
            .all(|completions| !completions.contains_key(&run.id)));
        // The other habit's records survive
        assert!(state.history[&clock::today()].contains_key(&read.id));
    }

    #[test]
    fn test_deleting_the_only_habit_prunes_its_days() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");

        let run = app.add_habit("Run").expect("add");
        app.toggle(&run.id).expect("toggle");
        app.delete_habit(&run.id).expect("delete");

        assert!(app.state().history.is_empty());
    }

    #[test]
    fn test_week_long_streak_archives_on_rollover() {
        let example = [
            // Done 2024-01-01 through 2024-01-07, rolling over on the 8th
            day(2024, 1, 1),
            day(2024, 1, 2),
            day(2024, 1, 3),
            day(2024, 1, 4),
            day(2024, 1, 5),
            day(2024, 1, 6),
            day(2024, 1, 7),
        ];
        let mut state = StateSnapshot::default();
        state
            .habits
            .push(Habit::from_existing(HabitId::from("1"), "Run".to_string()));
        for d in example {
            let mut completions = CompletedMap::new();
            completions.insert(HabitId::from("1"), true);
            state.history.insert(d, completions);
        }
        state.last_reset = Some(day(2024, 1, 7));

        let outcome = run_rollover(state, day(2024, 1, 8));

        assert_eq!(outcome.archived_now.len(), 1);
        assert_eq!(outcome.archived_now[0].id, HabitId::from("1"));
        assert!(outcome.state.habits.is_empty());
        assert_eq!(outcome.state.archived[0].title, "Run");
    }

    #[test]
    fn test_rollover_through_the_app_surface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        seed_week_long_streak(temp_file.path().to_path_buf(), "1", "Run");

        let mut app = open_app(temp_file.path().to_path_buf());
        let archived_now = app.on_enter_foreground().expect("foreground");

        assert_eq!(archived_now.len(), 1);
        assert_eq!(archived_now[0].title, "Run");

        let state = app.state();
        assert!(state.habits.is_empty());
        assert_eq!(state.archived.len(), 1);
        assert_eq!(state.last_reset, Some(clock::today()));
        assert!(state.completed.is_empty());
    }

    #[test]
    fn test_foreground_is_idempotent_within_a_day() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());

        app.on_enter_foreground().expect("foreground");
        app.add_habit("Run").expect("add");

        let before = app.state();
        assert!(app.on_enter_foreground().expect("foreground").is_empty());
        assert!(app.on_enter_foreground().expect("foreground").is_empty());
        assert_eq!(app.state(), before);
    }

    #[test]
    fn test_unarchive_restores_and_preserves_history() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        seed_week_long_streak(temp_file.path().to_path_buf(), "1", "Run");

        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");
        let history_before = app.state().history.clone();

        let habit = app.unarchive(&HabitId::from("1")).expect("unarchive");
        assert_eq!(habit.title, "Run");

        let state = app.state();
        assert!(state.find_active(&HabitId::from("1")).is_some());
        assert!(state.find_archived(&HabitId::from("1")).is_none());
        assert_eq!(state.history, history_before);
    }

    #[test]
    fn test_habit_id_lives_in_exactly_one_list() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        seed_week_long_streak(temp_file.path().to_path_buf(), "1", "Run");

        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");

        let state = app.state();
        let active = state.find_active(&HabitId::from("1")).is_some();
        let archived = state.find_archived(&HabitId::from("1")).is_some();
        assert!(!active && archived);

        app.unarchive(&HabitId::from("1")).expect("unarchive");
        let state = app.state();
        let active = state.find_active(&HabitId::from("1")).is_some();
        let archived = state.find_archived(&HabitId::from("1")).is_some();
        assert!(active && !archived);
    }

    #[test]
    fn test_database_persistence_across_instances() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let habit = {
            let mut app = open_app(db_path.clone());
            app.on_enter_foreground().expect("foreground");
            app.add_habit("Run").expect("add")
        };

        let mut app = open_app(db_path);
        app.on_enter_foreground().expect("foreground");

        let state = app.state();
        assert_eq!(state.habits.len(), 1);
        assert_eq!(state.habits[0], habit);
    }

    #[test]
    fn test_reminder_survives_and_degradation_is_non_fatal() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());

        let time = ReminderTime::new(7, 30).unwrap();
        assert!(app.set_reminder(time).expect("set_reminder"));
        assert_eq!(app.reminder(), Some(time));

        // A scheduler that always refuses must not fail the operation
        struct DeniedNotifier;
        impl Notifier for DeniedNotifier {
            fn schedule_daily(&mut self, _: u32, _: u32) -> Result<(), NotifyError> {
                Err(NotifyError::PermissionDenied)
            }
            fn cancel_all(&mut self) -> Result<(), NotifyError> {
                Err(NotifyError::PermissionDenied)
            }
        }

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("store");
        let mut app = HabitApp::new(store, DeniedNotifier);

        let scheduled = app.set_reminder(time).expect("set_reminder");
        assert!(!scheduled);
        // The time is persisted even though scheduling degraded
        assert_eq!(app.reminder(), Some(time));
    }

    #[test]
    fn test_reset_all_clears_every_document() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut app = open_app(temp_file.path().to_path_buf());
        app.on_enter_foreground().expect("foreground");

        let run = app.add_habit("Run").expect("add");
        app.toggle(&run.id).expect("toggle");
        app.set_reminder(ReminderTime::new(7, 30).unwrap())
            .expect("set_reminder");

        app.reset_all().expect("reset");

        let state = app.state();
        assert!(state.habits.is_empty());
        assert!(state.completed.is_empty());
        assert!(state.history.is_empty());
        assert!(state.archived.is_empty());
        assert_eq!(state.last_reset, None);
        assert_eq!(app.reminder(), None);
    }
}
