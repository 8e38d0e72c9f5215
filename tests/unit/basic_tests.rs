/// Basic unit tests to verify core functionality
use habix::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new("Morning Run".to_string());

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.title, "Morning Run");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Habit::new("".to_string()).is_err());
        assert!(Habit::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_store_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(store.is_ok());
    }

    #[test]
    fn test_app_creation_and_first_foreground() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("store");
        let mut app = HabitApp::new(store, LocalNotifier::new());

        // First foreground pass adopts today as the marker without archiving
        let archived = app.on_enter_foreground().expect("foreground");
        assert!(archived.is_empty());
        assert_eq!(app.state().last_reset, Some(clock::today()));
    }

    #[test]
    fn test_streak_constant_is_a_week() {
        assert_eq!(ARCHIVE_STREAK_DAYS, 7);
    }

    #[test]
    fn test_reminder_time_bounds() {
        assert!(ReminderTime::new(23, 59).is_ok());
        assert!(ReminderTime::new(24, 0).is_err());
    }
}
