/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletedMap, HistoryMap),
/// the day clock, and the rollover/streak engine that drives every state
/// transition in the tracker.

pub mod habit;
pub mod state;
pub mod clock;
pub mod engine;

// Re-export public types for easy access
pub use habit::*;
pub use state::*;
pub use engine::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit title: {0}")]
    InvalidTitle(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Ambiguous habit selector '{selector}': matches {candidates}")]
    AmbiguousSelector { selector: String, candidates: String },

    #[error("Invalid reminder time: {0}")]
    InvalidReminderTime(String),
}
