//! Core domain types for the gymlog workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout definitions and their exercises
//! - Scheduled occurrences and per-occurrence exercise snapshots
//! - Persisted weight-log entries
//! - Validated set batches produced by the session validator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Workout Definition Types
// ============================================================================

/// A workout definition with its ordered exercise list
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub exercises: Vec<ExercisePlan>,
}

/// One exercise within a workout definition
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExercisePlan {
    pub id: i64,
    pub name: String,
    /// Target number of sets
    pub sets: u32,
    /// Target repetitions per set
    pub reps: u32,
    pub muscle_group: Option<String>,
}

// ============================================================================
// Scheduling Types
// ============================================================================

/// One scheduled instance of performing a workout on a specific date
///
/// The workout name is denormalized at scheduling time so that later edits
/// to the definition do not alter what was scheduled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    pub id: i64,
    pub workout_id: i64,
    pub workout_name: String,
    pub day_label: String,
    pub scheduled_for: NaiveDate,
}

/// Frozen per-occurrence copy of an exercise's scheduled parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSnapshot {
    pub id: i64,
    pub occurrence_id: i64,
    pub name: String,
    /// Default set count used to seed the logging session
    pub sets: u32,
    /// Default rep count used to prefill the reps buffer
    pub reps: u32,
    pub muscle_group: Option<String>,
}

// ============================================================================
// Weight Log Types
// ============================================================================

/// A persisted weight-log row, immutable once written
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightLogEntry {
    pub id: i64,
    pub occurrence_id: i64,
    pub logged_exercise_id: i64,
    /// Denormalized for historical stability
    pub exercise_name: String,
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
    pub muscle_group: Option<String>,
}

/// One (exercise, set) pair that passed validation and is ready to persist
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSet {
    pub logged_exercise_id: i64,
    pub exercise_name: String,
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
    pub muscle_group: Option<String>,
}
