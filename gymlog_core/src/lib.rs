#![forbid(unsafe_code)]

//! Core domain model and business logic for the gymlog workout tracker.
//!
//! This crate provides:
//! - Domain types (workouts, exercises, occurrences, weight logs)
//! - SQLite storage and scheduling
//! - The set-logging session state machine and validator
//! - The atomic commit engine
//! - Workout import/export serialization

pub mod types;
pub mod error;
pub mod muscles;
pub mod config;
pub mod logging;
pub mod db;
pub mod session;
pub mod loader;
pub mod commit;
pub mod share;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use session::SessionState;
pub use loader::{pending_occurrences, start_session};
pub use commit::commit_session;
pub use share::{export_workout, import_workout, WorkoutDocument};
