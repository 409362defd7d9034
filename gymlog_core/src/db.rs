//! SQLite storage layer.
//!
//! This module owns the schema and the workout/scheduling queries. Session
//! loading lives in `loader` and weight-log writes in `commit`; both operate
//! on the connections opened here.

use crate::{Error, ExercisePlan, Result, WeightLogEntry, Workout};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Database file name inside the data directory
pub const DB_FILE_NAME: &str = "gymlog.sqlite";

/// Open (creating if needed) the database at the given path
///
/// Enables foreign-key enforcement and initializes the schema.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    init_db(&conn)?;
    tracing::debug!("Opened database at {:?}", path);
    Ok(conn)
}

/// Open an in-memory database with the schema initialized
///
/// Used by tests and available for ephemeral runs.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    init_db(&conn)?;
    Ok(conn)
}

/// Initialize the database tables if they don't exist
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            sets INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            muscle_group TEXT
        );

        CREATE TABLE IF NOT EXISTS occurrences (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
            workout_name TEXT NOT NULL,
            day_label TEXT NOT NULL,
            scheduled_for TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS logged_exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            occurrence_id INTEGER NOT NULL REFERENCES occurrences(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            sets INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            muscle_group TEXT
        );

        CREATE TABLE IF NOT EXISTS weight_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            occurrence_id INTEGER NOT NULL REFERENCES occurrences(id) ON DELETE CASCADE,
            logged_exercise_id INTEGER NOT NULL,
            exercise_name TEXT NOT NULL,
            set_number INTEGER NOT NULL,
            weight REAL NOT NULL,
            reps INTEGER NOT NULL,
            muscle_group TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_exercises_workout
            ON exercises(workout_id);
        CREATE INDEX IF NOT EXISTS idx_occurrences_date
            ON occurrences(scheduled_for);
        CREATE INDEX IF NOT EXISTS idx_logged_exercises_occurrence
            ON logged_exercises(occurrence_id);
        CREATE INDEX IF NOT EXISTS idx_weight_log_occurrence
            ON weight_log(occurrence_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_weight_log_set
            ON weight_log(logged_exercise_id, set_number);",
    )?;

    Ok(())
}

// ============================================================================
// Workout Definitions
// ============================================================================

/// Insert a new workout definition, returning its engine-assigned id
pub fn insert_workout(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO workouts (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Insert an exercise at the end of a workout's exercise list
pub fn insert_exercise(
    conn: &Connection,
    workout_id: i64,
    name: &str,
    sets: u32,
    reps: u32,
    muscle_group: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO exercises (workout_id, name, sets, reps, muscle_group)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![workout_id, name, sets, reps, muscle_group],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Change the target sets and reps of an exercise within its definition
///
/// Does not touch snapshots of already-scheduled occurrences.
pub fn update_exercise_targets(
    conn: &Connection,
    exercise_id: i64,
    sets: u32,
    reps: u32,
) -> Result<()> {
    let updated = conn.execute(
        "UPDATE exercises SET sets = ?2, reps = ?3 WHERE id = ?1",
        params![exercise_id, sets, reps],
    )?;
    if updated == 0 {
        return Err(Error::ExerciseNotFound(exercise_id));
    }
    Ok(())
}

fn exercises_for(conn: &Connection, workout_id: i64) -> Result<Vec<ExercisePlan>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, sets, reps, muscle_group
         FROM exercises WHERE workout_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![workout_id], |row| {
        Ok(ExercisePlan {
            id: row.get(0)?,
            name: row.get(1)?,
            sets: row.get(2)?,
            reps: row.get(3)?,
            muscle_group: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Load a workout definition with its ordered exercises
pub fn workout_by_id(conn: &Connection, id: i64) -> Result<Workout> {
    let header = conn
        .query_row(
            "SELECT id, name FROM workouts WHERE id = ?1",
            params![id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    let (id, name) = header.ok_or(Error::WorkoutNotFound(id))?;
    let exercises = exercises_for(conn, id)?;
    Ok(Workout {
        id,
        name,
        exercises,
    })
}

/// List all workout definitions with their exercises, oldest first
pub fn list_workouts(conn: &Connection) -> Result<Vec<Workout>> {
    let mut stmt = conn.prepare("SELECT id, name FROM workouts ORDER BY id")?;
    let headers = stmt
        .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut workouts = Vec::with_capacity(headers.len());
    for (id, name) in headers {
        let exercises = exercises_for(conn, id)?;
        workouts.push(Workout {
            id,
            name,
            exercises,
        });
    }
    Ok(workouts)
}

/// Delete a workout definition, cascading to its occurrences
pub fn delete_workout(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(Error::WorkoutNotFound(id));
    }
    tracing::info!("Deleted workout {}", id);
    Ok(())
}

// ============================================================================
// Scheduling
// ============================================================================

/// Schedule a workout for a date, snapshotting its exercises
///
/// The occurrence row and its exercise snapshots are inserted in one
/// transaction. The snapshots freeze the exercises as they are now; later
/// edits to the definition do not reach them.
pub fn schedule_workout(
    conn: &mut Connection,
    workout_id: i64,
    date: NaiveDate,
    day_label: &str,
) -> Result<i64> {
    let workout = workout_by_id(conn, workout_id)?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO occurrences (workout_id, workout_name, day_label, scheduled_for)
         VALUES (?1, ?2, ?3, ?4)",
        params![workout.id, workout.name, day_label, date],
    )?;
    let occurrence_id = tx.last_insert_rowid();

    for exercise in &workout.exercises {
        tx.execute(
            "INSERT INTO logged_exercises (occurrence_id, name, sets, reps, muscle_group)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                occurrence_id,
                exercise.name,
                exercise.sets,
                exercise.reps,
                exercise.muscle_group
            ],
        )?;
    }
    tx.commit()?;

    tracing::info!(
        "Scheduled workout {} ({}) for {} as occurrence {}",
        workout.id,
        workout.name,
        date,
        occurrence_id
    );
    Ok(occurrence_id)
}

// ============================================================================
// Weight Log
// ============================================================================

/// Load the persisted weight-log rows of an occurrence, in insertion order
pub fn weight_log_for(conn: &Connection, occurrence_id: i64) -> Result<Vec<WeightLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, occurrence_id, logged_exercise_id, exercise_name,
                set_number, weight, reps, muscle_group
         FROM weight_log WHERE occurrence_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![occurrence_id], |row| {
        Ok(WeightLogEntry {
            id: row.get(0)?,
            occurrence_id: row.get(1)?,
            logged_exercise_id: row.get(2)?,
            exercise_name: row.get(3)?,
            set_number: row.get(4)?,
            weight: row.get(5)?,
            reps: row.get(6)?,
            muscle_group: row.get(7)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
