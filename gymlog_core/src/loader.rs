//! Session loading: pending occurrences, resolution and seeding.
//!
//! An occurrence is loggable while it has no weight-log rows and its
//! scheduled date is not in the future. Logging is one-shot: the first
//! committed session removes the occurrence from the pending listing.

use crate::{Error, ExerciseSnapshot, Occurrence, Result, SessionState};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

/// List the loggable occurrences as of `today`, newest first
///
/// Excludes occurrences that already have at least one weight-log row and
/// occurrences scheduled after `today`.
pub fn pending_occurrences(conn: &Connection, today: NaiveDate) -> Result<Vec<Occurrence>> {
    let mut stmt = conn.prepare(
        "SELECT id, workout_id, workout_name, day_label, scheduled_for
         FROM occurrences
         WHERE id NOT IN (SELECT DISTINCT occurrence_id FROM weight_log)
           AND scheduled_for <= ?1
         ORDER BY scheduled_for DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![today], map_occurrence)?;
    let occurrences = rows.collect::<rusqlite::Result<Vec<_>>>()?;

    tracing::debug!("{} pending occurrences as of {}", occurrences.len(), today);
    Ok(occurrences)
}

/// Resolve an occurrence by id
pub fn occurrence_by_id(conn: &Connection, id: i64) -> Result<Occurrence> {
    conn.query_row(
        "SELECT id, workout_id, workout_name, day_label, scheduled_for
         FROM occurrences WHERE id = ?1",
        params![id],
        map_occurrence,
    )
    .optional()?
    .ok_or(Error::OccurrenceNotFound(id))
}

/// Load the exercise snapshots of an occurrence, in scheduled order
pub fn snapshots_for(conn: &Connection, occurrence_id: i64) -> Result<Vec<ExerciseSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, occurrence_id, name, sets, reps, muscle_group
         FROM logged_exercises WHERE occurrence_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![occurrence_id], |row| {
        Ok(ExerciseSnapshot {
            id: row.get(0)?,
            occurrence_id: row.get(1)?,
            name: row.get(2)?,
            sets: row.get(3)?,
            reps: row.get(4)?,
            muscle_group: row.get(5)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Resolve an occurrence and seed a logging session from its snapshots
pub fn start_session(conn: &Connection, occurrence_id: i64) -> Result<(Occurrence, SessionState)> {
    let occurrence = occurrence_by_id(conn, occurrence_id)?;
    let snapshots = snapshots_for(conn, occurrence_id)?;
    tracing::info!(
        "Starting session for occurrence {} ({}, {} exercises)",
        occurrence.id,
        occurrence.workout_name,
        snapshots.len()
    );
    Ok((occurrence, SessionState::seed(snapshots)))
}

/// Relative label for an occurrence date, if it is adjacent to `today`
pub fn relative_label(date: NaiveDate, today: NaiveDate) -> Option<&'static str> {
    let delta = (date - today).num_days();
    match delta {
        0 => Some("Today"),
        -1 => Some("Yesterday"),
        1 => Some("Tomorrow"),
        _ => None,
    }
}

fn map_occurrence(row: &rusqlite::Row<'_>) -> rusqlite::Result<Occurrence> {
    Ok(Occurrence {
        id: row.get(0)?,
        workout_id: row.get(1)?,
        workout_name: row.get(2)?,
        day_label: row.get(3)?,
        scheduled_for: row.get(4)?,
    })
}
