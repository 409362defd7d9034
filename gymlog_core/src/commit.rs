//! Atomic persistence of a validated logging session.

use crate::{Result, ValidatedSet};
use rusqlite::{params, Connection};

/// Persist a validated session as weight-log rows, all or nothing
///
/// Every (exercise, set) pair becomes one row. The inserts run inside a
/// single transaction; if any statement fails the transaction is rolled
/// back on drop and no partial records persist. Returns the number of rows
/// written.
pub fn commit_session(
    conn: &mut Connection,
    occurrence_id: i64,
    sets: &[ValidatedSet],
) -> Result<usize> {
    let tx = conn.transaction()?;

    for set in sets {
        tx.execute(
            "INSERT INTO weight_log
             (occurrence_id, logged_exercise_id, exercise_name, set_number,
              weight, reps, muscle_group)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                occurrence_id,
                set.logged_exercise_id,
                set.exercise_name,
                set.set_number,
                set.weight,
                set.reps,
                set.muscle_group
            ],
        )?;
    }

    tx.commit()?;
    tracing::info!(
        "Committed {} sets for occurrence {}",
        sets.len(),
        occurrence_id
    );
    Ok(sets.len())
}
