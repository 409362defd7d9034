//! Workout import/export serialization.
//!
//! A workout's full structure round-trips through a portable JSON document:
//! `{name, exercises: [{name, sets, reps, muscleGroup?}]}`. Import always
//! allocates fresh ids so documents from another installation can never
//! collide with local workouts.

use crate::{db, Error, Result, Workout};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Portable workout document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDocument {
    pub name: String,
    pub exercises: Vec<ExerciseDocument>,
}

/// One exercise within a portable document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseDocument {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(
        rename = "muscleGroup",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub muscle_group: Option<String>,
}

impl From<&Workout> for WorkoutDocument {
    fn from(workout: &Workout) -> Self {
        WorkoutDocument {
            name: workout.name.clone(),
            exercises: workout
                .exercises
                .iter()
                .map(|e| ExerciseDocument {
                    name: e.name.clone(),
                    sets: e.sets,
                    reps: e.reps,
                    muscle_group: e.muscle_group.clone(),
                })
                .collect(),
        }
    }
}

/// Serialize a workout definition to its portable document text
///
/// The destination (file, share sheet, stdout) is the caller's concern.
pub fn export_workout(conn: &Connection, workout_id: i64) -> Result<String> {
    let workout = db::workout_by_id(conn, workout_id)?;
    let document = WorkoutDocument::from(&workout);
    let text = serde_json::to_string_pretty(&document)?;
    tracing::info!(
        "Exported workout {} ({}, {} exercises)",
        workout.id,
        workout.name,
        workout.exercises.len()
    );
    Ok(text)
}

/// Parse portable document text, with structural errors surfaced explicitly
pub fn parse_document(text: &str) -> Result<WorkoutDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::MalformedDocument(format!("not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| Error::MalformedDocument("document is not an object".into()))?;

    match object.get("name") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(Error::MalformedDocument("'name' is not a string".into())),
        None => return Err(Error::MalformedDocument("missing 'name'".into())),
    }

    match object.get("exercises") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(Error::MalformedDocument("'exercises' is not a list".into())),
        None => return Err(Error::MalformedDocument("missing 'exercises'".into())),
    }

    serde_json::from_value(value).map_err(|e| Error::MalformedDocument(e.to_string()))
}

/// Import a portable document as a new workout definition
///
/// The definition and all its exercises are inserted inside one transaction
/// under fresh engine-assigned ids, preserving document order. Returns the
/// new workout id.
pub fn import_workout(conn: &mut Connection, text: &str) -> Result<i64> {
    let document = parse_document(text)?;

    let tx = conn.transaction()?;
    let workout_id = db::insert_workout(&tx, &document.name)?;
    for exercise in &document.exercises {
        db::insert_exercise(
            &tx,
            workout_id,
            &exercise.name,
            exercise.sets,
            exercise.reps,
            exercise.muscle_group.as_deref(),
        )?;
    }
    tx.commit()?;

    tracing::info!(
        "Imported workout {} ({}, {} exercises)",
        workout_id,
        document.name,
        document.exercises.len()
    );
    Ok(workout_id)
}
