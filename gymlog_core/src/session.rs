//! In-memory state for a set-logging session.
//!
//! `SessionState` is a pure state container: it holds the ordered set
//! numbers per exercise and the raw text buffers per (exercise, set). All
//! transitions are local; nothing is persisted until the validated batch is
//! handed to the commit engine.

use crate::{Error, ExerciseSnapshot, Result, ValidatedSet};
use std::collections::BTreeMap;

/// Raw text input held for one set until commit
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetBuffer {
    pub reps: String,
    pub weight: String,
}

/// Ordered set numbers and their buffers for one exercise
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ExerciseSets {
    /// Set numbers in display order; not required to be contiguous
    order: Vec<u32>,
    buffers: BTreeMap<u32, SetBuffer>,
}

/// The state of one logging session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    exercises: Vec<ExerciseSnapshot>,
    sets: BTreeMap<i64, ExerciseSets>,
}

impl SessionState {
    /// Seed the session from an occurrence's exercise snapshots
    ///
    /// Each exercise starts with set numbers `1..=sets`, its reps buffers
    /// prefilled with the default rep count and its weight buffers empty.
    pub fn seed(exercises: Vec<ExerciseSnapshot>) -> Self {
        let mut sets = BTreeMap::new();
        for exercise in &exercises {
            let mut entry = ExerciseSets::default();
            for set_number in 1..=exercise.sets {
                entry.order.push(set_number);
                entry.buffers.insert(
                    set_number,
                    SetBuffer {
                        reps: exercise.reps.to_string(),
                        weight: String::new(),
                    },
                );
            }
            sets.insert(exercise.id, entry);
        }
        Self { exercises, sets }
    }

    /// Snapshots of the exercises being logged, in session order
    pub fn exercises(&self) -> &[ExerciseSnapshot] {
        &self.exercises
    }

    /// Current set numbers of an exercise, in display order
    pub fn set_numbers(&self, exercise_id: i64) -> &[u32] {
        self.sets
            .get(&exercise_id)
            .map(|e| e.order.as_slice())
            .unwrap_or(&[])
    }

    /// Buffer contents for one set, if any input has been recorded
    pub fn buffer(&self, exercise_id: i64, set_number: u32) -> Option<&SetBuffer> {
        self.sets.get(&exercise_id)?.buffers.get(&set_number)
    }

    /// Append a new set numbered `max(existing) + 1` (or 1 if none)
    ///
    /// No buffer is initialized for the new set; its text stays empty until
    /// the user types.
    pub fn add_set(&mut self, exercise_id: i64) -> u32 {
        let entry = self.sets.entry(exercise_id).or_default();
        let next = entry.order.iter().max().map_or(1, |max| max + 1);
        entry.order.push(next);
        next
    }

    /// Remove a set from an exercise, dropping its buffers
    ///
    /// Remaining sets keep their numbers.
    pub fn delete_set(&mut self, exercise_id: i64, set_number: u32) {
        if let Some(entry) = self.sets.get_mut(&exercise_id) {
            entry.order.retain(|n| *n != set_number);
            entry.buffers.remove(&set_number);
        }
    }

    /// Replace the reps buffer for a set with raw text
    pub fn set_reps(&mut self, exercise_id: i64, set_number: u32, text: impl Into<String>) {
        let entry = self.sets.entry(exercise_id).or_default();
        entry.buffers.entry(set_number).or_default().reps = text.into();
    }

    /// Replace the weight buffer for a set with raw text
    pub fn set_weight(&mut self, exercise_id: i64, set_number: u32, text: impl Into<String>) {
        let entry = self.sets.entry(exercise_id).or_default();
        entry.buffers.entry(set_number).or_default().weight = text.into();
    }

    /// Validate every buffered set and produce the batch to persist
    ///
    /// A single upfront pass: weight is parsed with a comma decimal
    /// separator normalized to a period, reps as an integer; text that does
    /// not parse counts as zero. Any weight or rep count that is not
    /// strictly positive aborts the whole attempt.
    pub fn validate(&self) -> Result<Vec<ValidatedSet>> {
        let mut validated = Vec::new();

        for exercise in &self.exercises {
            for &set_number in self.set_numbers(exercise.id) {
                let buffer = self.buffer(exercise.id, set_number);
                let weight = buffer
                    .map(|b| b.weight.replace(',', "."))
                    .unwrap_or_default()
                    .parse::<f64>()
                    .unwrap_or(0.0);
                let reps = buffer
                    .map(|b| b.reps.as_str())
                    .unwrap_or_default()
                    .parse::<u32>()
                    .unwrap_or(0);

                if !(weight > 0.0) || reps == 0 {
                    return Err(Error::Validation(format!(
                        "set {} of {} needs reps and weight greater than zero",
                        set_number, exercise.name
                    )));
                }

                validated.push(ValidatedSet {
                    logged_exercise_id: exercise.id,
                    exercise_name: exercise.name.clone(),
                    set_number,
                    weight,
                    reps,
                    muscle_group: exercise.muscle_group.clone(),
                });
            }
        }

        tracing::debug!("Validated {} sets", validated.len());
        Ok(validated)
    }
}
