//! Built-in catalog of muscle-group tags.
//!
//! Tags are what gets stored on exercises and weight-log rows; labels are
//! what the CLI displays. Unknown tags are kept as-is on import so documents
//! from other installations stay lossless.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A known muscle group with its stored tag and display label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MuscleGroup {
    pub tag: &'static str,
    pub label: &'static str,
}

/// The built-in muscle groups, in display order
pub const MUSCLE_GROUPS: &[MuscleGroup] = &[
    MuscleGroup { tag: "chest", label: "Chest" },
    MuscleGroup { tag: "back", label: "Back" },
    MuscleGroup { tag: "shoulders", label: "Shoulders" },
    MuscleGroup { tag: "biceps", label: "Biceps" },
    MuscleGroup { tag: "triceps", label: "Triceps" },
    MuscleGroup { tag: "forearms", label: "Forearms" },
    MuscleGroup { tag: "abs", label: "Abs" },
    MuscleGroup { tag: "legs", label: "Legs" },
    MuscleGroup { tag: "glutes", label: "Glutes" },
    MuscleGroup { tag: "hamstrings", label: "Hamstrings" },
    MuscleGroup { tag: "calves", label: "Calves" },
    MuscleGroup { tag: "quads", label: "Quads" },
];

/// Cached tag → label lookup, built once and reused across all operations
static LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    MUSCLE_GROUPS.iter().map(|mg| (mg.tag, mg.label)).collect()
});

/// Display label for a tag, if it is one of the built-in groups
pub fn label_for(tag: &str) -> Option<&'static str> {
    LABELS.get(tag).copied()
}

/// Whether a tag is one of the built-in groups
pub fn is_known(tag: &str) -> bool {
    LABELS.contains_key(tag)
}
