//! Integration tests for the gymlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout import/export round-trips
//! - Scheduling and the pending listing
//! - The interactive set-logging flow and its atomic commit

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::cargo_bin("gymlog").expect("Failed to find gymlog binary")
}

/// Write the standard test workout document and return its path
fn write_document(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("leg_day.json");
    fs::write(
        &path,
        r#"{
            "name": "Leg Day",
            "exercises": [
                {"name": "Squat", "sets": 3, "reps": 10, "muscleGroup": "quads"},
                {"name": "Row", "sets": 1, "reps": 10, "muscleGroup": "back"}
            ]
        }"#,
    )
    .expect("Failed to write document");
    path
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout scheduling and set-logging tracker",
        ));
}

#[test]
fn test_import_and_list() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported \"Leg Day\" as workout 1"));

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Leg Day"))
        .stdout(predicate::str::contains("Squat - 3x10 [Quads]"))
        .stdout(predicate::str::contains("Row - 1x10 [Back]"));
}

#[test]
fn test_import_malformed_document_fails() {
    let temp_dir = setup_test_dir();
    let document = temp_dir.path().join("broken.json");
    fs::write(&document, r#"{"name": "Ghost"}"#).unwrap();

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed workout document"));

    // Nothing was inserted
    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts defined"));
}

#[test]
fn test_export_import_roundtrip() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);
    let exported = temp_dir.path().join("exported.json");

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("export")
        .arg("1")
        .arg("--output")
        .arg(&exported)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&exported).unwrap()).unwrap();
    assert_eq!(value["name"], "Leg Day");
    assert_eq!(value["exercises"][0]["muscleGroup"], "quads");

    // Re-import lands under a fresh id
    cli()
        .arg("import")
        .arg(&exported)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("as workout 2"));

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Leg Day"))
        .stdout(predicate::str::contains("[2] Leg Day"));
}

#[test]
fn test_schedule_and_pending() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("schedule")
        .arg("1")
        .arg("--date")
        .arg(today())
        .arg("--day")
        .arg("Leg Day")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scheduled occurrence 1"));

    // A future occurrence must not show up as pending
    let future = (chrono::Local::now().date_naive() + chrono::Duration::days(5)).to_string();
    cli()
        .arg("schedule")
        .arg("1")
        .arg("--date")
        .arg(&future)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("pending")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Leg Day - Leg Day (Today)"))
        .stdout(predicate::str::contains("[2]").not());
}

#[test]
fn test_log_full_flow() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("schedule")
        .arg("1")
        .arg("--date")
        .arg(today())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    // Squat: delete set 2, add a set (becomes 4), fill sets 1, 3, 4.
    // Row: fill its single set.
    cli()
        .arg("log")
        .arg("1")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin(
            "del 2\n\
             add\n\
             1 8 100,5\n\
             3 8 100,5\n\
             4 8 100,5\n\
             done\n\
             1 8 100,5\n\
             done\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 4 sets for Leg Day"));

    cli()
        .arg("history")
        .arg("1")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat set 1: 8 reps at 100.5 kg"))
        .stdout(predicate::str::contains("Squat set 3: 8 reps at 100.5 kg"))
        .stdout(predicate::str::contains("Squat set 4: 8 reps at 100.5 kg"))
        .stdout(predicate::str::contains("Row set 1: 8 reps at 100.5 kg"))
        .stdout(predicate::str::contains("Squat set 2").not());

    // Logging is one-shot: the occurrence left the pending listing
    cli()
        .arg("pending")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts waiting to be logged"));
}

#[test]
fn test_log_validation_failure_persists_nothing() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("schedule")
        .arg("1")
        .arg("--date")
        .arg(today())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    // No weights entered; the seeded buffers alone must not commit
    cli()
        .arg("log")
        .arg("1")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("done\ndone\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));

    cli()
        .arg("history")
        .arg("1")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing logged yet"));

    // Still pending
    cli()
        .arg("pending")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Leg Day"));
}

#[test]
fn test_log_unknown_occurrence_falls_back_to_pending() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("log")
        .arg("99")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Occurrence 99 not found"))
        .stdout(predicate::str::contains("No workouts waiting to be logged"));
}

#[test]
fn test_delete_workout_cascades_to_pending() {
    let temp_dir = setup_test_dir();
    let document = write_document(&temp_dir);

    cli()
        .arg("import")
        .arg(&document)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("schedule")
        .arg("1")
        .arg("--date")
        .arg(today())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("delete")
        .arg("1")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("pending")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts waiting to be logged"));
}
