use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use gymlog_core::{
    commit_session, db, export_workout, import_workout, loader, muscles, Config, Error,
    ExerciseSnapshot, Occurrence, Result, SessionState,
};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(about = "Workout scheduling and set-logging tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List workout definitions and their exercises
    List,

    /// Import a workout from a portable document file
    Import {
        /// Path to the document
        file: PathBuf,
    },

    /// Export a workout as a portable document
    Export {
        /// Workout id (see `list`)
        workout_id: i64,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete a workout definition (removes its scheduled occurrences too)
    Delete {
        /// Workout id (see `list`)
        workout_id: i64,
    },

    /// Schedule a workout for a date
    Schedule {
        /// Workout id (see `list`)
        workout_id: i64,

        /// Date to perform the workout (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Day label, e.g. "Push Day" (defaults to the weekday name)
        #[arg(long)]
        day: Option<String>,
    },

    /// List occurrences waiting to be logged
    Pending,

    /// Log weights and reps for an occurrence
    Log {
        /// Occurrence id (omit to pick from the pending list)
        occurrence_id: Option<i64>,
    },

    /// Show the logged sets of an occurrence
    History {
        /// Occurrence id
        occurrence_id: i64,
    },
}

fn main() {
    // Initialize logging
    gymlog_core::logging::init();

    if let Err(e) = run() {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let db_path = data_dir.join(db::DB_FILE_NAME);
    tracing::debug!("Using database at {:?}", db_path);
    let mut conn = db::open_db(&db_path)?;

    match cli.command {
        Commands::List => cmd_list(&conn),
        Commands::Import { file } => cmd_import(&mut conn, &file),
        Commands::Export { workout_id, output } => cmd_export(&conn, workout_id, output),
        Commands::Delete { workout_id } => cmd_delete(&conn, workout_id),
        Commands::Schedule {
            workout_id,
            date,
            day,
        } => cmd_schedule(&mut conn, workout_id, date, day),
        Commands::Pending => cmd_pending(&conn, &config),
        Commands::Log { occurrence_id } => cmd_log(&mut conn, occurrence_id, &config),
        Commands::History { occurrence_id } => cmd_history(&conn, occurrence_id, &config),
    }
}

fn cmd_list(conn: &Connection) -> Result<()> {
    let workouts = db::list_workouts(conn)?;
    if workouts.is_empty() {
        println!("No workouts defined. Import one with `gymlog import <file>`.");
        return Ok(());
    }

    for workout in workouts {
        println!("[{}] {}", workout.id, workout.name);
        for exercise in &workout.exercises {
            println!(
                "    {} - {}x{}{}",
                exercise.name,
                exercise.sets,
                exercise.reps,
                muscle_suffix(exercise.muscle_group.as_deref())
            );
        }
    }
    Ok(())
}

fn cmd_import(conn: &mut Connection, file: &PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let workout_id = import_workout(conn, &text)?;
    let workout = db::workout_by_id(conn, workout_id)?;
    println!(
        "✓ Imported \"{}\" as workout {} ({} exercises)",
        workout.name,
        workout.id,
        workout.exercises.len()
    );
    Ok(())
}

fn cmd_export(conn: &Connection, workout_id: i64, output: Option<PathBuf>) -> Result<()> {
    let text = export_workout(conn, workout_id)?;
    match output {
        Some(path) => {
            std::fs::write(&path, &text)?;
            println!("✓ Exported workout {} to {}", workout_id, path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn cmd_delete(conn: &Connection, workout_id: i64) -> Result<()> {
    db::delete_workout(conn, workout_id)?;
    println!("✓ Deleted workout {}", workout_id);
    Ok(())
}

fn cmd_schedule(
    conn: &mut Connection,
    workout_id: i64,
    date: NaiveDate,
    day: Option<String>,
) -> Result<()> {
    let day_label = day.unwrap_or_else(|| date.format("%A").to_string());
    let occurrence_id = db::schedule_workout(conn, workout_id, date, &day_label)?;
    println!(
        "✓ Scheduled occurrence {} for {} ({})",
        occurrence_id, date, day_label
    );
    Ok(())
}

fn cmd_pending(conn: &Connection, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let pending = loader::pending_occurrences(conn, today)?;
    if pending.is_empty() {
        println!("No workouts waiting to be logged.");
        return Ok(());
    }

    print_pending(&pending, config, today);
    Ok(())
}

fn cmd_log(conn: &mut Connection, occurrence_id: Option<i64>, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let occurrence_id = match occurrence_id {
        Some(id) => id,
        None => {
            let pending = loader::pending_occurrences(conn, today)?;
            if pending.is_empty() {
                println!("No workouts waiting to be logged.");
                return Ok(());
            }
            print_pending(&pending, config, today);
            match prompt_occurrence_id(&mut input)? {
                Some(id) => id,
                None => return Ok(()),
            }
        }
    };

    let (occurrence, mut state) = match loader::start_session(conn, occurrence_id) {
        Ok(session) => session,
        Err(Error::OccurrenceNotFound(id)) => {
            // Fall back to the pending list so the user can pick again
            eprintln!("✗ Occurrence {} not found", id);
            let pending = loader::pending_occurrences(conn, today)?;
            if pending.is_empty() {
                println!("No workouts waiting to be logged.");
            } else {
                print_pending(&pending, config, today);
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "Logging {} ({}, {})",
        occurrence.workout_name,
        occurrence.day_label,
        config.display.date_format.format(occurrence.scheduled_for)
    );
    println!("Per exercise: `<set> <reps> <weight>` fills a set, `add` / `del <set>` change the set list, `done` moves on.");

    let exercises = state.exercises().to_vec();
    for exercise in &exercises {
        edit_exercise(&mut input, &mut state, exercise, config)?;
    }

    let validated = state.validate()?;
    let written = commit_session(conn, occurrence.id, &validated)?;
    println!(
        "✓ Logged {} sets for {} ({})",
        written, occurrence.workout_name, occurrence.day_label
    );
    Ok(())
}

fn cmd_history(conn: &Connection, occurrence_id: i64, config: &Config) -> Result<()> {
    let occurrence = loader::occurrence_by_id(conn, occurrence_id)?;
    let entries = db::weight_log_for(conn, occurrence_id)?;
    if entries.is_empty() {
        println!(
            "Nothing logged yet for {} ({})",
            occurrence.workout_name, occurrence.day_label
        );
        return Ok(());
    }

    println!(
        "{} ({}, {})",
        occurrence.workout_name,
        occurrence.day_label,
        config.display.date_format.format(occurrence.scheduled_for)
    );
    for entry in entries {
        println!(
            "  {} set {}: {} reps at {} {}",
            entry.exercise_name,
            entry.set_number,
            entry.reps,
            entry.weight,
            config.display.weight_unit
        );
    }
    Ok(())
}

/// Interactive edit loop for one exercise's sets
fn edit_exercise(
    input: &mut impl BufRead,
    state: &mut SessionState,
    exercise: &ExerciseSnapshot,
    config: &Config,
) -> Result<()> {
    println!();
    println!(
        "{}{}",
        exercise.name,
        muscle_suffix(exercise.muscle_group.as_deref())
    );
    print_sets(state, exercise, config);

    loop {
        print!("{}> ", exercise.name);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like `done`
            return Ok(());
        }
        let line = line.trim();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] | ["done"] => return Ok(()),
            ["add"] => {
                let added = state.add_set(exercise.id);
                println!("Added set {}", added);
                print_sets(state, exercise, config);
            }
            ["del", number] => match number.parse::<u32>() {
                Ok(number) if state.set_numbers(exercise.id).contains(&number) => {
                    state.delete_set(exercise.id, number);
                    print_sets(state, exercise, config);
                }
                _ => println!("No set {}", number),
            },
            [number, reps, weight] => match number.parse::<u32>() {
                Ok(number) if state.set_numbers(exercise.id).contains(&number) => {
                    // Raw text is buffered as typed; validation happens at commit
                    state.set_reps(exercise.id, number, *reps);
                    state.set_weight(exercise.id, number, *weight);
                }
                _ => println!("No set {}", number),
            },
            _ => println!("Commands: <set> <reps> <weight> | add | del <set> | done"),
        }
    }
}

fn prompt_occurrence_id(input: &mut impl BufRead) -> Result<Option<i64>> {
    print!("occurrence> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    match line.trim().parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("Not an occurrence id: {}", line.trim());
            Ok(None)
        }
    }
}

fn print_pending(pending: &[Occurrence], config: &Config, today: NaiveDate) {
    println!("Workouts waiting to be logged:");
    for occurrence in pending {
        let date_label = loader::relative_label(occurrence.scheduled_for, today)
            .map(String::from)
            .unwrap_or_else(|| config.display.date_format.format(occurrence.scheduled_for));
        println!(
            "  [{}] {} - {} ({})",
            occurrence.id, occurrence.workout_name, occurrence.day_label, date_label
        );
    }
}

fn print_sets(state: &SessionState, exercise: &ExerciseSnapshot, config: &Config) {
    for &set_number in state.set_numbers(exercise.id) {
        let (reps, weight) = state
            .buffer(exercise.id, set_number)
            .map(|b| (b.reps.clone(), b.weight.clone()))
            .unwrap_or_default();
        let weight = if weight.is_empty() {
            "?".to_string()
        } else {
            weight
        };
        println!(
            "  set {}: {} reps at {} {}",
            set_number, reps, weight, config.display.weight_unit
        );
    }
}

fn muscle_suffix(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!(" [{}]", muscles::label_for(tag).unwrap_or(tag)),
        None => String::new(),
    }
}
