//! Command-line front end for the student roster.
//!
//! # Responsibility
//! - Translate subcommands into roster service calls.
//! - Print records, summaries and action outcomes for humans.
//!
//! Exit status: `0` on success, `1` when the roster refused the action,
//! `2` on storage or configuration errors.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::error;
use roster_core::model::student::is_valid_gpa;
use roster_core::{
    BandFilter, RosterConfig, RosterService, SlotRosterRepository, SqliteSlotStore, Student,
    StudentListQuery, StudentPatch,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Student roster CLI
#[derive(Parser, Debug)]
#[command(name = "roster", version)]
#[command(about = "Manage a local student roster")]
struct Args {
    /// SQLite database file
    #[arg(long, env = "ROSTER_DB", default_value = roster_core::config::DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Slot key the roster is stored under
    #[arg(long, default_value = roster_core::DEFAULT_SLOT_KEY)]
    slot: String,

    /// Absolute directory for rolling log files (file logging is off without it)
    #[arg(long, env = "ROSTER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value = roster_core::default_log_level())]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a student
    Add {
        id: String,
        name: String,
        /// Birth date as YYYY-MM-DD
        birth_date: NaiveDate,
        class_label: String,
        gpa: f64,
    },

    /// Remove a student by id
    Remove { id: String },

    /// Update fields of an existing student
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        #[arg(long)]
        class_label: Option<String>,
        #[arg(long)]
        gpa: Option<f64>,
    },

    /// Show one student
    Show { id: String },

    /// List students, optionally searched and filtered
    List {
        /// Keyword matched against id, name and class (accents ignored)
        #[arg(short, long)]
        search: Option<String>,
        /// excellent|good|average|below|all
        #[arg(short, long, default_value = "all")]
        band: BandFilter,
    },

    /// Print roster summary
    Stats,
}

impl Args {
    fn config(&self) -> RosterConfig {
        RosterConfig {
            db_path: self.db.clone(),
            slot_key: self.slot.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();

    if let Err(err) = config.init_logging() {
        eprintln!("error: {err}");
        return ExitCode::from(2);
    }

    match run(&config, args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when the roster refused a mutation.
fn run(config: &RosterConfig, command: Commands) -> Result<bool, Box<dyn Error>> {
    let conn = config.open_connection()?;
    let store = SqliteSlotStore::try_new(&conn)?;
    let mut roster = RosterService::open(SlotRosterRepository::with_key(
        store,
        config.slot_key.as_str(),
    ))?;

    let outcome = match command {
        Commands::Add {
            id,
            name,
            birth_date,
            class_label,
            gpa,
        } => {
            let student =
                Student::new(id.trim(), name.trim(), birth_date, class_label.trim(), gpa);
            if let Some(problem) = input_problem(&student) {
                println!("{problem}");
                return Ok(false);
            }
            roster.add(student)?
        }
        Commands::Remove { id } => roster.remove(id.trim())?,
        Commands::Update {
            id,
            name,
            birth_date,
            class_label,
            gpa,
        } => roster.update(
            id.trim(),
            StudentPatch {
                name,
                birth_date,
                class_label,
                gpa,
            },
        )?,
        Commands::Show { id } => {
            return match roster.find_by_id(id.trim()) {
                Some(student) => {
                    print_students(&[student]);
                    Ok(true)
                }
                None => {
                    println!("Student `{}` not found.", id.trim());
                    Ok(false)
                }
            };
        }
        Commands::List { search, band } => {
            let students = roster.list(&StudentListQuery {
                keyword: search,
                band,
            });
            if students.is_empty() {
                println!("No students.");
            } else {
                print_students(&students);
            }
            return Ok(true);
        }
        Commands::Stats => {
            let stats = roster.stats();
            println!("Total students: {}", stats.total);
            println!("Average GPA:    {:.2}", stats.average_gpa);
            println!("Excellent:      {}", stats.excellent_count);
            return Ok(true);
        }
    };

    println!("{}", outcome.message);
    Ok(outcome.success)
}

/// Form-level checks; the roster itself accepts new records as given.
fn input_problem(student: &Student) -> Option<&'static str> {
    if student.id().is_empty() {
        Some("Student id must not be empty.")
    } else if student.name().is_empty() {
        Some("Name must not be empty.")
    } else if student.class_label().is_empty() {
        Some("Class must not be empty.")
    } else if !is_valid_gpa(student.gpa()) {
        Some("GPA must be between 0 and 4.")
    } else {
        None
    }
}

fn print_students(students: &[&Student]) {
    println!(
        "{:>3}  {:<10} {:<28} {:<10} {:<10} {:>4}  {}",
        "#", "ID", "NAME", "BORN", "CLASS", "GPA", "BAND"
    );
    for (index, student) in students.iter().enumerate() {
        println!(
            "{:>3}  {:<10} {:<28} {:<10} {:<10} {:>4}  {}",
            index + 1,
            student.id(),
            student.name(),
            student.formatted_birth_date(),
            student.class_label(),
            student.formatted_gpa(),
            student.classify().label()
        );
    }
}
