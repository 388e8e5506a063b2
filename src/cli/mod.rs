//! CLI Module
//!
//! Argument parsing and the two ways of driving the service:
//! one-shot subcommands and the interactive menu.

mod menu;
mod prompt;

pub use menu::Menu;
pub use prompt::Prompter;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Result, RollcallError};
use crate::record::Student;
use crate::service::{format_table, ImportSummary, NewStudent, StudentService, StudentUpdate};
use crate::storage::RecordStore;

/// Rollcall
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "Student Management System backed by flat CSV files")]
#[command(version)]
pub struct Args {
    /// Directory holding the model files
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory exported reports are written to
    #[arg(short, long, default_value = "reports")]
    pub reports_dir: PathBuf,

    /// Extension of model files
    #[arg(short, long, default_value = ".csv")]
    pub extension: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Build the application config from the parsed arguments
    pub fn config(&self) -> Config {
        Config::builder()
            .data_dir(&self.data_dir)
            .file_extension(&self.extension)
            .reports_dir(&self.reports_dir)
            .build()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a student
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        course: String,
        #[arg(long)]
        gpa: f64,
    },

    /// Update fields of a student (omitted fields are kept)
    Update {
        /// Student id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        gpa: Option<f64>,
    },

    /// Remove a student
    Remove {
        /// Student id
        id: String,

        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one student
    Show {
        /// Student id
        id: String,
    },

    /// List all students
    List,

    /// Show statistics
    Stats,

    /// Export the report
    Export,

    /// Import students from a CSV file (NAME,EMAIL,AGE,COURSE,GPA)
    Import {
        path: PathBuf,
    },

    /// Scale the GPA of every student in a course
    AdjustGpa {
        #[arg(long)]
        course: String,
        #[arg(long)]
        factor: f64,
    },

    /// Interactive menu (default)
    Menu,
}

/// Run one command (or the menu) against `service`
pub fn run<S, R, W>(
    command: Command,
    service: &StudentService<S>,
    config: &Config,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: RecordStore<Student>,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Add {
            name,
            email,
            age,
            course,
            gpa,
        } => {
            let student = service.add_student(NewStudent {
                name,
                email,
                age,
                course,
                gpa,
            })?;
            writeln!(out, "Student added with ID {}", student.id)?;
        }
        Command::Update {
            id,
            name,
            email,
            age,
            course,
            gpa,
        } => {
            let changes = StudentUpdate {
                name,
                email,
                age,
                course,
                gpa,
            };
            if changes.is_empty() {
                return Err(RollcallError::Validation(
                    "nothing to update: pass at least one field".to_string(),
                ));
            }
            let student = service.update_student(&id, changes)?;
            writeln!(out, "{}", student)?;
        }
        Command::Remove { id, yes } => {
            if service.find_student(&id)?.is_none() {
                writeln!(out, "Student does not exist :(")?;
                return Ok(());
            }
            let confirmed = yes || {
                let mut prompter = Prompter::new(input, &mut out);
                prompter.confirm("Are you sure you want to remove this student? [Y/N]: ")?
            };
            if confirmed {
                service.remove_student(&id)?;
                writeln!(out, "Student removed")?;
            }
        }
        Command::Show { id } => match service.find_student(&id)? {
            Some(student) => write!(out, "{}", format_table(&[student]))?,
            None => writeln!(out, "Student does not exist :(")?,
        },
        Command::List => print_students(&mut out, &service.list_students()?)?,
        Command::Stats => match service.statistics()? {
            Some(stats) => write!(out, "{}", stats)?,
            None => writeln!(out, "No students available for statistics.")?,
        },
        Command::Export => match service.export_report(config)? {
            Some(path) => writeln!(out, "Report exported successfully to: {}", path.display())?,
            None => writeln!(out, "No students available to export.")?,
        },
        Command::Import { path } => {
            let summary = service.import_csv(&path)?;
            print_import_summary(&mut out, &summary)?;
        }
        Command::AdjustGpa { course, factor } => {
            let count = service.adjust_course_gpa(&course, factor)?;
            writeln!(out, "Updated GPA for {} students in {}", count, course)?;
        }
        Command::Menu => {
            Menu::new(service, config, Prompter::new(input, out)).run()?;
        }
    }
    Ok(())
}

// =============================================================================
// Rendering Helpers
// =============================================================================

pub(crate) fn print_students<W: Write>(out: &mut W, students: &[Student]) -> Result<()> {
    if students.is_empty() {
        writeln!(out, "There are no Students :(")?;
    } else {
        write!(out, "{}", format_table(students))?;
    }
    Ok(())
}

/// Import counts plus the first five rejected lines
pub(crate) fn print_import_summary<W: Write>(out: &mut W, summary: &ImportSummary) -> Result<()> {
    const SHOWN_ERRORS: usize = 5;

    writeln!(out, "***** Import Summary *****")?;
    writeln!(out, "Students successfully imported: {}", summary.imported)?;
    if summary.errors.is_empty() {
        return Ok(());
    }

    writeln!(out, "Errors encountered: {}", summary.errors.len())?;
    writeln!(out, "First {} errors:", SHOWN_ERRORS.min(summary.errors.len()))?;
    for error in summary.errors.iter().take(SHOWN_ERRORS) {
        writeln!(out, "  - {}", error)?;
    }
    if summary.errors.len() > SHOWN_ERRORS {
        writeln!(out, "  ... and {} more errors", summary.errors.len() - SHOWN_ERRORS)?;
    }
    Ok(())
}
