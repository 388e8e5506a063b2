//! Interactive menu
//!
//! Loops over the numbered options until the user exits or input ends.
//! Errors from an option are shown and the loop carries on.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, RollcallError};
use crate::record::{format_decimal, Student};
use crate::service::{validator, NewStudent, StudentService, StudentUpdate};
use crate::storage::RecordStore;

use super::{print_import_summary, print_students, Prompter};

const MENU: &str = "
=== Student Management System ===

1. Add Student
2. Update Student
3. Remove Student
4. Search Students
5. List All Students
6. Show Statistics
7. Export Report
8. Import Students from CSV
9. Batch GPA Adjustment
0. Save & Exit
";

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Add,
    Update,
    Remove,
    Search,
    List,
    Statistics,
    Export,
    Import,
    AdjustGpa,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Choice::Add,
            "2" => Choice::Update,
            "3" => Choice::Remove,
            "4" => Choice::Search,
            "5" => Choice::List,
            "6" => Choice::Statistics,
            "7" => Choice::Export,
            "8" => Choice::Import,
            "9" => Choice::AdjustGpa,
            "0" => Choice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Interactive session over a service
pub struct Menu<'a, S, R, W> {
    service: &'a StudentService<S>,
    config: &'a Config,
    prompter: Prompter<R, W>,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: RecordStore<Student>,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'a StudentService<S>, config: &'a Config, prompter: Prompter<R, W>) -> Self {
        Self {
            service,
            config,
            prompter,
        }
    }

    /// Run until "Exit" or end of input
    pub fn run(mut self) -> Result<()> {
        loop {
            write!(self.prompter.output(), "{}", MENU)?;
            let answer = match self.prompter.ask("Select an operation: ") {
                Ok(answer) => answer,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            let Some(choice) = Choice::parse(&answer) else {
                writeln!(self.prompter.output(), "Invalid operation. Please try again.\n")?;
                continue;
            };
            if choice == Choice::Exit {
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(RollcallError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Ok(())
                }
                Err(e @ RollcallError::Io(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, ?choice, "Menu operation failed");
                    writeln!(self.prompter.output(), "Error: {}\n", e)?;
                }
            }
        }
    }

    fn dispatch(&mut self, choice: Choice) -> Result<()> {
        match choice {
            Choice::Add => self.add(),
            Choice::Update => self.update(),
            Choice::Remove => self.remove(),
            Choice::Search => self.search(),
            Choice::List => self.list(),
            Choice::Statistics => self.statistics(),
            Choice::Export => self.export(),
            Choice::Import => self.import(),
            Choice::AdjustGpa => self.adjust_gpa(),
            Choice::Exit => Ok(()),
        }
    }

    // =========================================================================
    // Options
    // =========================================================================

    fn add(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Add New Student ---\n")?;

        let p = &mut self.prompter;
        let name = p.ask_until("Enter your name: ", |s| text(s, "Name"))?;
        let email = p.ask_until("Enter your email: ", email)?;
        let age = p.ask_until("Enter your age: ", validator::parse_age)?;
        let course = p.ask_until("Enter your course: ", |s| text(s, "Course"))?;
        let gpa = p.ask_until("Enter your GPA: ", validator::parse_gpa)?;

        let student = self.service.add_student(NewStudent {
            name,
            email,
            age,
            course,
            gpa,
        })?;
        writeln!(
            self.prompter.output(),
            "\n***** Student Added Successfully! (ID {}) *****\n",
            student.id
        )?;
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Update Student ---\n")?;
        let Some(current) = self.lookup()? else {
            return Ok(());
        };

        let p = &mut self.prompter;
        writeln!(p.output(), "Press Enter to skip the field")?;
        let changes = StudentUpdate {
            name: p.ask_optional(
                &format!("Enter new name (current: {}): ", current.name),
                |s| text(s, "Name"),
            )?,
            email: p.ask_optional(&format!("Enter new email (current: {}): ", current.email), email)?,
            age: p.ask_optional(
                &format!("Enter new age (current: {}): ", current.age),
                validator::parse_age,
            )?,
            course: p.ask_optional(
                &format!("Enter new course (current: {}): ", current.course),
                |s| text(s, "Course"),
            )?,
            gpa: p.ask_optional(
                &format!(
                    "Enter new GPA (current: {}): ",
                    format_decimal(current.gpa)
                ),
                validator::parse_gpa,
            )?,
        };

        let updated = self.service.update_student(&current.id, changes)?;
        writeln!(
            self.prompter.output(),
            "\n***** Student Updated Successfully! *****\n\n{}",
            updated
        )?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Remove Student ---\n")?;
        let Some(student) = self.lookup()? else {
            return Ok(());
        };

        if self
            .prompter
            .confirm("Are you sure you want to remove this student? [Y/N]: ")?
        {
            self.service.remove_student(&student.id)?;
            writeln!(self.prompter.output(), "\n***** Student Removed Successfully! *****\n")?;
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Search for Student ---\n")?;
        if let Some(student) = self.lookup()? {
            print_students(self.prompter.output(), &[student])?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Students List ---\n")?;
        let students = self.service.list_students()?;
        print_students(self.prompter.output(), &students)
    }

    fn statistics(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Statistics ---\n")?;
        match self.service.statistics()? {
            Some(stats) => write!(self.prompter.output(), "{}", stats)?,
            None => writeln!(self.prompter.output(), "No students available for statistics.\n")?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        match self.service.export_report(self.config)? {
            Some(path) => writeln!(
                self.prompter.output(),
                "Report exported successfully to: {}",
                path.display()
            )?,
            None => writeln!(self.prompter.output(), "No students available to export.")?,
        }
        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Import Students from CSV ---\n")?;
        let path = self
            .prompter
            .ask_until("Enter the path to CSV file: ", |s| text(s, "File path"))?;

        let summary = self.service.import_csv(Path::new(&path))?;
        print_import_summary(self.prompter.output(), &summary)
    }

    fn adjust_gpa(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "--- Batch GPA Update ---\n")?;
        let students = self.service.list_students()?;
        if students.is_empty() {
            writeln!(self.prompter.output(), "No students available to update")?;
            return Ok(());
        }

        let mut courses: Vec<&str> = students.iter().map(|s| s.course.as_str()).collect();
        courses.sort_unstable();
        courses.dedup();
        writeln!(self.prompter.output(), "Available courses:")?;
        for course in &courses {
            writeln!(self.prompter.output(), "- {}", course)?;
        }

        let course = self.prompter.ask("\nEnter course name for GPA adjustment: ")?;
        let factor = self
            .prompter
            .ask_until("Enter GPA adjustment factor (e.g., 1.1 for 10% increase): ", factor)?;

        let count = self.service.adjust_course_gpa(&course, factor)?;
        writeln!(
            self.prompter.output(),
            "Updated GPA for {} students in {}",
            count, course
        )?;
        Ok(())
    }

    /// Ask for an id and load the student, telling the user if it's missing
    fn lookup(&mut self) -> Result<Option<Student>> {
        let id = self
            .prompter
            .ask_until("Enter student ID: ", |s| text(s, "ID"))?;
        let student = self.service.find_student(&id)?;
        if student.is_none() {
            writeln!(self.prompter.output(), "Student does not exist :(\n")?;
        }
        Ok(student)
    }
}

// =============================================================================
// Answer Parsers
// =============================================================================

fn text(input: &str, field: &str) -> Result<String> {
    validator::validate_text(input, field)?;
    Ok(input.to_string())
}

fn email(input: &str) -> Result<String> {
    validator::validate_email(input)?;
    Ok(input.to_string())
}

fn factor(input: &str) -> Result<f64> {
    match input.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(f),
        Ok(_) => Err(RollcallError::Validation(
            "Adjustment factor must be positive".to_string(),
        )),
        Err(_) => Err(RollcallError::Validation("Invalid number format".to_string())),
    }
}
