//! Student service
//!
//! Orchestrates validation, id generation and storage calls for students.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, RollcallError};
use crate::record::{decode, decode_all, Record, Student};
use crate::storage::{AddRequest, BatchAddRequest, RecordStore};

use super::report::render_report;
use super::validator;
use super::Statistics;

/// Prefix of every generated student id
pub const ID_PREFIX: &str = "ST";

/// Input for a new student (id is generated)
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub course: String,
    pub gpa: f64,
}

/// Changes to an existing student; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub course: Option<String>,
    pub gpa: Option<f64>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    /// "Line N: reason" for every rejected line
    pub errors: Vec<String>,
}

/// Student operations over any record store
pub struct StudentService<S> {
    store: S,
}

impl<S: RecordStore<Student>> StudentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Validate and persist a new student with a fresh id
    pub fn add_student(&self, input: NewStudent) -> Result<Student> {
        let input = validate_new(input)?;
        self.ensure_unique_email(&input.email, None)?;

        let student = Student::new(
            self.generate_id(&HashSet::new())?,
            input.name,
            input.email,
            input.age,
            input.course,
            input.gpa,
        );
        self.store.add(AddRequest::new(&student))?;

        tracing::info!(id = %student.id, "Student added");
        Ok(student)
    }

    pub fn find_student(&self, id: &str) -> Result<Option<Student>> {
        self.store
            .get(Student::MODEL, id)?
            .map(|line| decode::<Student>(&line))
            .transpose()
    }

    pub fn list_students(&self) -> Result<Vec<Student>> {
        decode_all(self.store.get_all(Student::MODEL)?)
    }

    /// Apply `changes` to an existing student
    pub fn update_student(&self, id: &str, changes: StudentUpdate) -> Result<Student> {
        let current = self
            .find_student(id)?
            .ok_or_else(|| RollcallError::NotFound(format!("student {}", id)))?;

        let mut updated = current.clone();
        if let Some(name) = changes.name {
            validator::validate_text(&name, "Name")?;
            updated.name = name.trim().to_string();
        }
        if let Some(email) = changes.email {
            let email = email.trim().to_string();
            validator::validate_email(&email)?;
            self.ensure_unique_email(&email, Some(id))?;
            updated.email = email;
        }
        if let Some(age) = changes.age {
            validator::validate_age(age)?;
            updated.age = age;
        }
        if let Some(course) = changes.course {
            validator::validate_text(&course, "Course")?;
            updated.course = course.trim().to_string();
        }
        if let Some(gpa) = changes.gpa {
            validator::validate_gpa(gpa)?;
            updated.gpa = gpa;
        }

        if updated == current {
            tracing::debug!(id, "Update left student unchanged");
            return Ok(updated);
        }
        self.store.update(Student::MODEL, id, &updated)?;

        tracing::info!(id, "Student updated");
        Ok(updated)
    }

    /// Remove a student; false if there was no such student
    pub fn remove_student(&self, id: &str) -> Result<bool> {
        if self.store.get(Student::MODEL, id)?.is_none() {
            return Ok(false);
        }
        self.store.remove(Student::MODEL, id)?;

        tracing::info!(id, "Student removed");
        Ok(true)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Statistics over all students; `None` when there are none
    pub fn statistics(&self) -> Result<Option<Statistics>> {
        Ok(Statistics::from_students(&self.list_students()?))
    }

    /// Write the report to `config.report_path()`
    ///
    /// Returns the written path, or `None` when there is nothing to export.
    pub fn export_report(&self, config: &Config) -> Result<Option<PathBuf>> {
        let students = self.list_students()?;
        if students.is_empty() {
            return Ok(None);
        }

        config.ensure_directories_exist()?;
        let path = config.report_path();
        fs::write(&path, render_report(&students, Local::now())).map_err(|e| {
            RollcallError::storage(format!("writing report {}", path.display()), e)
        })?;

        tracing::info!(path = %path.display(), students = students.len(), "Report exported");
        Ok(Some(path))
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Import students from a CSV file with columns `NAME,EMAIL,AGE,COURSE,GPA`
    pub fn import_csv(&self, path: &Path) -> Result<ImportSummary> {
        let context = format!("reading import file {}", path.display());
        let file = File::open(path).map_err(|e| RollcallError::storage(&context, e))?;
        self.import_reader(file, &context)
    }

    /// Import from already-read lines
    pub fn import_lines<'a, I>(&self, lines: I) -> Result<ImportSummary>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let content = lines.into_iter().collect::<Vec<_>>().join("\n");
        self.import_reader(content.as_bytes(), "reading import lines")
    }

    /// Import CSV from any reader; bad rows are collected, not fatal
    ///
    /// Quoted fields are accepted. All valid rows get fresh ids and are
    /// written with a single batch add.
    fn import_reader<Rd: io::Read>(&self, input: Rd, context: &str) -> Result<ImportSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut summary = ImportSummary::default();
        let mut students = Vec::new();
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        let mut first = true;

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let number = e.position().map_or(0, |p| p.line());
                    let message = e.to_string();
                    if let csv::ErrorKind::Io(e) = e.into_kind() {
                        return Err(RollcallError::storage(context, e));
                    }
                    summary
                        .errors
                        .push(format!("Line {}: Unreadable row - {}", number, message));
                    continue;
                }
            };
            let number = record.position().map_or(0, |p| p.line());
            let fields: Vec<&str> = record.iter().collect();

            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            if first {
                first = false;
                if looks_like_header(&fields) {
                    continue;
                }
            }

            let input = match parse_import_fields(&fields) {
                Ok(input) => input,
                Err(reason) => {
                    summary.errors.push(format!("Line {}: {}", number, reason));
                    continue;
                }
            };

            let email_key = input.email.to_lowercase();
            if emails.contains(&email_key)
                || self
                    .store
                    .value_exists_in_column(Student::MODEL, &input.email, Student::EMAIL_COLUMN, None)?
            {
                summary
                    .errors
                    .push(format!("Line {}: Duplicate email - {}", number, input.email));
                continue;
            }

            let id = self.generate_id(&ids)?;
            ids.insert(id.clone());
            emails.insert(email_key);
            students.push(Student::new(id, input.name, input.email, input.age, input.course, input.gpa));
        }

        self.store.batch_add(BatchAddRequest::new(&students))?;
        summary.imported = students.len();

        tracing::info!(
            imported = summary.imported,
            rejected = summary.errors.len(),
            "CSV import finished"
        );
        Ok(summary)
    }

    /// Scale the GPA of every student in `course`, capped at the maximum
    ///
    /// Returns how many students were updated.
    pub fn adjust_course_gpa(&self, course: &str, factor: f64) -> Result<usize> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(RollcallError::Validation(
                "Adjustment factor must be positive".to_string(),
            ));
        }

        let updates: HashMap<String, Student> = self
            .list_students()?
            .into_iter()
            .filter(|s| s.course == course)
            .map(|mut s| {
                s.gpa = (s.gpa * factor).min(validator::MAX_GPA);
                (s.id.clone(), s)
            })
            .collect();

        if updates.is_empty() {
            return Err(RollcallError::Validation(format!(
                "Invalid or non-existent course name: {}",
                course
            )));
        }

        let count = updates.len();
        self.store.batch_update(Student::MODEL, updates)?;

        tracing::info!(course, factor, count, "Course GPAs adjusted");
        Ok(count)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// "ST" + 8 uppercase hex digits, unused in storage and in `taken`
    fn generate_id(&self, taken: &HashSet<String>) -> Result<String> {
        loop {
            let token = Uuid::new_v4().simple().to_string();
            let id = format!("{}{}", ID_PREFIX, token[..8].to_uppercase());
            if !taken.contains(&id) && self.store.get(Student::MODEL, &id)?.is_none() {
                return Ok(id);
            }
        }
    }

    fn ensure_unique_email(&self, email: &str, exclude_id: Option<&str>) -> Result<()> {
        if self
            .store
            .value_exists_in_column(Student::MODEL, email, Student::EMAIL_COLUMN, exclude_id)?
        {
            return Err(RollcallError::Duplicate {
                field: "email",
                value: email.to_string(),
            });
        }
        Ok(())
    }
}

fn validate_new(input: NewStudent) -> Result<NewStudent> {
    let input = NewStudent {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        course: input.course.trim().to_string(),
        ..input
    };
    validator::validate_text(&input.name, "Name")?;
    validator::validate_email(&input.email)?;
    validator::validate_age(input.age)?;
    validator::validate_text(&input.course, "Course")?;
    validator::validate_gpa(input.gpa)?;
    Ok(input)
}

/// First row of an import file is a header if it names columns
fn looks_like_header(fields: &[&str]) -> bool {
    fields.first().map_or(false, |f| f.starts_with("ID"))
        || fields.iter().any(|f| {
            let lower = f.to_lowercase();
            lower.contains("name") || lower.contains("email")
        })
}

/// NAME,EMAIL,AGE,COURSE,GPA → NewStudent, or the reason it was rejected
fn parse_import_fields(fields: &[&str]) -> std::result::Result<NewStudent, String> {
    if fields.len() < 5 {
        return Err("Insufficient columns".to_string());
    }

    let age = validator::parse_age(fields[2]).map_err(|_| format!("Invalid age - {}", fields[2]))?;
    let gpa = validator::parse_gpa(fields[4]).map_err(|_| format!("Invalid GPA - {}", fields[4]))?;
    validator::validate_email(fields[1]).map_err(|_| format!("Invalid email - {}", fields[1]))?;
    text_field(fields[0], "Name")?;
    text_field(fields[3], "Course")?;

    Ok(NewStudent {
        name: fields[0].to_string(),
        email: fields[1].to_string(),
        age,
        course: fields[3].to_string(),
        gpa,
    })
}

/// Storage fields can't hold the delimiter, even when the CSV quoted it
fn text_field(value: &str, field: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err(format!("Missing {}", field.to_lowercase()));
    }
    validator::validate_text(value, field).map_err(|_| format!("Invalid {} - {}", field.to_lowercase(), value))
}
