//! Student record

use std::fmt;

use crate::error::{Result, RollcallError};

use super::codec::format_decimal;
use super::Record;

/// One student row: `ID,NAME,EMAIL,AGE,COURSE,GPA`
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub course: String,
    pub gpa: f64,
}

impl Student {
    /// Column index of the email field (used for duplicate checks)
    pub const EMAIL_COLUMN: usize = 2;

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
        course: impl Into<String>,
        gpa: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age,
            course: course.into(),
            gpa,
        }
    }
}

impl Record for Student {
    const MODEL: &'static str = "Student";
    const HEADER: &'static str = "ID,NAME,EMAIL,AGE,COURSE,GPA";
    const ARITY: usize = 6;
    const COLUMNS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "AGE", "COURSE", "GPA"];

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.age.to_string(),
            self.course.clone(),
            format_decimal(self.gpa),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < Self::ARITY {
            return Err(RollcallError::MalformedRecord {
                line: fields.join(","),
                expected: Self::ARITY,
                found: fields.len(),
            });
        }

        let age = fields[3].trim();
        let age = age
            .parse::<u32>()
            .map_err(|_| RollcallError::InvalidFieldFormat {
                field: "AGE",
                value: age.to_string(),
            })?;

        let gpa = parse_decimal(fields[5].trim()).ok_or_else(|| {
            RollcallError::InvalidFieldFormat {
                field: "GPA",
                value: fields[5].trim().to_string(),
            }
        })?;

        Ok(Self {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            email: fields[2].to_string(),
            age,
            course: fields[4].to_string(),
            gpa,
        })
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student [id={}, name={}, email={}, age={}, course={}, gpa={}]",
            self.id,
            self.name,
            self.email,
            self.age,
            self.course,
            format_decimal(self.gpa)
        )
    }
}

/// Strict decimal: digits with an optional single fractional part
///
/// Rejects "inf", "NaN", exponents and signs that `f64::from_str` accepts.
fn parse_decimal(text: &str) -> Option<f64> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !digits(whole) || frac.map_or(false, |f| !digits(f)) {
        return None;
    }
    text.parse().ok()
}
