//! Input validation
//!
//! Every rule returns `Validation` with a message fit for the user.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, RollcallError};
use crate::record::DELIMITER;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern is valid")
});

pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 99;

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(RollcallError::Validation("Email cannot be empty".to_string()));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(RollcallError::Validation(format!(
            "Invalid email format: {}. Please use a valid email format (e.g., user@example.com)",
            email
        )));
    }
    Ok(())
}

pub fn validate_age(age: u32) -> Result<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RollcallError::Validation(format!(
            "Age must be between {} and {}. You entered: {}",
            MIN_AGE, MAX_AGE, age
        )));
    }
    Ok(())
}

pub fn validate_gpa(gpa: f64) -> Result<()> {
    if !(MIN_GPA..=MAX_GPA).contains(&gpa) {
        return Err(RollcallError::Validation(format!(
            "GPA must be between {:.1} and {:.1}. You entered: {:.2}",
            MIN_GPA, MAX_GPA, gpa
        )));
    }
    Ok(())
}

/// Non-empty after trimming, and storable (no delimiter)
pub fn validate_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RollcallError::Validation(format!("{} cannot be empty", field)));
    }
    if value.contains(DELIMITER) {
        return Err(RollcallError::Validation(format!(
            "{} cannot contain '{}'",
            field, DELIMITER
        )));
    }
    Ok(())
}

/// Parse an age typed by the user
pub fn parse_age(input: &str) -> Result<u32> {
    let age = input
        .trim()
        .parse::<u32>()
        .map_err(|_| RollcallError::Validation("Age must be a number!".to_string()))?;
    validate_age(age)?;
    Ok(age)
}

/// Parse a GPA typed by the user
pub fn parse_gpa(input: &str) -> Result<f64> {
    let gpa = input
        .trim()
        .parse::<f64>()
        .map_err(|_| RollcallError::Validation("GPA must be a number!".to_string()))?;
    validate_gpa(gpa)?;
    Ok(gpa)
}
