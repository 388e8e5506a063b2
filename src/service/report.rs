//! Plain-text report rendering

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::record::{format_decimal, Student};

use super::Statistics;

/// Render the exported report: title, student table, statistics
pub fn render_report(students: &[Student], generated_at: DateTime<Local>) -> String {
    let mut out = String::new();

    // Writing to a String never fails
    let _ = writeln!(out, "Student Management System - Report");
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "Students");
    out.push_str(&format_table(students));
    let _ = writeln!(out);

    if let Some(stats) = Statistics::from_students(students) {
        let _ = writeln!(out, "Statistics");
        let _ = write!(out, "{}", stats);
    }

    out
}

/// Fixed-width table of students with a header row
pub fn format_table(students: &[Student]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} | {:<30} | {:<30} | {:<5} | {:<25} | {:<5}",
        "ID", "NAME", "EMAIL", "AGE", "COURSE", "GPA"
    );
    for student in students {
        let _ = writeln!(
            out,
            "{:<20} | {:<30} | {:<30} | {:<5} | {:<25} | {:<5}",
            student.id.trim(),
            student.name.trim(),
            student.email.trim(),
            student.age,
            student.course.trim(),
            format_decimal(student.gpa)
        );
    }
    out
}
