//! Service Module
//!
//! Student-facing operations built on top of a [`RecordStore`].
//!
//! ## Responsibilities
//! - Validate user input before it reaches storage
//! - Generate student ids
//! - Reject duplicate emails
//! - Aggregate statistics and render the exported report
//! - Bulk import from CSV and course-wide GPA adjustment
//!
//! [`RecordStore`]: crate::storage::RecordStore

mod report;
mod stats;
mod students;
pub mod validator;

pub use report::{format_table, render_report};
pub use stats::{GpaBand, Statistics};
pub use students::{ImportSummary, NewStudent, StudentService, StudentUpdate};
