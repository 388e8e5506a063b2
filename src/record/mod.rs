//! Record Module
//!
//! Fixed-shape records and their one-line text encoding.
//!
//! ## Line Format
//! ```text
//! ┌──────────┬───┬──────────┬───┬─────┬───┬──────────┐
//! │ id       │ , │ field 2  │ , │ ... │ , │ field N  │
//! └──────────┴───┴──────────┴───┴─────┴───┴──────────┘
//! ```
//!
//! - Fields appear in declared order, joined by [`DELIMITER`]
//! - No quoting or escaping: a value containing the delimiter is rejected
//!   at encode time
//! - The first line of every file is a header naming the columns

mod codec;
mod student;

pub use codec::{decode, decode_all, encode, format_decimal, id_prefix, is_header, DELIMITER};
pub use student::Student;

use crate::error::Result;

/// An entity type that can be stored one-per-line
pub trait Record: Sized + Clone {
    /// Model name, used to pick the backing file (e.g. "Student")
    const MODEL: &'static str;

    /// Header line written as the first line of a new file
    const HEADER: &'static str;

    /// Number of fields in a line
    const ARITY: usize;

    /// Column names, in order (used in error messages)
    const COLUMNS: &'static [&'static str];

    /// The unique identifier (first field)
    fn id(&self) -> &str;

    /// Field values in declared order, already formatted as text
    fn fields(&self) -> Vec<String>;

    /// Build a record from exactly `ARITY` raw fields
    fn from_fields(fields: &[&str]) -> Result<Self>;
}
