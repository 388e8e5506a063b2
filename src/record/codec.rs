//! Record codec
//!
//! Encoding and decoding between records and delimited lines.

use crate::error::{Result, RollcallError};

use super::Record;

/// Field separator
pub const DELIMITER: char = ',';

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record into a single line (no trailing newline)
///
/// Fails with `DelimiterInField` if any value contains the delimiter;
/// values are never escaped.
pub fn encode<R: Record>(record: &R) -> Result<String> {
    let fields = record.fields();
    debug_assert_eq!(fields.len(), R::ARITY);

    for (i, value) in fields.iter().enumerate() {
        if value.contains(DELIMITER) || value.contains('\n') {
            return Err(RollcallError::DelimiterInField {
                field: R::COLUMNS.get(i).copied().unwrap_or("?"),
                value: value.clone(),
            });
        }
    }

    Ok(fields.join(","))
}

/// Format a decimal with a plain `.` and at least one fractional digit
///
/// 3.8 → "3.8", 4.0 → "4.0". No grouping, no exponent for sane values.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one line into a record
///
/// Fewer than `ARITY` fields is `MalformedRecord`; extra trailing fields
/// are ignored.
pub fn decode<R: Record>(line: &str) -> Result<R> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    if fields.len() < R::ARITY {
        return Err(RollcallError::MalformedRecord {
            line: line.to_string(),
            expected: R::ARITY,
            found: fields.len(),
        });
    }

    R::from_fields(&fields[..R::ARITY])
}

/// Decode every data line, skipping header and blank lines
///
/// Stops at the first bad line and returns its error.
pub fn decode_all<R, I, S>(lines: I) -> Result<Vec<R>>
where
    R: Record,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() || is_header::<R>(line) {
            continue;
        }
        records.push(decode(line)?);
    }
    Ok(records)
}

/// Whether a line is a header for `R`
///
/// Recognized by the sentinel prefix `<first column>,` (e.g. "ID,").
pub fn is_header<R: Record>(line: &str) -> bool {
    let sentinel = R::HEADER.split(DELIMITER).next().unwrap_or(R::HEADER);
    line.strip_prefix(sentinel)
        .map_or(false, |rest| rest.starts_with(DELIMITER))
}

/// The identifier of a line: everything before the first delimiter
///
/// "ST1,Alice,..." → Some("ST1"). Lines without a delimiter have no id.
pub fn id_prefix(line: &str) -> Option<&str> {
    line.find(DELIMITER).map(|pos| &line[..pos])
}
