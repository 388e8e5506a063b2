//! Line-level helpers shared by every store
//!
//! Pure functions over already-loaded lines; callers handle I/O.

use std::collections::HashMap;

use crate::record::{id_prefix, DELIMITER};

/// Whether `line` belongs to the record `id` (literal `<id>,` prefix)
pub(crate) fn has_id(line: &str, id: &str) -> bool {
    id_prefix(line) == Some(id)
}

/// Drop every line for `id`, returning how many were removed
pub(crate) fn remove_id(lines: &mut Vec<String>, id: &str) -> usize {
    let before = lines.len();
    lines.retain(|line| !has_id(line, id));
    before - lines.len()
}

/// Replace the first line for `id`; false if there was none
pub(crate) fn replace_first(lines: &mut [String], id: &str, replacement: String) -> bool {
    match lines.iter_mut().find(|line| has_id(line, id)) {
        Some(line) => {
            *line = replacement;
            true
        }
        None => false,
    }
}

/// Apply a batch of replacements to every line after the header
///
/// A matched key is consumed, so duplicate ids in the file are only
/// replaced once. Returns the number of lines replaced.
pub(crate) fn apply_batch(lines: &mut [String], updates: &mut HashMap<String, String>) -> usize {
    let mut replaced = 0;
    for line in lines.iter_mut().skip(1) {
        let Some(new_line) = id_prefix(line).and_then(|id| updates.remove(id)) else {
            continue;
        };
        *line = new_line;
        replaced += 1;
    }
    replaced
}

/// Column check for a single data row
pub(crate) fn column_matches(line: &str, value: &str, column: usize, exclude_id: Option<&str>) -> bool {
    let columns: Vec<&str> = line.split(DELIMITER).collect();
    let Some(cell) = columns.get(column) else {
        return false;
    };
    if exclude_id.map_or(false, |id| columns[0] == id) {
        return false;
    }
    cell.trim().to_lowercase() == value.trim().to_lowercase()
}
