//! Storage Module
//!
//! Line-oriented persistence: one flat file per model.
//!
//! ## Responsibilities
//! - Resolve a model to its backing file (via [`StorageConfig`])
//! - Lazily create files with a header line
//! - Look up, replace, and drop lines by id prefix
//! - Batch append / batch replace in a single pass
//! - Linear column scans for duplicate detection
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ ID,NAME,EMAIL,AGE,COURSE,GPA  (header) │
//! ├────────────────────────────────────────┤
//! │ ST1,Alice,alice@x.com,20,CS,3.8        │
//! │ ST2,Bob,bob@x.com,22,CS,3.2            │
//! │ ... (one record per line)              │
//! └────────────────────────────────────────┘
//! ```
//!
//! A record is "the line starting with `<id>,`". Every mutation reads the
//! whole file and rewrites it; there is no index.
//!
//! [`StorageConfig`]: crate::config::StorageConfig

mod file;
mod lines;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::collections::HashMap;

use crate::error::Result;
use crate::record::Record;

/// Append one record, creating the file with `header` if needed
#[derive(Debug, Clone, Copy)]
pub struct AddRequest<'a, R> {
    pub model: &'a str,
    pub record: &'a R,
    pub header: &'a str,
}

impl<'a, R: Record> AddRequest<'a, R> {
    /// Request using the record type's own model name and header
    pub fn new(record: &'a R) -> Self {
        Self {
            model: R::MODEL,
            record,
            header: R::HEADER,
        }
    }
}

/// Append many records in one pass
#[derive(Debug, Clone, Copy)]
pub struct BatchAddRequest<'a, R> {
    pub model: &'a str,
    pub records: &'a [R],
    pub header: &'a str,
}

impl<'a, R: Record> BatchAddRequest<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        Self {
            model: R::MODEL,
            records,
            header: R::HEADER,
        }
    }
}

/// Record storage over one entity type
///
/// Reads of a model with no data yet return empty results, not errors.
/// Only mutations of missing records fail (`NotFound` / `NoMatches`).
pub trait RecordStore<R: Record> {
    /// Append a record, writing the header first if the model has no file
    fn add(&self, request: AddRequest<'_, R>) -> Result<()>;

    /// First line whose id prefix equals `id`, verbatim
    fn get(&self, model: &str, id: &str) -> Result<Option<String>>;

    /// Drop every line whose id prefix equals `id` (no-op if none)
    fn remove(&self, model: &str, id: &str) -> Result<()>;

    /// Replace the first line for `id` in place
    fn update(&self, model: &str, id: &str, record: &R) -> Result<()>;

    /// Every line of the model, header included
    fn get_all(&self, model: &str) -> Result<Vec<String>>;

    /// Append all records, writing the header only if the file is new
    fn batch_add(&self, request: BatchAddRequest<'_, R>) -> Result<()>;

    /// Replace lines whose id is a key of `records`, each key at most once
    fn batch_update(&self, model: &str, records: HashMap<String, R>) -> Result<()>;

    /// Whether any data row has `value` in `column` (trimmed, case-insensitive)
    ///
    /// The row whose id equals `exclude_id` is skipped, so an update can
    /// check its new value without colliding with itself.
    fn value_exists_in_column(
        &self,
        model: &str,
        value: &str,
        column: usize,
        exclude_id: Option<&str>,
    ) -> Result<bool>;
}
