//! # Rollcall
//!
//! A student records manager that keeps its data in flat, CSV-like files:
//! - One file per model, header line first, one record per line
//! - Lookup, update and removal by literal id prefix (`<id>,`)
//! - Batch append / batch replace in a single pass
//! - Statistics, text report export and CSV import on top
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI (subcommands / menu)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    StudentService                            │
//! │        (validation, ids, statistics, report, import)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  RecordStore<Student>
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ FileStorage │          │MemoryStorage │
//!   │ (flat files)│          │  (RwLock)    │
//!   └──────┬──────┘          └──────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐   ┌─────────────────┐
//!   │ Record codec│   │  StorageConfig  │
//!   │ (one line)  │   │ (dir + ext)     │
//!   └─────────────┘   └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod service;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RollcallError};
pub use config::{Config, StorageConfig};
pub use record::{Record, Student};
pub use storage::{FileStorage, MemoryStorage, RecordStore};
pub use service::StudentService;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Rollcall
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
