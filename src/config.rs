//! Configuration for Rollcall
//!
//! Centralized configuration with sensible defaults. Built explicitly and
//! handed to the storage and service layers; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RollcallError};

/// Where and how model files are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one file per model
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {model}{file_extension}   (e.g. Student.csv)
    pub data_dir: PathBuf,

    /// Extension appended to the model name, including the dot
    pub file_extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_extension: ".csv".to_string(),
        }
    }
}

impl StorageConfig {
    /// Create a new storage config builder
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    /// Resolve the backing file for a model
    ///
    /// Pure concatenation: `{data_dir}/{model}{file_extension}`. The file
    /// is not required to exist.
    pub fn path_for(&self, model: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", model, self.file_extension))
    }

    /// Create the data directory if it is missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        ensure_dir(&self.data_dir)
    }

    /// Reject settings that would resolve model files outside `data_dir`
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(RollcallError::Config(
                "data directory must not be empty".to_string(),
            ));
        }
        if self.file_extension.contains(['/', '\\']) {
            return Err(RollcallError::Config(format!(
                "file extension must not contain path separators: {:?}",
                self.file_extension
            )));
        }
        Ok(())
    }
}

/// Builder for StorageConfig
#[derive(Default)]
pub struct StorageConfigBuilder {
    config: StorageConfig,
}

impl StorageConfigBuilder {
    /// Set the directory model files live in
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the file extension (e.g. ".csv")
    pub fn file_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.file_extension = ext.into();
        self
    }

    pub fn build(self) -> StorageConfig {
        self.config
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    pub storage: StorageConfig,

    // -------------------------------------------------------------------------
    // Report Configuration
    // -------------------------------------------------------------------------
    /// Directory exported reports are written to
    pub reports_dir: PathBuf,

    /// File name of the exported report inside `reports_dir`
    pub report_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            reports_dir: PathBuf::from("reports"),
            report_file_name: "students_report.txt".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the exported report
    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(&self.report_file_name)
    }

    /// Create the data and reports directories (run once at startup)
    pub fn ensure_directories_exist(&self) -> Result<()> {
        self.storage.ensure_directory_exists()?;
        ensure_dir(&self.reports_dir)
    }

    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        if self.report_file_name.trim().is_empty() {
            return Err(RollcallError::Config(
                "report file name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (where model files live)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage.data_dir = path.into();
        self
    }

    /// Set the model file extension
    pub fn file_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.storage.file_extension = ext.into();
        self
    }

    /// Set the reports directory
    pub fn reports_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.reports_dir = path.into();
        self
    }

    /// Set the report file name
    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.report_file_name = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| {
        RollcallError::storage(format!("creating directory {}", path.display()), e)
    })?;
    tracing::info!(path = %path.display(), "Created directory");
    Ok(())
}
