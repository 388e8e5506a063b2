//! Flat-file record store
//!
//! One file per model under the configured data directory.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::{Result, RollcallError};
use crate::record::{encode, Record};

use super::lines;
use super::{AddRequest, BatchAddRequest, RecordStore};

/// File-backed storage for records of type `R`
///
/// ## Durability:
/// - Appends go straight to the end of the file
/// - Rewrites (remove/update/batch_update) write a sibling `.tmp` file and
///   rename it over the original, so a crash leaves either the old or the
///   new contents
/// - No locking: concurrent writers from other processes may lose updates
pub struct FileStorage<R> {
    config: StorageConfig,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FileStorage<R> {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            _record: PhantomData,
        }
    }

    /// Get the storage configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Backing file for a model
    pub fn path_for(&self, model: &str) -> PathBuf {
        self.config.path_for(model)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Create the data directory, reporting failures under `context`
    fn ensure_data_dir(&self, context: &str) -> Result<()> {
        let dir = &self.config.data_dir;
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| RollcallError::storage(context, e))?;
        tracing::info!(path = %dir.display(), "Created directory");
        Ok(())
    }

    /// Open for appending, writing `header` first when the file is new
    ///
    /// An existing file whose last line lacks its `\n` gets one before
    /// anything is appended.
    fn open_for_append(&self, path: &Path, header: &str, context: &str) -> Result<BufWriter<File>> {
        self.ensure_data_dir(context)?;

        let is_new = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| RollcallError::storage(context, e))?;
        let unterminated = !is_new
            && ends_without_newline(&mut file).map_err(|e| RollcallError::storage(context, e))?;
        let mut writer = BufWriter::new(file);

        if is_new {
            writeln!(writer, "{}", header).map_err(|e| RollcallError::storage(context, e))?;
            tracing::info!(path = %path.display(), "Created model file");
        } else if unterminated {
            writeln!(writer).map_err(|e| RollcallError::storage(context, e))?;
            tracing::warn!(path = %path.display(), "Terminated last line before appending");
        }

        Ok(writer)
    }

    /// Read every line, or `None` if the file doesn't exist
    fn read_lines(&self, path: &Path, context: &str) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|e| RollcallError::storage(context, e))?;
        Ok(Some(content.lines().map(str::to_string).collect()))
    }

    /// Replace the file's contents with `lines` via temp file + rename
    fn write_lines(&self, path: &Path, lines: &[String], context: &str) -> Result<()> {
        self.ensure_data_dir(context)?;

        let tmp_path = tmp_path_for(path);
        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
            fs::rename(&tmp_path, path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            RollcallError::storage(context, e)
        })
    }
}

impl<R: Record> RecordStore<R> for FileStorage<R> {
    fn add(&self, request: AddRequest<'_, R>) -> Result<()> {
        let line = encode(request.record)?;
        let path = self.path_for(request.model);
        let context = format!("adding record {} to {}", request.record.id(), request.model);

        let mut writer = self.open_for_append(&path, request.header, &context)?;
        writeln!(writer, "{}", line).map_err(|e| RollcallError::storage(&context, e))?;
        writer.flush().map_err(|e| RollcallError::storage(&context, e))?;

        tracing::info!(model = request.model, id = request.record.id(), "Added record");
        Ok(())
    }

    fn get(&self, model: &str, id: &str) -> Result<Option<String>> {
        let path = self.path_for(model);
        if !path.exists() {
            return Ok(None);
        }
        let context = || format!("retrieving record {} from {}", id, model);

        let file = File::open(&path).map_err(|e| RollcallError::storage(context(), e))?;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| RollcallError::storage(context(), e))?;
            if lines::has_id(&line, id) {
                return Ok(Some(line));
            }
        }

        tracing::debug!(model, id, "Record not found");
        Ok(None)
    }

    fn remove(&self, model: &str, id: &str) -> Result<()> {
        let path = self.path_for(model);
        let context = format!("removing record {} from {}", id, model);

        let Some(mut all) = self.read_lines(&path, &context)? else {
            return Ok(());
        };
        let removed = lines::remove_id(&mut all, id);
        if removed == 0 {
            tracing::debug!(model, id, "Nothing to remove");
            return Ok(());
        }
        self.write_lines(&path, &all, &context)?;

        tracing::info!(model, id, removed, "Removed record");
        Ok(())
    }

    fn update(&self, model: &str, id: &str, record: &R) -> Result<()> {
        let path = self.path_for(model);
        let context = format!("updating record {} in {}", id, model);

        let mut all = self
            .read_lines(&path, &context)?
            .ok_or_else(|| RollcallError::NotFound(format!("no file for model {}", model)))?;

        if !lines::replace_first(&mut all, id, encode(record)?) {
            return Err(RollcallError::NotFound(format!(
                "record with ID {} in {}",
                id, model
            )));
        }
        self.write_lines(&path, &all, &context)?;

        tracing::info!(model, id, "Updated record");
        Ok(())
    }

    fn get_all(&self, model: &str) -> Result<Vec<String>> {
        let path = self.path_for(model);
        let context = format!("retrieving all records for {}", model);

        let all = self.read_lines(&path, &context)?.unwrap_or_default();
        tracing::debug!(model, lines = all.len(), "Read model file");
        Ok(all)
    }

    fn batch_add(&self, request: BatchAddRequest<'_, R>) -> Result<()> {
        if request.records.is_empty() {
            return Ok(());
        }

        // Encode everything up front so a bad record leaves the file alone
        let encoded = request
            .records
            .iter()
            .map(encode)
            .collect::<Result<Vec<_>>>()?;

        let path = self.path_for(request.model);
        let context = format!("batch adding {} records to {}", encoded.len(), request.model);

        let mut writer = self.open_for_append(&path, request.header, &context)?;
        for line in &encoded {
            writeln!(writer, "{}", line).map_err(|e| RollcallError::storage(&context, e))?;
        }
        writer.flush().map_err(|e| RollcallError::storage(&context, e))?;

        tracing::info!(model = request.model, count = encoded.len(), "Batch added records");
        Ok(())
    }

    fn batch_update(&self, model: &str, records: HashMap<String, R>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let path = self.path_for(model);
        let context = format!("batch updating {}", model);

        let mut all = self
            .read_lines(&path, &context)?
            .ok_or_else(|| RollcallError::NotFound(format!("no file for model {}", model)))?;

        let mut updates = records
            .into_iter()
            .map(|(id, record)| Ok((id, encode(&record)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let replaced = lines::apply_batch(&mut all, &mut updates);
        if replaced == 0 {
            return Err(RollcallError::NoMatches {
                model: model.to_string(),
            });
        }
        self.write_lines(&path, &all, &context)?;

        if !updates.is_empty() {
            tracing::warn!(model, missing = updates.len(), "Batch update skipped unknown ids");
        }
        tracing::info!(model, replaced, "Batch updated records");
        Ok(())
    }

    fn value_exists_in_column(
        &self,
        model: &str,
        value: &str,
        column: usize,
        exclude_id: Option<&str>,
    ) -> Result<bool> {
        let path = self.path_for(model);
        if !path.exists() {
            return Ok(false);
        }
        let context = || format!("checking if value {:?} exists in {}", value, model);

        let file = File::open(&path).map_err(|e| RollcallError::storage(context(), e))?;
        // skip(1): header
        for line in BufReader::new(file).lines().skip(1) {
            let line = line.map_err(|e| RollcallError::storage(context(), e))?;
            if lines::column_matches(&line, value, column, exclude_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Non-empty file whose final byte isn't `\n`
fn ends_without_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// "data/Student.csv" → "data/Student.csv.tmp"
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
