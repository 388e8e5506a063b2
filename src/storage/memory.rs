//! In-memory record store
//!
//! Same line semantics as [`FileStorage`](super::FileStorage), kept in a
//! map of model → lines. Useful for tests and embedding.

use std::collections::HashMap;
use std::marker::PhantomData;

use parking_lot::RwLock;

use crate::error::{Result, RollcallError};
use crate::record::{encode, Record};

use super::lines;
use super::{AddRequest, BatchAddRequest, RecordStore};

/// Memory-backed storage for records of type `R`
pub struct MemoryStorage<R> {
    /// model → lines (header first), like the contents of a file
    models: RwLock<HashMap<String, Vec<String>>>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MemoryStorage<R> {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            _record: PhantomData,
        }
    }

    /// Number of models that have data
    pub fn model_count(&self) -> usize {
        self.models.read().len()
    }
}

impl<R: Record> Default for MemoryStorage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for MemoryStorage<R> {
    fn add(&self, request: AddRequest<'_, R>) -> Result<()> {
        let line = encode(request.record)?;

        let mut models = self.models.write();
        models
            .entry(request.model.to_string())
            .or_insert_with(|| vec![request.header.to_string()])
            .push(line);
        Ok(())
    }

    fn get(&self, model: &str, id: &str) -> Result<Option<String>> {
        let models = self.models.read();
        Ok(models
            .get(model)
            .and_then(|all| all.iter().find(|line| lines::has_id(line, id)))
            .cloned())
    }

    fn remove(&self, model: &str, id: &str) -> Result<()> {
        if let Some(all) = self.models.write().get_mut(model) {
            lines::remove_id(all, id);
        }
        Ok(())
    }

    fn update(&self, model: &str, id: &str, record: &R) -> Result<()> {
        let line = encode(record)?;

        let mut models = self.models.write();
        let all = models
            .get_mut(model)
            .ok_or_else(|| RollcallError::NotFound(format!("no data for model {}", model)))?;

        if lines::replace_first(all, id, line) {
            Ok(())
        } else {
            Err(RollcallError::NotFound(format!(
                "record with ID {} in {}",
                id, model
            )))
        }
    }

    fn get_all(&self, model: &str) -> Result<Vec<String>> {
        Ok(self.models.read().get(model).cloned().unwrap_or_default())
    }

    fn batch_add(&self, request: BatchAddRequest<'_, R>) -> Result<()> {
        if request.records.is_empty() {
            return Ok(());
        }
        let encoded = request
            .records
            .iter()
            .map(encode)
            .collect::<Result<Vec<_>>>()?;

        let mut models = self.models.write();
        models
            .entry(request.model.to_string())
            .or_insert_with(|| vec![request.header.to_string()])
            .extend(encoded);
        Ok(())
    }

    fn batch_update(&self, model: &str, records: HashMap<String, R>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut updates = records
            .into_iter()
            .map(|(id, record)| Ok((id, encode(&record)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let mut models = self.models.write();
        let all = models
            .get_mut(model)
            .ok_or_else(|| RollcallError::NotFound(format!("no data for model {}", model)))?;

        // Work on a copy so a zero-match batch leaves the model untouched
        let mut staged = all.clone();
        if lines::apply_batch(&mut staged, &mut updates) == 0 {
            return Err(RollcallError::NoMatches {
                model: model.to_string(),
            });
        }
        *all = staged;
        Ok(())
    }

    fn value_exists_in_column(
        &self,
        model: &str,
        value: &str,
        column: usize,
        exclude_id: Option<&str>,
    ) -> Result<bool> {
        let models = self.models.read();
        Ok(models.get(model).map_or(false, |all| {
            all.iter()
                .skip(1)
                .any(|line| lines::column_matches(line, value, column, exclude_id))
        }))
    }
}
