use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::table::{NutritionError, NutritionTable};
use crate::fallback::fallback_records;

/// Shared, atomically replaceable view of the nutrition table. Readers take
/// a snapshot `Arc` and keep working against it; an administrative upload
/// builds and validates a whole new table before swapping the `Arc`, so a
/// reader observes either the old table or the new one, never a mix.
pub struct NutritionHandle {
    inner: RwLock<Arc<NutritionTable>>,
}

impl NutritionHandle {
    pub fn new(table: NutritionTable) -> Self {
        Self {
            inner: RwLock::new(Arc::new(table)),
        }
    }

    /// Load from a dataset file, falling back to the built-in records when
    /// the file is missing or unparseable.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let table = match std::fs::read_to_string(path) {
            Ok(payload) => match NutritionTable::from_json_str(&payload) {
                Ok(table) => {
                    tracing::info!(records = table.len(), path = %path.display(), "nutrition dataset loaded");
                    table
                }
                Err(err) => {
                    tracing::error!(error = %err, path = %path.display(), "nutrition dataset unreadable, using fallback");
                    NutritionTable::from_records(fallback_records())
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "nutrition dataset file missing, using fallback");
                NutritionTable::from_records(fallback_records())
            }
        };
        Self::new(table)
    }

    pub fn snapshot(&self) -> Arc<NutritionTable> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Validate and atomically install a replacement dataset. Returns the
    /// new record count; on error the current table is untouched.
    pub fn replace_from_json(&self, payload: &str) -> Result<usize, NutritionError> {
        let table = NutritionTable::from_json_str(payload)?;
        let count = table.len();
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(table);
        tracing::info!(records = count, "nutrition dataset replaced");
        Ok(count)
    }
}
