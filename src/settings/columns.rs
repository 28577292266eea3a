//! Column Settings Accumulator - per-column configs keyed by column index.
//!
//! Column declarations emit their resolved [`ColumnConfig`] here, possibly
//! out of order. The table grows sparsely and an emission for an index
//! replaces whatever was there. Once anything has been declared, the
//! declared list replaces the property set's bulk `columns` value wholesale.

use super::config::{ColumnConfig, Columns, EngineConfiguration};
use crate::error::{GridError, Result};

/// Upper bound on declared column indices.
pub const MAX_COLUMNS: usize = 1 << 16;

/// Sparse, index-ordered table of declared column configs.
pub struct ColumnSettingsTable<R, D> {
    entries: Vec<Option<ColumnConfig<R, D>>>,
}

impl<R, D> ColumnSettingsTable<R, D> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Store `config` at `index`, replacing any previous config there.
    ///
    /// Lower indices that were never set stay unset. Indices at or past
    /// [`MAX_COLUMNS`] are rejected and leave the table untouched.
    pub fn set(&mut self, index: usize, config: ColumnConfig<R, D>) -> Result<()> {
        if index >= MAX_COLUMNS {
            return Err(GridError::ColumnIndexOutOfRange { index, max: MAX_COLUMNS });
        }
        if index >= self.entries.len() {
            self.entries.resize_with(index + 1, || None);
        }
        self.entries[index] = Some(config);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&ColumnConfig<R, D>> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Length of the table, counting unset slots below the highest index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True until the first column is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of indices that actually hold a config.
    pub fn declared_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn entries(&self) -> &[Option<ColumnConfig<R, D>>] {
        &self.entries
    }

    /// Apply the column precedence rule to a freshly mapped configuration.
    ///
    /// With at least one declared column, `columns` becomes the table contents
    /// in index order and any bulk list is dropped. Otherwise the
    /// configuration is returned unchanged.
    pub fn merge_into(&self, mut config: EngineConfiguration<R, D>) -> EngineConfiguration<R, D> {
        if !self.is_empty() {
            config.columns = Some(Columns::Declared(self.entries.clone()));
        }
        config
    }
}

impl<R, D> Default for ColumnSettingsTable<R, D> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
