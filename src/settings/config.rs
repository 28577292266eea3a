//! Engine configuration - the normalized object handed to the grid engine.
//!
//! A fresh [`EngineConfiguration`] is built on every reconciliation pass.
//! Nothing here is mutated after it has been handed to the engine.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::types::{CellContext, OptionMap};

/// Cell render callback as seen by the engine.
///
/// Returns a shared artifact; the render cache keeps the other reference.
pub type CellRenderer<R> = Rc<dyn Fn(&CellContext) -> Rc<R>>;

// =============================================================================
// Column Config
// =============================================================================

/// One column's overrides, produced by a column declaration.
pub struct ColumnConfig<R, D> {
    /// Engine options for this column (`data`, `type`, `width`, ...).
    pub options: OptionMap,
    /// Cache-backed renderer, if the declaration supplied one.
    pub renderer: Option<CellRenderer<R>>,
    /// Shared editor artifact, if the declaration supplied one.
    pub editor: Option<Rc<D>>,
}

impl<R, D> ColumnConfig<R, D> {
    pub fn new(options: OptionMap) -> Self {
        Self {
            options,
            renderer: None,
            editor: None,
        }
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

impl<R, D> Default for ColumnConfig<R, D> {
    fn default() -> Self {
        Self::new(OptionMap::new())
    }
}

impl<R, D> Clone for ColumnConfig<R, D> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            renderer: self.renderer.clone(),
            editor: self.editor.clone(),
        }
    }
}

impl<R, D> fmt::Debug for ColumnConfig<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("options", &self.options)
            .field("renderer", &self.renderer.is_some())
            .field("editor", &self.editor.is_some())
            .finish()
    }
}

// =============================================================================
// Columns
// =============================================================================

/// Where the configuration's column list came from.
pub enum Columns<R, D> {
    /// The property set's own `columns` value, forwarded untouched.
    Bulk(Value),
    /// Declared columns in index order. `None` marks an index no declaration
    /// has emitted yet; the engine applies its defaults there.
    Declared(Vec<Option<ColumnConfig<R, D>>>),
}

impl<R, D> Columns<R, D> {
    pub fn as_bulk(&self) -> Option<&Value> {
        match self {
            Columns::Bulk(value) => Some(value),
            Columns::Declared(_) => None,
        }
    }

    pub fn as_declared(&self) -> Option<&[Option<ColumnConfig<R, D>>]> {
        match self {
            Columns::Bulk(_) => None,
            Columns::Declared(columns) => Some(columns),
        }
    }
}

impl<R, D> Clone for Columns<R, D> {
    fn clone(&self) -> Self {
        match self {
            Columns::Bulk(value) => Columns::Bulk(value.clone()),
            Columns::Declared(columns) => Columns::Declared(columns.clone()),
        }
    }
}

impl<R, D> fmt::Debug for Columns<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Columns::Bulk(value) => f.debug_tuple("Bulk").field(value).finish(),
            Columns::Declared(columns) => f.debug_tuple("Declared").field(columns).finish(),
        }
    }
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// The fully normalized configuration accepted by a grid engine.
///
/// `options` never carries a `columns` key; the column list lives in
/// [`columns`](Self::columns) so declared columns can carry callbacks.
pub struct EngineConfiguration<R, D> {
    pub options: OptionMap,
    pub columns: Option<Columns<R, D>>,
}

impl<R, D> EngineConfiguration<R, D> {
    pub fn new(options: OptionMap) -> Self {
        Self {
            options,
            columns: None,
        }
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Declared column at `index`, if one was emitted for it.
    pub fn column(&self, index: usize) -> Option<&ColumnConfig<R, D>> {
        self.columns
            .as_ref()
            .and_then(Columns::as_declared)
            .and_then(|columns| columns.get(index))
            .and_then(Option::as_ref)
    }
}

impl<R, D> Default for EngineConfiguration<R, D> {
    fn default() -> Self {
        Self::new(OptionMap::new())
    }
}

impl<R, D> Clone for EngineConfiguration<R, D> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            columns: self.columns.clone(),
        }
    }
}

impl<R, D> fmt::Debug for EngineConfiguration<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfiguration")
            .field("options", &self.options)
            .field("columns", &self.columns)
            .finish()
    }
}
