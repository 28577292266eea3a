//! Core types for spark-grid.
//!
//! These are the values that flow between the host tree, the settings layer,
//! the artifact caches and the grid engine.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use spark_signals::Signal;

use crate::cache::DEFAULT_RENDER_CACHE_CAPACITY;
use crate::error::{GridError, Result};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by bindings.
///
/// Call this to unmount the grid and release the engine.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value. Reading inside an effect tracks the source.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Property Set
// =============================================================================

/// Option name → value mapping handed to the grid engine.
pub type OptionMap = serde_json::Map<String, Value>;

/// The declarative configuration supplied by the host on every render pass.
///
/// Holds layout properties (`id`, `className`, `style`), the structural
/// `children` key, an optional bulk `settings` object and any number of
/// engine options. Only the settings mapper decides which of these reach
/// the engine.
///
/// ```ignore
/// let props = PropertySet::new()
///     .with("id", "orders")
///     .with("row_headers", true)
///     .with("data", json!([[1, 2], [3, 4]]));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet {
    entries: OptionMap,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// The raw entries, reserved keys included.
    pub fn entries(&self) -> &OptionMap {
        &self.entries
    }

    /// Build a property set from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(GridError::NotAnObject("property set")),
        }
    }

    /// Parse a property set from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    // -------------------------------------------------------------------------
    // Layout accessors (consumed by the host, never forwarded to the engine)
    // -------------------------------------------------------------------------

    pub fn id(&self) -> Option<&str> {
        self.entries.get("id").and_then(Value::as_str)
    }

    /// Class name, accepting the `className`, `class` and `class_name` spellings.
    pub fn class_name(&self) -> Option<&str> {
        ["className", "class", "class_name"]
            .iter()
            .find_map(|key| self.entries.get(*key).and_then(Value::as_str))
    }

    pub fn style(&self) -> Option<&Value> {
        self.entries.get("style")
    }
}

impl From<OptionMap> for PropertySet {
    fn from(entries: OptionMap) -> Self {
        Self { entries }
    }
}

// =============================================================================
// Cells
// =============================================================================

/// What the engine knows about a cell when it asks for a render artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct CellContext {
    pub row: usize,
    pub column: usize,
    pub value: Value,
}

impl CellContext {
    pub fn new(row: usize, column: usize, value: impl Into<Value>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }
}

/// Render cache key: cell position plus a fingerprint of the cell content.
///
/// Two lookups for the same cell only share an artifact while the content
/// is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row: usize,
    pub column: usize,
    pub fingerprint: u64,
}

impl CellKey {
    pub fn for_cell(cell: &CellContext) -> Self {
        let mut hasher = DefaultHasher::new();
        cell.value.to_string().hash(&mut hasher);
        Self {
            row: cell.row,
            column: cell.column,
            fingerprint: hasher.finish(),
        }
    }
}

/// Edit cache key: the editor's declared name.
pub type EditorKey = String;

// =============================================================================
// Adapter Options
// =============================================================================

/// Construction-time options for a grid adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Maximum number of render artifacts kept alive (default: 5000).
    pub render_cache_capacity: usize,
}

impl GridOptions {
    /// Validated render cache capacity.
    pub fn render_capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.render_cache_capacity).ok_or(GridError::InvalidCapacity)
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            render_cache_capacity: DEFAULT_RENDER_CACHE_CAPACITY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
