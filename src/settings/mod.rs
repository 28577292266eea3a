//! Settings - from declarative props to engine configuration.
//!
//! - [`mapper`] - PropertySet → EngineConfiguration (pure)
//! - [`columns`] - declared per-column configs and the column precedence rule
//! - [`config`] - the configuration types the engine receives

pub mod columns;
pub mod config;
pub mod mapper;

pub use columns::{ColumnSettingsTable, MAX_COLUMNS};
pub use config::{CellRenderer, ColumnConfig, Columns, EngineConfiguration};
pub use mapper::{get_settings, is_reserved, map_options, normalize_key, KEY_ALIASES, RESERVED_KEYS};
