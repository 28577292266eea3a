//! # spark-grid
//!
//! Declarative data-grid adapter for reactive Rust UIs.
//!
//! A grid engine is an imperative widget with its own state (scroll position,
//! selection, virtualized rows). spark-grid keeps one engine instance in sync
//! with props coming from a declarative tree, without ever rebuilding it, and
//! caches the per-cell artifacts its columns produce so they survive updates.
//!
//! ## Architecture
//!
//! ```text
//! ColumnDeclaration ─▶ ColumnContext ─▶ ColumnSettingsTable ─┐
//!                                                             ├─▶ EngineConfiguration ─▶ GridEngine
//! PropertySet ──────────▶ settings::get_settings ─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - PropertySet, PropValue, cell keys, options
//! - [`settings`] - settings mapper, column settings table, configuration types
//! - [`cache`] - LRU render cache and unbounded edit cache
//! - [`engine`] - the `GridEngine` trait and a recording engine
//! - [`adapter`] - lifecycle controller, column declarations, reactive binding
//! - [`error`] - `GridError`

pub mod adapter;
pub mod cache;
pub mod engine;
pub mod error;
pub mod settings;
pub mod types;

/// Package version, passed through from the crate metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use types::*;

pub use error::{GridError, Result};

pub use adapter::{mount_reactive, ColumnContext, ColumnDeclaration, GridAdapter, LifecycleState};

pub use cache::{EditCache, RenderCache, DEFAULT_RENDER_CACHE_CAPACITY};

pub use engine::{ConfigFor, EngineEvent, GridEngine, RecordingEngine, RecordingSurface};

pub use settings::{
    get_settings, map_options, CellRenderer, ColumnConfig, ColumnSettingsTable, Columns,
    EngineConfiguration, MAX_COLUMNS,
};
