//! Grid Adapter - lifecycle, column declarations and host binding.
//!
//! - [`GridAdapter`] - owns the engine instance, reconciles props into it
//! - [`ColumnDeclaration`] / [`ColumnContext`] - per-column settings channel
//! - [`mount_reactive`] - spark-signals binding that keeps the grid in sync
//!
//! # Render pass
//!
//! ```text
//! host tree ─▶ render_columns(decls) ─▶ ColumnSettingsTable
//!           ─▶ on_mount / on_property_change
//!                 └─▶ get_settings(props) + table ─▶ GridEngine
//! ```

mod binding;
mod column;
mod controller;

pub use binding::mount_reactive;
pub use column::{ColumnContext, ColumnDeclaration};
pub use controller::{GridAdapter, LifecycleState};
