//! Error type shared by the adapter, the settings layer and the binding.

use thiserror::Error;

/// Errors raised by spark-grid.
///
/// Lifecycle variants are contract violations by the host: they are returned
/// immediately and never degrade into silent no-ops.
#[derive(Debug, Error)]
pub enum GridError {
    /// `on_mount()` was called before a host surface was designated.
    #[error("cannot mount grid: no host surface was provided")]
    MissingSurface,

    /// `on_mount()` was called on an adapter that already owns an engine.
    #[error("grid is already mounted")]
    AlreadyMounted,

    /// An engine operation was requested before `on_mount()`.
    #[error("grid is not mounted")]
    NotMounted,

    /// An operation was requested after `on_unmount()` released the engine.
    #[error("grid engine has been destroyed")]
    Released,

    /// The render cache was configured with a capacity of zero.
    #[error("render cache capacity must be greater than zero")]
    InvalidCapacity,

    /// A JSON value that must be an object was something else.
    #[error("{0} must be a JSON object")]
    NotAnObject(&'static str),

    /// A column was declared at an index past [`MAX_COLUMNS`](crate::settings::MAX_COLUMNS).
    #[error("column index {index} out of range (max {max})")]
    ColumnIndexOutOfRange { index: usize, max: usize },

    /// Property JSON failed to parse.
    #[error("invalid property JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
