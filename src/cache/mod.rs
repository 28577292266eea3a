//! Artifact Caches - reuse of per-cell render and edit artifacts.
//!
//! - [`RenderCache`] - bounded, least-recently-used eviction
//! - [`EditCache`] - unbounded, exact-key reuse
//!
//! Both are handles: cloning one shares the underlying store, which is how
//! column declarations and engine callbacks see the same entries across
//! update passes. Each adapter owns its own pair.

mod edit;
mod render;

pub use edit::EditCache;
pub use render::{RenderCache, DEFAULT_RENDER_CACHE_CAPACITY};
