//! Lifecycle Controller - owns the engine instance and reconciles props.
//!
//! ```text
//!              on_mount()                on_unmount()
//! Unmounted ─────────────▶ Mounted ─────────────────▶ Released
//!                          │    ▲
//!                          └────┘ on_property_change()
//! ```
//!
//! - **Mount** builds the configuration (mapped props + declared columns)
//!   and constructs the engine against the host surface. Happens once.
//! - **Update** builds a fresh configuration and patches the live engine.
//!   The engine is never rebuilt, and the host is told not to re-render:
//!   once mounted, the engine alone owns its visual state.
//! - **Unmount** destroys the engine exactly once. Released is terminal.
//!
//! Misuse (mount twice, update before mount, anything after release) is
//! reported as a [`GridError`] instead of being ignored.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cache::{EditCache, RenderCache};
use crate::engine::{ConfigFor, GridEngine};
use crate::error::{GridError, Result};
use crate::settings::{get_settings, ColumnSettingsTable};
use crate::types::{CellKey, EditorKey, GridOptions, PropertySet};

use super::column::{ColumnContext, ColumnDeclaration};

// =============================================================================
// Lifecycle State
// =============================================================================

/// Observable lifecycle phase of a [`GridAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Mounted,
    Released,
}

enum Lifecycle<E> {
    Unmounted,
    Mounted(E),
    Released,
}

type Table<E> = ColumnSettingsTable<<E as GridEngine>::RenderArtifact, <E as GridEngine>::EditArtifact>;

// =============================================================================
// Grid Adapter
// =============================================================================

/// Keeps one grid engine instance in sync with declarative props.
///
/// The adapter exclusively owns the engine, the column settings table and
/// both artifact caches. Declarations reach the table and caches only
/// through [`ColumnContext`] handles.
///
/// # Example
///
/// ```ignore
/// let mut grid = GridAdapter::<RecordingEngine>::new(props).with_surface(surface);
/// grid.render_columns(&columns)?;
/// grid.on_mount()?;
///
/// // Later, on every prop change from the host:
/// let rerender = grid.on_property_change(next_props)?; // always false
///
/// grid.on_unmount();
/// ```
pub struct GridAdapter<E: GridEngine> {
    props: PropertySet,
    surface: Option<E::Surface>,
    lifecycle: Lifecycle<E>,
    columns: Rc<RefCell<Table<E>>>,
    render_cache: RenderCache<CellKey, E::RenderArtifact>,
    edit_cache: EditCache<EditorKey, E::EditArtifact>,
}

impl<E: GridEngine> GridAdapter<E> {
    /// Adapter with default options (render cache of 5000 artifacts).
    pub fn new(props: PropertySet) -> Self {
        Self::from_parts(props, RenderCache::with_default_capacity())
    }

    /// Adapter with explicit options. Fails on a zero cache capacity.
    pub fn with_options(props: PropertySet, options: GridOptions) -> Result<Self> {
        let capacity = options.render_capacity()?;
        Ok(Self::from_parts(props, RenderCache::new(capacity)))
    }

    fn from_parts(props: PropertySet, render_cache: RenderCache<CellKey, E::RenderArtifact>) -> Self {
        Self {
            props,
            surface: None,
            lifecycle: Lifecycle::Unmounted,
            columns: Rc::new(RefCell::new(ColumnSettingsTable::new())),
            render_cache,
            edit_cache: EditCache::new(),
        }
    }

    /// Builder form of [`set_surface`](Self::set_surface).
    pub fn with_surface(mut self, surface: E::Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Designate the surface the engine is constructed against.
    ///
    /// Only read by `on_mount()`; a mounted engine keeps its surface.
    pub fn set_surface(&mut self, surface: E::Surface) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&E::Surface> {
        self.surface.as_ref()
    }

    /// Package version of spark-grid.
    pub fn version() -> &'static str {
        crate::VERSION
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn state(&self) -> LifecycleState {
        match self.lifecycle {
            Lifecycle::Unmounted => LifecycleState::Unmounted,
            Lifecycle::Mounted(_) => LifecycleState::Mounted,
            Lifecycle::Released => LifecycleState::Released,
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted(_))
    }

    /// Props of the latest reconciliation (or construction).
    pub fn props(&self) -> &PropertySet {
        &self.props
    }

    /// Replace props without reconciling. Intended for the pre-mount phase.
    pub fn set_props(&mut self, props: PropertySet) {
        self.props = props;
    }

    /// The live engine. Fails fast when not mounted or already released.
    pub fn engine(&self) -> Result<&E> {
        match &self.lifecycle {
            Lifecycle::Mounted(engine) => Ok(engine),
            Lifecycle::Unmounted => Err(GridError::NotMounted),
            Lifecycle::Released => Err(GridError::Released),
        }
    }

    pub fn engine_mut(&mut self) -> Result<&mut E> {
        match &mut self.lifecycle {
            Lifecycle::Mounted(engine) => Ok(engine),
            Lifecycle::Unmounted => Err(GridError::NotMounted),
            Lifecycle::Released => Err(GridError::Released),
        }
    }

    pub fn render_cache(&self) -> &RenderCache<CellKey, E::RenderArtifact> {
        &self.render_cache
    }

    pub fn edit_cache(&self) -> &EditCache<EditorKey, E::EditArtifact> {
        &self.edit_cache
    }

    /// Number of column indices that currently hold a declared config.
    pub fn declared_columns(&self) -> usize {
        self.columns.borrow().declared_count()
    }

    // -------------------------------------------------------------------------
    // Column declarations
    // -------------------------------------------------------------------------

    /// Handle for the declaration rendered at column `index`.
    pub fn column_context(&self, index: usize) -> ColumnContext<E::RenderArtifact, E::EditArtifact> {
        ColumnContext::new(
            index,
            self.columns.clone(),
            self.render_cache.clone(),
            self.edit_cache.clone(),
        )
    }

    /// Render pass over the grid's column children.
    ///
    /// Each declaration gets the index of its position and emits its config.
    /// Run this before `on_mount()` / `on_property_change()` so the
    /// configuration built there sees the current declarations.
    pub fn render_columns(&self, declarations: &[ColumnDeclaration<E::RenderArtifact, E::EditArtifact>]) -> Result<()> {
        for (index, declaration) in declarations.iter().enumerate() {
            declaration.declare(&self.column_context(index))?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Fresh configuration from the current props and declared columns.
    pub fn build_configuration(&self) -> ConfigFor<E> {
        self.columns.borrow().merge_into(get_settings(&self.props))
    }

    /// Construct the engine. At most one instance per adapter lifetime.
    pub fn on_mount(&mut self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Unmounted => {}
            Lifecycle::Mounted(_) => return Err(GridError::AlreadyMounted),
            Lifecycle::Released => return Err(GridError::Released),
        }

        let surface = self.surface.as_ref().ok_or(GridError::MissingSurface)?;
        let config = self.build_configuration();
        log::debug!(
            "mounting grid: {} options, {} declared columns",
            config.options.len(),
            self.declared_columns()
        );
        let engine = E::construct(surface, config);
        self.lifecycle = Lifecycle::Mounted(engine);
        Ok(())
    }

    /// Reconcile new props into the live engine.
    ///
    /// Returns whether the host should run its default re-render, which is
    /// always `false`: the engine was already patched in place.
    pub fn on_property_change(&mut self, next: PropertySet) -> Result<bool> {
        self.engine()?;
        self.props = next;
        self.refresh()?;
        Ok(false)
    }

    /// Re-apply the current props, e.g. after columns were re-declared.
    pub fn refresh(&mut self) -> Result<()> {
        let config = self.build_configuration();
        log::trace!("patching grid with {} options", config.options.len());
        self.engine_mut()?.apply_configuration(config, false);
        Ok(())
    }

    /// Destroy the engine. Returns `true` only for the call that released it.
    pub fn on_unmount(&mut self) -> bool {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Released) {
            Lifecycle::Mounted(mut engine) => {
                engine.destroy();
                log::debug!("grid unmounted, engine destroyed");
                true
            }
            Lifecycle::Unmounted => {
                log::debug!("grid released before it was mounted");
                false
            }
            Lifecycle::Released => false,
        }
    }
}

impl<E: GridEngine> Drop for GridAdapter<E> {
    fn drop(&mut self) {
        self.on_unmount();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineEvent, RecordingEngine, RecordingSurface};
    use serde_json::json;

    type Adapter = GridAdapter<RecordingEngine>;

    fn mounted(props: PropertySet) -> (Adapter, RecordingSurface) {
        let surface = RecordingSurface::new();
        let mut grid = Adapter::new(props).with_surface(surface.clone());
        grid.on_mount().unwrap();
        (grid, surface)
    }

    #[test]
    fn test_mount_constructs_once() {
        let (mut grid, surface) = mounted(PropertySet::new().with("rowHeaders", true));

        assert_eq!(grid.state(), LifecycleState::Mounted);
        assert_eq!(surface.constructed(), 1);
        assert_eq!(grid.engine().unwrap().option("rowHeaders"), Some(&json!(true)));

        assert!(matches!(grid.on_mount(), Err(GridError::AlreadyMounted)));
        assert_eq!(surface.constructed(), 1);
    }

    #[test]
    fn test_mount_without_surface_fails() {
        let mut grid = Adapter::new(PropertySet::new());
        assert!(matches!(grid.on_mount(), Err(GridError::MissingSurface)));
        assert_eq!(grid.state(), LifecycleState::Unmounted);
    }

    #[test]
    fn test_update_patches_same_instance() {
        let (mut grid, surface) = mounted(PropertySet::new().with("height", 100));

        for height in [200, 300, 400] {
            let rerender = grid.on_property_change(PropertySet::new().with("height", height)).unwrap();
            assert!(!rerender);
        }

        assert_eq!(surface.constructed(), 1);
        assert_eq!(surface.applied(), 3);
        assert_eq!(grid.engine().unwrap().instance(), 1);
        assert_eq!(grid.engine().unwrap().option("height"), Some(&json!(400)));
        assert!(surface.events().iter().all(|event| match event {
            EngineEvent::Apply { skip_render, instance, .. } => !skip_render && *instance == 1,
            _ => true,
        }));
    }

    #[test]
    fn test_update_before_mount_fails() {
        let mut grid = Adapter::new(PropertySet::new()).with_surface(RecordingSurface::new());
        let result = grid.on_property_change(PropertySet::new().with("a", 1));

        assert!(matches!(result, Err(GridError::NotMounted)));
        assert!(grid.props().is_empty());
    }

    #[test]
    fn test_unmount_releases_once() {
        let (mut grid, surface) = mounted(PropertySet::new());

        assert!(grid.on_unmount());
        assert!(!grid.on_unmount());
        drop(grid);

        assert_eq!(surface.destroyed(), 1);
    }

    #[test]
    fn test_operations_after_release_fail_fast() {
        let (mut grid, surface) = mounted(PropertySet::new());
        grid.on_unmount();

        assert_eq!(grid.state(), LifecycleState::Released);
        assert!(matches!(grid.engine(), Err(GridError::Released)));
        assert!(matches!(grid.on_property_change(PropertySet::new()), Err(GridError::Released)));
        assert!(matches!(grid.on_mount(), Err(GridError::Released)));
        assert_eq!(surface.constructed(), 1);
    }

    #[test]
    fn test_drop_destroys_mounted_engine() {
        let (grid, surface) = mounted(PropertySet::new());
        drop(grid);
        assert_eq!(surface.destroyed(), 1);
    }

    #[test]
    fn test_reserved_props_stay_with_host() {
        let (grid, surface) = mounted(
            PropertySet::new()
                .with("id", "orders")
                .with("className", "striped")
                .with("style", json!({"height": 20}))
                .with("data", json!([[1]])),
        );

        assert_eq!(grid.props().id(), Some("orders"));
        match &surface.events()[0] {
            EngineEvent::Construct { options, .. } => {
                assert_eq!(options.len(), 1);
                assert!(options.contains_key("data"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_declared_columns_override_bulk_at_mount() {
        let surface = RecordingSurface::new();
        let mut grid = Adapter::new(PropertySet::new().with("columns", json!([{"data": "bulk"}])))
            .with_surface(surface);
        grid.render_columns(&[
            ColumnDeclaration::new(PropertySet::new().with("data", "first")),
            ColumnDeclaration::new(PropertySet::new().with("data", "second")),
        ])
        .unwrap();
        grid.on_mount().unwrap();

        let config = grid.engine().unwrap().config();
        assert!(config.columns.as_ref().unwrap().as_bulk().is_none());
        assert_eq!(config.column(0).unwrap().option("data"), Some(&json!("first")));
        assert_eq!(config.column(1).unwrap().option("data"), Some(&json!("second")));
    }

    #[test]
    fn test_bulk_columns_kept_without_declarations() {
        let bulk = json!([{"data": "bulk"}]);
        let (grid, _) = mounted(PropertySet::new().with("columns", bulk.clone()));

        let config = grid.engine().unwrap().config();
        assert_eq!(config.columns.as_ref().unwrap().as_bulk(), Some(&bulk));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = Adapter::with_options(PropertySet::new(), GridOptions { render_cache_capacity: 0 });
        assert!(matches!(result, Err(GridError::InvalidCapacity)));

        let grid = Adapter::with_options(PropertySet::new(), GridOptions { render_cache_capacity: 2 }).unwrap();
        assert_eq!(grid.render_cache().capacity().get(), 2);
    }

    #[test]
    fn test_adapters_own_independent_state() {
        let a = Adapter::new(PropertySet::new());
        let b = Adapter::new(PropertySet::new());

        a.column_context(0).emit_column_settings(Default::default()).unwrap();

        assert_eq!(a.declared_columns(), 1);
        assert_eq!(b.declared_columns(), 0);
        assert!(!a.render_cache().same_store(b.render_cache()));
        assert!(!a.edit_cache().same_store(b.edit_cache()));
    }

    #[test]
    fn test_version_passthrough() {
        assert_eq!(Adapter::version(), env!("CARGO_PKG_VERSION"));
    }
}
