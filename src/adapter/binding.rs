//! Reactive binding - drives a [`GridAdapter`] from a reactive prop source.
//!
//! This is the host-binding layer for spark-signals based trees: the grid is
//! mounted with the current props, then one effect re-reconciles whenever the
//! source changes. The effect never asks the tree to re-render; the engine
//! is patched in place.
//!
//! ```ignore
//! let props = signal(PropertySet::new().with("data", rows));
//! let grid = Rc::new(RefCell::new(GridAdapter::new(PropertySet::new()).with_surface(surface)));
//!
//! let cleanup = mount_reactive(grid.clone(), props.clone().into())?;
//!
//! props.set(PropertySet::new().with("data", more_rows)); // engine patched
//! cleanup();                                             // engine destroyed
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use super::controller::GridAdapter;
use crate::engine::GridEngine;
use crate::error::Result;
use crate::types::{Cleanup, PropValue, PropertySet};

/// Mount `adapter` with the current value of `props` and keep it in sync.
///
/// Fails if the initial mount fails (no surface, already mounted, released).
/// A failed mount leaves the adapter's props as they were. The returned
/// cleanup stops tracking and unmounts the adapter.
pub fn mount_reactive<E>(adapter: Rc<RefCell<GridAdapter<E>>>, props: PropValue<PropertySet>) -> Result<Cleanup>
where
    E: GridEngine + 'static,
    E::Surface: 'static,
{
    {
        let mut grid = adapter.borrow_mut();
        let previous = grid.props().clone();
        grid.set_props(props.get());
        if let Err(err) = grid.on_mount() {
            grid.set_props(previous);
            return Err(err);
        }
    }

    // The first effect run only subscribes; mount already applied those props.
    let subscribed = Rc::new(Cell::new(false));
    let target = adapter.clone();
    let stop = effect(move || {
        let next = props.get();
        if !subscribed.replace(true) {
            return;
        }
        let result = target.borrow_mut().on_property_change(next);
        if let Err(err) = result {
            log::warn!("grid update dropped: {err}");
        }
    });

    let cleanup: Cleanup = Box::new(move || {
        stop();
        adapter.borrow_mut().on_unmount();
    });
    Ok(cleanup)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::LifecycleState;
    use crate::engine::{RecordingEngine, RecordingSurface};
    use crate::error::GridError;
    use serde_json::json;
    use spark_signals::{flush_sync, signal};

    fn adapter(surface: &RecordingSurface) -> Rc<RefCell<GridAdapter<RecordingEngine>>> {
        Rc::new(RefCell::new(
            GridAdapter::new(PropertySet::new()).with_surface(surface.clone()),
        ))
    }

    #[test]
    fn test_signal_changes_patch_engine() {
        let surface = RecordingSurface::new();
        let grid = adapter(&surface);
        let props = signal(PropertySet::new().with("height", 100));

        let cleanup = mount_reactive(grid.clone(), props.clone().into()).unwrap();
        flush_sync();

        assert_eq!(surface.constructed(), 1);
        assert_eq!(surface.applied(), 0);

        props.set(PropertySet::new().with("height", 250));
        flush_sync();

        assert_eq!(surface.constructed(), 1);
        assert_eq!(surface.applied(), 1);
        assert_eq!(
            grid.borrow().engine().unwrap().option("height"),
            Some(&json!(250))
        );

        cleanup();
        assert_eq!(surface.destroyed(), 1);
        assert_eq!(grid.borrow().state(), LifecycleState::Released);
    }

    #[test]
    fn test_cleanup_stops_tracking() {
        let surface = RecordingSurface::new();
        let grid = adapter(&surface);
        let props = signal(PropertySet::new());

        let cleanup = mount_reactive(grid.clone(), props.clone().into()).unwrap();
        cleanup();

        props.set(PropertySet::new().with("height", 1));
        flush_sync();

        assert_eq!(surface.applied(), 0);
        assert_eq!(surface.destroyed(), 1);
    }

    #[test]
    fn test_static_props_mount_once() {
        let surface = RecordingSurface::new();
        let grid = adapter(&surface);

        let cleanup = mount_reactive(grid.clone(), PropertySet::new().with("rowHeaders", true).into()).unwrap();

        assert_eq!(
            grid.borrow().engine().unwrap().option("rowHeaders"),
            Some(&json!(true))
        );
        cleanup();
    }

    #[test]
    fn test_mount_failure_is_reported() {
        let grid = Rc::new(RefCell::new(GridAdapter::<RecordingEngine>::new(PropertySet::new())));
        let result = mount_reactive(grid, PropertySet::new().into());
        assert!(matches!(result, Err(GridError::MissingSurface)));
    }

    #[test]
    fn test_failed_mount_keeps_previous_props() {
        let surface = RecordingSurface::new();
        let grid = adapter(&surface);
        grid.borrow_mut().set_props(PropertySet::new().with("height", 1));
        grid.borrow_mut().on_mount().unwrap();

        let result = mount_reactive(grid.clone(), PropertySet::new().with("height", 999).into());

        assert!(matches!(result, Err(GridError::AlreadyMounted)));
        let grid = grid.borrow();
        assert_eq!(grid.props().get("height"), Some(&json!(1)));
        assert_eq!(grid.engine().unwrap().option("height"), Some(&json!(1)));
        assert_eq!(surface.constructed(), 1);
    }

    #[test]
    fn test_failed_mount_without_surface_keeps_props() {
        let grid = Rc::new(RefCell::new(GridAdapter::<RecordingEngine>::new(
            PropertySet::new().with("rowHeaders", true),
        )));

        let result = mount_reactive(grid.clone(), PropertySet::new().with("rowHeaders", false).into());

        assert!(result.is_err());
        assert_eq!(grid.borrow().props().get("rowHeaders"), Some(&json!(true)));
    }
}
