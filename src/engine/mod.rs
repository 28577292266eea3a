//! Grid Engine - the seam to the external imperative grid widget.
//!
//! The engine owns rendering, virtualization, scrolling, selection and
//! everything else about the grid's visual state. spark-grid only ever
//! talks to it through three calls:
//!
//! ```text
//! on_mount          → GridEngine::construct(surface, config)
//! on_property_change → engine.apply_configuration(config, false)
//! on_unmount        → engine.destroy()
//! ```
//!
//! [`RecordingEngine`] is a headless implementation that journals every
//! call; tests use it to observe what the adapter did.

mod recording;

pub use recording::{EngineEvent, RecordingEngine, RecordingSurface};

use crate::settings::EngineConfiguration;

/// Configuration type accepted by engine `E`.
pub type ConfigFor<E> =
    EngineConfiguration<<E as GridEngine>::RenderArtifact, <E as GridEngine>::EditArtifact>;

/// An imperative grid widget driven by a [`GridAdapter`](crate::GridAdapter).
pub trait GridEngine: Sized {
    /// Where the engine draws (a DOM node, a terminal region, a window...).
    type Surface;
    /// Pre-built cell content returned by column renderers.
    type RenderArtifact: 'static;
    /// Editor instance shared by every cell of a column.
    type EditArtifact: 'static;

    /// Build a live instance against `surface`. Called once per adapter.
    fn construct(
        surface: &Self::Surface,
        config: EngineConfiguration<Self::RenderArtifact, Self::EditArtifact>,
    ) -> Self;

    /// Patch the live instance in place, keeping scroll position, selection
    /// and other internal state.
    fn apply_configuration(
        &mut self,
        config: EngineConfiguration<Self::RenderArtifact, Self::EditArtifact>,
        skip_render: bool,
    );

    /// Tear the instance down. Called at most once.
    fn destroy(&mut self);
}
