//! Recording engine - a headless [`GridEngine`] that journals every call.
//!
//! The journal lives on the surface, so it survives the engine and can be
//! inspected after unmount.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use super::GridEngine;
use crate::settings::EngineConfiguration;
use crate::types::{CellContext, OptionMap};

/// One call the adapter made into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Construct { instance: usize, options: OptionMap },
    Apply { instance: usize, options: OptionMap, skip_render: bool },
    Destroy { instance: usize },
}

/// Host surface for [`RecordingEngine`]: a shared event journal.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Rc<RefCell<Vec<EngineEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    pub fn constructed(&self) -> usize {
        self.count(|event| matches!(event, EngineEvent::Construct { .. }))
    }

    pub fn applied(&self) -> usize {
        self.count(|event| matches!(event, EngineEvent::Apply { .. }))
    }

    pub fn destroyed(&self) -> usize {
        self.count(|event| matches!(event, EngineEvent::Destroy { .. }))
    }

    fn count(&self, predicate: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn record(&self, event: EngineEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Headless engine rendering cells to strings.
pub struct RecordingEngine {
    instance: usize,
    surface: RecordingSurface,
    config: EngineConfiguration<String, String>,
}

impl RecordingEngine {
    /// Sequence number of this instance on its surface (first is 1).
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// The configuration most recently constructed with or applied.
    pub fn config(&self) -> &EngineConfiguration<String, String> {
        &self.config
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.config.option(key)
    }

    /// Ask the declared column renderer for a cell, as the live grid would
    /// while painting. `None` when the column has no renderer.
    pub fn render_cell(&self, row: usize, column: usize, value: impl Into<Value>) -> Option<Rc<String>> {
        let renderer = self.config.column(column)?.renderer.as_ref()?;
        Some(renderer(&CellContext::new(row, column, value)))
    }

    /// Editor attached to a declared column.
    pub fn editor(&self, column: usize) -> Option<Rc<String>> {
        self.config.column(column)?.editor.clone()
    }
}

impl GridEngine for RecordingEngine {
    type Surface = RecordingSurface;
    type RenderArtifact = String;
    type EditArtifact = String;

    fn construct(surface: &RecordingSurface, config: EngineConfiguration<String, String>) -> Self {
        let instance = surface.constructed() + 1;
        surface.record(EngineEvent::Construct {
            instance,
            options: config.options.clone(),
        });
        Self {
            instance,
            surface: surface.clone(),
            config,
        }
    }

    fn apply_configuration(&mut self, config: EngineConfiguration<String, String>, skip_render: bool) {
        self.surface.record(EngineEvent::Apply {
            instance: self.instance,
            options: config.options.clone(),
            skip_render,
        });
        self.config = config;
    }

    fn destroy(&mut self) {
        self.surface.record(EngineEvent::Destroy {
            instance: self.instance,
        });
    }
}
