//! Column declarations - the child side of the column settings channel.
//!
//! A [`ColumnDeclaration`] is what a host tree renders inside a grid: column
//! props plus an optional cell renderer and editor. On every render pass the
//! adapter hands each declaration a [`ColumnContext`] for its position; the
//! declaration resolves itself into a [`ColumnConfig`] and emits it through
//! that context.
//!
//! # Artifact reuse
//!
//! - Renderers are wrapped so each call goes through the render cache keyed
//!   by [`CellKey`]. A cell whose position and content are unchanged gets the
//!   artifact built on an earlier pass.
//! - Editors are looked up in the edit cache by name and only built on a
//!   miss, so re-declaring a column keeps the same editor instance.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cache::{EditCache, RenderCache};
use crate::error::Result;
use crate::settings::{map_options, CellRenderer, ColumnConfig, ColumnSettingsTable};
use crate::types::{CellContext, CellKey, EditorKey, PropertySet};

// =============================================================================
// Column Context
// =============================================================================

/// Handle a column declaration uses to talk to its owning adapter.
///
/// Carries the column index assigned for this render pass and the adapter's
/// caches. Contexts from different adapters never share state.
pub struct ColumnContext<R, D> {
    index: usize,
    table: Rc<RefCell<ColumnSettingsTable<R, D>>>,
    render_cache: RenderCache<CellKey, R>,
    edit_cache: EditCache<EditorKey, D>,
}

impl<R, D> ColumnContext<R, D> {
    pub(crate) fn new(
        index: usize,
        table: Rc<RefCell<ColumnSettingsTable<R, D>>>,
        render_cache: RenderCache<CellKey, R>,
        edit_cache: EditCache<EditorKey, D>,
    ) -> Self {
        Self {
            index,
            table,
            render_cache,
            edit_cache,
        }
    }

    pub fn column_index(&self) -> usize {
        self.index
    }

    /// Store `config` as the settings of this context's column.
    pub fn emit_column_settings(&self, config: ColumnConfig<R, D>) -> Result<()> {
        log::trace!("column {} declared {} options", self.index, config.options.len());
        self.table.borrow_mut().set(self.index, config)
    }

    pub fn render_cache(&self) -> &RenderCache<CellKey, R> {
        &self.render_cache
    }

    pub fn edit_cache(&self) -> &EditCache<EditorKey, D> {
        &self.edit_cache
    }
}

// =============================================================================
// Column Declaration
// =============================================================================

struct EditorDeclaration<D> {
    name: EditorKey,
    factory: Rc<dyn Fn() -> D>,
}

/// A declared grid column.
///
/// ```ignore
/// let price = ColumnDeclaration::new(PropertySet::new().with("data", "price").with("type", "numeric"))
///     .with_renderer(|cell| format!("${}", cell.value))
///     .with_editor("numeric", || NumericEditor::new());
/// ```
pub struct ColumnDeclaration<R, D> {
    props: PropertySet,
    renderer: Option<Rc<dyn Fn(&CellContext) -> R>>,
    editor: Option<EditorDeclaration<D>>,
}

impl<R: 'static, D: 'static> ColumnDeclaration<R, D> {
    pub fn new(props: PropertySet) -> Self {
        Self {
            props,
            renderer: None,
            editor: None,
        }
    }

    /// Build cell artifacts with `render`. Results are cached per cell.
    ///
    /// Cache keys carry the cell position and content only, not the renderer.
    /// Swapping in a different renderer for the same column keeps returning
    /// the old renderer's artifacts until they are evicted.
    pub fn with_renderer(mut self, render: impl Fn(&CellContext) -> R + 'static) -> Self {
        self.renderer = Some(Rc::new(render));
        self
    }

    /// Attach the editor called `name`, built by `factory` the first time
    /// any column asks for that name.
    pub fn with_editor(mut self, name: impl Into<EditorKey>, factory: impl Fn() -> D + 'static) -> Self {
        self.editor = Some(EditorDeclaration {
            name: name.into(),
            factory: Rc::new(factory),
        });
        self
    }

    pub fn props(&self) -> &PropertySet {
        &self.props
    }

    /// Resolve this declaration into the config its column should carry.
    pub fn resolve(&self, ctx: &ColumnContext<R, D>) -> ColumnConfig<R, D> {
        let mut config = ColumnConfig::new(map_options(&self.props));

        if let Some(render) = &self.renderer {
            let render = render.clone();
            let cache = ctx.render_cache().clone();
            let renderer: CellRenderer<R> = Rc::new(move |cell: &CellContext| {
                cache.get_or_insert_with(CellKey::for_cell(cell), || render(cell))
            });
            config.renderer = Some(renderer);
        }

        if let Some(editor) = &self.editor {
            let factory = editor.factory.clone();
            config.editor = Some(ctx.edit_cache().get_or_insert_with(editor.name.clone(), move || factory()));
        }

        config
    }

    /// Resolve and emit through `ctx`.
    pub fn declare(&self, ctx: &ColumnContext<R, D>) -> Result<()> {
        ctx.emit_column_settings(self.resolve(ctx))
    }
}

impl<R, D> Clone for ColumnDeclaration<R, D> {
    fn clone(&self) -> Self {
        Self {
            props: self.props.clone(),
            renderer: self.renderer.clone(),
            editor: self.editor.as_ref().map(|editor| EditorDeclaration {
                name: editor.name.clone(),
                factory: editor.factory.clone(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
