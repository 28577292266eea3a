//! Settings Mapper - PropertySet → EngineConfiguration.
//!
//! Pure translation from what the host declares to what the engine accepts:
//!
//! 1. Entries of a bulk `settings` object are copied first
//! 2. Every other top-level entry is copied next and wins over `settings`
//! 3. Known `snake_case` aliases are rewritten to the engine's spelling
//!    (`row_headers` → `rowHeaders`); within one layer the engine spelling
//!    wins when both are present
//! 4. Reserved keys (layout, structure, `_`-prefixed internals) are dropped
//! 5. A surviving `columns` entry becomes [`Columns::Bulk`]
//!
//! Unknown keys pass through untouched, underscores included. Nothing is
//! cached.

use serde_json::Value;

use super::config::{Columns, EngineConfiguration};
use crate::types::{OptionMap, PropertySet};

/// Key carrying a bulk options object.
pub const SETTINGS_KEY: &str = "settings";

/// Key carrying the bulk column list.
pub const COLUMNS_KEY: &str = "columns";

/// Keys that belong to the adapter or its host and never reach the engine.
pub const RESERVED_KEYS: &[&str] = &["id", "class", "className", "style", "children", SETTINGS_KEY];

/// Rust-side spellings of engine options, mapped to the engine's names.
pub const KEY_ALIASES: &[(&str, &str)] = &[
    ("class_name", "className"),
    ("row_headers", "rowHeaders"),
    ("col_headers", "colHeaders"),
    ("col_widths", "colWidths"),
    ("row_heights", "rowHeights"),
    ("fixed_rows_top", "fixedRowsTop"),
    ("fixed_rows_bottom", "fixedRowsBottom"),
    ("fixed_columns_start", "fixedColumnsStart"),
    ("read_only", "readOnly"),
    ("license_key", "licenseKey"),
    ("stretch_h", "stretchH"),
    ("min_spare_rows", "minSpareRows"),
    ("min_spare_cols", "minSpareCols"),
    ("context_menu", "contextMenu"),
    ("column_sorting", "columnSorting"),
    ("manual_column_resize", "manualColumnResize"),
    ("manual_row_resize", "manualRowResize"),
    ("auto_wrap_row", "autoWrapRow"),
    ("auto_wrap_col", "autoWrapCol"),
    ("merge_cells", "mergeCells"),
    ("nested_headers", "nestedHeaders"),
    ("hidden_columns", "hiddenColumns"),
    ("hidden_rows", "hiddenRows"),
    ("date_format", "dateFormat"),
    ("numeric_format", "numericFormat"),
];

/// Whether `key` (already normalized) is kept away from the engine.
pub fn is_reserved(key: &str) -> bool {
    key.starts_with('_') || RESERVED_KEYS.contains(&key)
}

fn alias_target(key: &str) -> Option<&'static str> {
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
}

/// The engine's name for `key`: the alias target for a known alias, the key
/// itself otherwise.
pub fn normalize_key(key: &str) -> &str {
    alias_target(key).unwrap_or(key)
}

/// Copy one layer of entries. Aliases go in first so an engine spelling in
/// the same layer overrides them.
fn copy_layer(out: &mut OptionMap, entries: &OptionMap) {
    for (key, value) in entries {
        if let Some(target) = alias_target(key) {
            if !is_reserved(target) {
                out.insert(target.to_string(), value.clone());
            }
        }
    }
    for (key, value) in entries {
        if alias_target(key).is_none() && !is_reserved(key) {
            out.insert(key.clone(), value.clone());
        }
    }
}

/// Map a property set to engine options, keeping any `columns` entry inline.
///
/// Column declarations use this directly: their own props never carry a
/// nested column list.
pub fn map_options(props: &PropertySet) -> OptionMap {
    let mut out = OptionMap::new();

    if let Some(Value::Object(settings)) = props.get(SETTINGS_KEY) {
        copy_layer(&mut out, settings);
    }
    // `settings` itself is reserved, so this layer skips it
    copy_layer(&mut out, props.entries());

    out
}

/// Build a fresh engine configuration from a property set.
pub fn get_settings<R, D>(props: &PropertySet) -> EngineConfiguration<R, D> {
    let mut options = map_options(props);
    let columns = options.remove(COLUMNS_KEY).map(Columns::Bulk);
    EngineConfiguration { options, columns }
}

// =============================================================================
// Tests
// =============================================================================
