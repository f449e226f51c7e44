mod collection;
mod crispr;
mod insectary;

pub use collection::normalize_collection;
pub use crispr::normalize_crispr;
pub use insectary::{normalize_insectary, split_species, Taxonomy};

use tracing::debug;
use wings_parser::schema::CAM_ID;
use wings_parser::Table;

/// Explicit "unknown" marker the front-end distinguishes from a missing value.
pub const NA: &str = "NA";

pub(crate) fn is_present(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.trim().is_empty() && v != NA)
}

/// Replaces `CAM_ID` with `override_column` wherever the override holds a real identifier.
pub(crate) fn reconcile_identifier(table: &mut Table, override_column: &str) {
    let Some(src) = table.column_index(override_column) else {
        return;
    };
    let dst = table.ensure_column(CAM_ID);

    let mut replaced = 0usize;
    for row in 0..table.height() {
        let value = table.get(row, src);
        if is_present(value) {
            let value = value.map(str::to_string);
            table.set(row, dst, value);
            replaced += 1;
        }
    }
    debug!(
        sheet = table.kind.label(),
        column = override_column,
        replaced,
        "Reconciled identifiers"
    );
}

/// Fills null cells of `column` with `default`, creating the column if absent.
pub(crate) fn fill_default(table: &mut Table, column: &str, default: &str) {
    let idx = table.ensure_column(column);
    for row in 0..table.height() {
        if table.get(row, idx).is_none() {
            table.set(row, idx, Some(default.to_string()));
        }
    }
}
