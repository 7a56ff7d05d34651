//! Column references and the seams towards the owning table.
//!
//! The filter engine never sees concrete row types. The consuming view hands
//! it a [`TableSource`] that resolves column names to typed values, and a
//! [`ColumnCatalog`] that knows which columns exist (including dynamically
//! defined formula and jump columns, which import can reconstruct from export
//! metadata).

use serde::{Deserialize, Serialize};

use crate::value::ColumnValue;

/// Sentinel column name selecting the full-text "match any column" mode.
pub const ALL_COLUMNS: &str = "ALL";

/// Stable row identity used to key the full-text cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// The kind of column behind a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDef {
    /// A column from the tool's static schema.
    Static,
    /// A user-defined formula column.
    Formula {
        /// The formula expression as the user entered it.
        expression: String,
    },
    /// A jump-distance column anchored at a solar system.
    Jump {
        /// The anchor system id.
        system_id: i64,
    },
}

/// Access to a filterable table of rows.
///
/// Implemented by the owning view; all filter evaluation and cache building
/// resolves column values through this trait.
pub trait TableSource {
    /// The row type of the backing collection.
    type Row;

    /// The tool name, used in export headers and diagnostics.
    fn name(&self) -> &str;

    /// Column names in display order. The [`ALL_COLUMNS`] sentinel is not a
    /// real column and must not be included.
    fn columns(&self) -> Vec<String>;

    /// Resolves the value of `column` for `row`.
    ///
    /// Unknown column names yield [`ColumnValue::Missing`].
    fn column_value(&self, row: &Self::Row, column: &str) -> ColumnValue;

    /// Stable identity of `row` for the full-text cache.
    fn row_id(&self, row: &Self::Row) -> RowId;
}

/// The set of columns known to a tool, static and dynamically defined.
pub trait ColumnCatalog {
    /// Looks up the definition behind a column name.
    fn lookup(&self, name: &str) -> Option<ColumnDef>;

    /// Defines a dynamic column reconstructed from import metadata.
    ///
    /// Returns false if the catalog rejects the definition (the importing
    /// filter is then dropped).
    fn define(&mut self, name: &str, def: ColumnDef) -> bool;
}
