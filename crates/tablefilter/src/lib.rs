//! Typed row filtering for table views.
//!
//! This crate provides the filter subsystem of a table-centric application:
//! a [`Filter`](filter::Filter) value object, a matcher that evaluates filter
//! lists against typed rows, a per-row full-text cache for the "match any
//! column" mode, a plain-text import/export format for sharing named filter
//! sets, and a manager that keeps those sets in the settings store.
//!
//! The consuming view supplies two seams: a [`TableSource`](column::TableSource)
//! resolving column names to typed [`ColumnValue`](value::ColumnValue)s, and a
//! [`ColumnCatalog`](column::ColumnCatalog) describing which columns exist,
//! including user-defined formula and jump columns.

pub mod column;
pub mod filter;
pub mod lock;
pub mod manager;
pub mod store;
pub mod value;

pub use column::{ColumnCatalog, ColumnDef, RowId, TableSource, ALL_COLUMNS};
pub use filter::{
    export_sets, matches_row, parse_import, CompareType, Filter, FilterMatcher, ImportParse,
    LogicType, ParsedSet, TextCache,
};
pub use manager::{FilterManager, FilterPrompt, ImportOutcome, ManagerError, SettingsSaver};
pub use store::{FilterSettings, FilterStore, StoreError};
pub use value::ColumnValue;
