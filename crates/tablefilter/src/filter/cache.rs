//! Per-row full-text cache backing the "match any column" mode.
//!
//! Each row maps to one precomputed blob: every non-missing column value in
//! canonical form, framed as `\n<value>\r`, concatenated and lowercased. The
//! framing lets EQUALS match an exact field (`contains("\n<text>\r")`) while
//! CONTAINS stays a plain substring test.
//!
//! The cache is an explicitly owned resource of one filter control; it is
//! never shared through a process-wide registry. The owning collection must
//! call the insert/update/delete hooks at its mutation points, or rebuild
//! wholesale, before any all-columns filter is evaluated.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::column::{RowId, TableSource};
use crate::value::canonical;

/// Full-text cache for one filterable collection.
#[derive(Debug, Default)]
pub struct TextCache {
    entries: HashMap<RowId, String>,
}

impl TextCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached blob for a row, if present.
    pub fn get(&self, id: RowId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Number of cached rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the whole cache from the backing collection.
    ///
    /// The read guard is held only while snapshotting the rows and is
    /// released on every exit path.
    pub fn rebuild<S: TableSource>(&mut self, source: &S, rows: &RwLock<Vec<S::Row>>) {
        self.entries.clear();
        let rows = match rows.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for row in rows.iter() {
            self.entries.insert(source.row_id(row), build_row_text(source, row));
        }
        debug!(tool = source.name(), rows = self.entries.len(), "rebuilt full-text cache");
    }

    /// Adds entries for newly inserted rows.
    pub fn insert<S: TableSource>(&mut self, source: &S, rows: &[S::Row]) {
        if rows.is_empty() {
            return;
        }
        for row in rows {
            self.entries.insert(source.row_id(row), build_row_text(source, row));
        }
    }

    /// Recomputes entries for rows whose column values changed.
    pub fn update<S: TableSource>(&mut self, source: &S, rows: &[S::Row]) {
        if rows.is_empty() {
            return;
        }
        debug!(tool = source.name(), rows = rows.len(), "updated full-text cache entries");
        self.insert(source, rows);
    }

    /// Drops entries for removed rows.
    pub fn delete<S: TableSource>(&mut self, source: &S, rows: &[S::Row]) {
        if rows.is_empty() {
            return;
        }
        for row in rows {
            self.entries.remove(&source.row_id(row));
        }
    }
}

/// Builds the canonical lowercase blob for one row.
fn build_row_text<S: TableSource>(source: &S, row: &S::Row) -> String {
    let mut text = String::new();
    for column in source.columns() {
        if let Some(value) = canonical(&source.column_value(row, &column)) {
            text.push('\n');
            text.push_str(&value);
            text.push('\r');
        }
    }
    text.to_lowercase()
}
