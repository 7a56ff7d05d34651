//! Management of named filter sets: rename, delete, load, merge, export and
//! import.
//!
//! The manager owns one tool's named sets plus its read-only default sets.
//! Every structural mutation runs under a named advisory lock and ends with a
//! save through the [`SettingsSaver`] seam; user interaction (overwrite
//! confirmation, name collisions on import, import retry) goes through the
//! [`FilterPrompt`] seam so the engine stays free of any UI toolkit.

use std::collections::BTreeMap;

use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::column::ColumnCatalog;
use crate::filter::{export_sets, parse_import, Filter};
use crate::lock::LockSet;
use crate::store::StoreError;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Formats the "not found" error message, optionally including a suggestion.
fn format_not_found_error(name: &str, suggestion: Option<&str>) -> String {
    let base = format!("filter set '{}' not found", name);
    match suggestion {
        Some(s) => format!("{}. Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein
/// distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// excluding exact matches.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    // Only suggest if the distance is within threshold and not an exact match
    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Persists the manager's filter sets; implemented by the settings store.
pub trait SettingsSaver {
    /// Saves one tool's named filter sets. `reason` names the triggering
    /// operation, e.g. `"Filter (Rename)"`.
    fn save_filters(
        &mut self,
        tool: &str,
        reason: &str,
        sets: &BTreeMap<String, Vec<Filter>>,
    ) -> std::result::Result<(), StoreError>;
}

/// User interaction needed by manager operations.
pub trait FilterPrompt {
    /// Asks whether an existing set may be overwritten.
    fn confirm_overwrite(&mut self, name: &str) -> bool;

    /// Asks for a replacement name when an imported set collides with an
    /// existing one. `None` skips the colliding set.
    fn request_name(&mut self, taken: &str) -> Option<String>;

    /// Reports that no filter set was recognized in the pasted text and
    /// offers another attempt. `None` cancels the import.
    fn retry_import(&mut self, text: &str) -> Option<String>;
}

/// Errors that can occur during filter set management.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A filter set name was empty.
    #[error("filter set name cannot be empty")]
    EmptyName,

    /// A default filter set cannot be replaced.
    #[error("default filter set '{0}' cannot be overwritten")]
    ProtectedName(String),

    /// The named filter set does not exist.
    #[error("{}", format_not_found_error(name, suggestion.as_deref()))]
    NotFound {
        /// The name that was searched for.
        name: String,
        /// Optional suggestion for a similar set name.
        suggestion: Option<String>,
    },

    /// The user declined an overwrite.
    #[error("cancelled by user")]
    Cancelled,

    /// Settings store error.
    #[error("settings error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for manager operations.
pub type Result<T> = std::result::Result<T, ManagerError>;

/// The outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// At least one set was saved, under these names.
    Saved(Vec<String>),
    /// Headers were recognized but every set was empty or skipped.
    Empty,
    /// The user cancelled after nothing was recognized.
    Cancelled,
}

/// Manages one tool's named filter sets.
pub struct FilterManager<S: SettingsSaver, P: FilterPrompt> {
    tool: String,
    filters: BTreeMap<String, Vec<Filter>>,
    defaults: BTreeMap<String, Vec<Filter>>,
    locks: LockSet,
    saver: S,
    prompt: P,
}

impl<S: SettingsSaver, P: FilterPrompt> FilterManager<S, P> {
    /// Creates a manager over a tool's saved and default filter sets.
    pub fn new(
        tool: impl Into<String>,
        filters: BTreeMap<String, Vec<Filter>>,
        defaults: BTreeMap<String, Vec<Filter>>,
        saver: S,
        prompt: P,
    ) -> Self {
        Self {
            tool: tool.into(),
            filters,
            defaults,
            locks: LockSet::new(),
            saver,
            prompt,
        }
    }

    /// The tool this manager belongs to.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The saved filter sets by name.
    pub fn sets(&self) -> &BTreeMap<String, Vec<Filter>> {
        &self.filters
    }

    /// The read-only default filter sets by name.
    pub fn defaults(&self) -> &BTreeMap<String, Vec<Filter>> {
        &self.defaults
    }

    /// Saves the given filters under `name`, prompting before overwriting an
    /// existing set.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if the name is blank.
    /// - `ProtectedName` if the name shadows a default set.
    /// - `Cancelled` if the user declines the overwrite.
    /// - `Store` if persisting fails.
    pub fn save_set(&mut self, name: &str, filters: Vec<Filter>) -> Result<()> {
        self.validate_name(name, "")?;
        {
            let _guard = self.locks.lock("Filter (Save)");
            self.filters.insert(name.to_string(), filters);
        }
        self.persist("Filter (Save)")
    }

    /// Renames a filter set, replacing any set already under the new name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `old_name` does not exist.
    /// - `EmptyName`, `ProtectedName`, `Cancelled` per name validation.
    /// - `Store` if persisting fails.
    pub fn rename(&mut self, name: &str, old_name: &str) -> Result<()> {
        let moved = self.get(old_name)?.to_vec();
        self.validate_name(name, old_name)?;
        {
            let _guard = self.locks.lock("Filter (Rename)");
            self.filters.remove(old_name);
            self.filters.remove(name);
            self.filters.insert(name.to_string(), moved);
        }
        self.persist("Filter (Rename)")
    }

    /// Deletes the named filter sets. Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Store` if persisting fails.
    pub fn delete(&mut self, names: &[String]) -> Result<()> {
        {
            let _guard = self.locks.lock("Filter (Delete)");
            for name in names {
                self.filters.remove(name);
            }
        }
        self.persist("Filter (Delete)")
    }

    /// Looks up a filter set for loading into the active filter row.
    ///
    /// Default sets take precedence over saved sets of the same name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, with a fuzzy-matched suggestion when a similarly
    /// named set exists.
    pub fn load(&self, name: &str) -> Result<&[Filter]> {
        if let Some(filters) = self.defaults.get(name) {
            return Ok(filters);
        }
        self.get(name)
    }

    /// Merges the source sets into a new set under `name`, keeping the first
    /// occurrence of each duplicate filter.
    ///
    /// # Errors
    ///
    /// - `NotFound` if a source set does not exist.
    /// - `EmptyName`, `ProtectedName`, `Cancelled` per name validation.
    /// - `Store` if persisting fails.
    pub fn merge(&mut self, name: &str, sources: &[String]) -> Result<()> {
        self.validate_name(name, "")?;
        let mut merged: Vec<Filter> = Vec::new();
        for source in sources {
            for filter in self.get(source)? {
                if !merged.contains(filter) {
                    merged.push(filter.clone());
                }
            }
        }
        {
            let _guard = self.locks.lock("Filter (Merge)");
            self.filters.insert(name.to_string(), merged);
        }
        self.persist("Filter (Merge)")
    }

    /// Renders the named sets as import/export text.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if a name does not exist.
    pub fn export(&self, names: &[String], catalog: &dyn ColumnCatalog) -> Result<String> {
        let mut sets: Vec<(&str, &[Filter])> = Vec::with_capacity(names.len());
        for name in names {
            sets.push((name.as_str(), self.get(name)?));
        }
        Ok(export_sets(&self.tool, &sets, catalog))
    }

    /// Imports filter sets from pasted text.
    ///
    /// If nothing in the text is recognized the prompt may supply corrected
    /// text for another attempt. Sets whose names collide with existing sets
    /// are saved under a replacement name from the prompt, or skipped.
    ///
    /// # Errors
    ///
    /// Returns `Store` if persisting fails.
    pub fn import(
        &mut self,
        text: impl Into<String>,
        catalog: &mut dyn ColumnCatalog,
    ) -> Result<ImportOutcome> {
        let mut text = text.into();
        loop {
            let parse = parse_import(&text, catalog);
            if !parse.header_seen {
                match self.prompt.retry_import(&text) {
                    Some(next) => {
                        text = next;
                        continue;
                    }
                    None => return Ok(ImportOutcome::Cancelled),
                }
            }

            let mut saved = Vec::new();
            for set in parse.sets {
                if set.name.is_empty() || set.filters.is_empty() {
                    continue;
                }
                let name = if self.filters.contains_key(&set.name) {
                    match self.prompt.request_name(&set.name) {
                        Some(name) if !name.is_empty() && !self.is_protected(&name) => name,
                        _ => {
                            debug!(name = %set.name, "skipped colliding import set");
                            continue;
                        }
                    }
                } else {
                    set.name
                };
                {
                    let _guard = self.locks.lock("Filter (Import)");
                    self.filters.insert(name.clone(), set.filters);
                }
                saved.push(name);
            }
            if saved.is_empty() {
                return Ok(ImportOutcome::Empty);
            }
            self.persist("Filter (Import)")?;
            return Ok(ImportOutcome::Saved(saved));
        }
    }

    fn get(&self, name: &str) -> Result<&[Filter]> {
        match self.filters.get(name) {
            Some(filters) => Ok(filters),
            None => Err(ManagerError::NotFound {
                name: name.to_string(),
                suggestion: find_similar_name(
                    name,
                    self.filters.keys().chain(self.defaults.keys()).map(String::as_str),
                ),
            }),
        }
    }

    fn is_protected(&self, name: &str) -> bool {
        self.defaults
            .keys()
            .any(|default| default.eq_ignore_ascii_case(name))
    }

    /// Name validation shared by save, rename and merge: defaults are never
    /// replaced, and replacing another saved set needs confirmation.
    fn validate_name(&mut self, name: &str, old_name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ManagerError::EmptyName);
        }
        if self.is_protected(name) {
            return Err(ManagerError::ProtectedName(name.to_string()));
        }
        if self.filters.contains_key(name) && name != old_name && !self.prompt.confirm_overwrite(name)
        {
            return Err(ManagerError::Cancelled);
        }
        Ok(())
    }

    fn persist(&mut self, reason: &str) -> Result<()> {
        self.saver.save_filters(&self.tool, reason, &self.filters)?;
        Ok(())
    }
}
