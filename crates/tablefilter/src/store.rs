//! Filter settings storage with XDG path support.
//!
//! Named filter sets are part of the application settings and persist as JSON
//! at an XDG-compliant path, `~/.config/tablefilter/filters.json` on Unix.
//! The on-disk shape is a map of tool name to its named filter sets; every
//! mutation through [`FilterManager`](crate::manager::FilterManager) rewrites
//! the owning tool's entry and saves the whole document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::filter::Filter;
use crate::manager::SettingsSaver;

/// Default settings filename.
const SETTINGS_FILENAME: &str = "filters.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "tablefilter";

/// Errors that can occur during settings storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine XDG config directory.
    #[error("failed to determine config directory: no valid home directory found")]
    NoConfigDir,

    /// I/O error during file read.
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write settings file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create config directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file delete.
    #[error("failed to delete settings file '{path}': {source}")]
    DeleteError {
        /// The path that failed to delete.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for settings store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The persisted settings document: tool name to its named filter sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub tools: BTreeMap<String, BTreeMap<String, Vec<Filter>>>,
}

impl FilterSettings {
    /// The named filter sets of one tool, empty if the tool has none yet.
    pub fn tool(&self, tool: &str) -> BTreeMap<String, Vec<Filter>> {
        self.tools.get(tool).cloned().unwrap_or_default()
    }
}

/// Persistent storage for filter settings.
///
/// File operations are not atomic across processes; in typical usage the
/// store is owned by a single settings dialog and needs no external
/// synchronization.
///
/// # Example
///
/// ```no_run
/// use tablefilter_rs::store::FilterStore;
///
/// let store = FilterStore::new()?;
/// let settings = store.load_or_default()?;
/// store.save(&settings)?;
/// # Ok::<(), tablefilter_rs::store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilterStore {
    /// Path to the settings file.
    path: PathBuf,
}

impl FilterStore {
    /// Creates a new `FilterStore` at the default XDG config path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoConfigDir` if the home directory cannot be
    /// determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `FilterStore` with a custom path.
    ///
    /// This is primarily useful for testing.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG config path for the settings file.
    ///
    /// On Unix: `~/.config/tablefilter/filters.json`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoConfigDir` if the home directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(StoreError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join(SETTINGS_FILENAME))
    }

    /// Returns the path to the settings file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the settings from disk.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file cannot be read,
    ///   including `ErrorKind::NotFound` when it does not exist; use
    ///   [`load_or_default()`](Self::load_or_default) for a default document.
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<FilterSettings> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the settings, returning an empty document if the file is missing.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` for I/O errors other than "file not
    ///   found".
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<FilterSettings> {
        match self.load() {
            Ok(settings) => Ok(settings),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(FilterSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the settings to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist. The document is
    /// written as pretty-printed JSON, through a temp file and rename so a
    /// crash mid-write cannot corrupt the previous file.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StoreError::WriteError` if the file cannot be written.
    /// - Returns `StoreError::Json` if serialization fails.
    pub fn save(&self, settings: &FilterSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Returns true if the settings file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deletes the settings file from disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DeleteError` if the file cannot be deleted.
    /// Does not return an error if the file doesn't exist.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl SettingsSaver for FilterStore {
    fn save_filters(
        &mut self,
        tool: &str,
        reason: &str,
        sets: &BTreeMap<String, Vec<Filter>>,
    ) -> Result<()> {
        let mut settings = self.load_or_default()?;
        settings.tools.insert(tool.to_string(), sets.clone());
        self.save(&settings)?;
        debug!(tool, reason, sets = sets.len(), "saved filter settings");
        Ok(())
    }
}
