//! Persistence of the default notebook folder.
//!
//! The folder is kept as plain text in a single state file. An explicit
//! folder given on the command line replaces it, so later runs without
//! arguments pick the same folder again.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Stored default folder with an in-memory copy.
#[derive(Debug, Clone)]
pub struct PathStore {
    file: PathBuf,
    cached: Option<PathBuf>,
}

impl PathStore {
    /// Load the stored path from `file`.
    ///
    /// A missing or empty file means no default is configured.
    pub fn load(file: impl Into<PathBuf>) -> StoreResult<Self> {
        let file = file.into();
        let cached = if file.exists() {
            let content = std::fs::read_to_string(&file).map_err(|source| StoreError::Read {
                path: file.clone(),
                source,
            })?;
            let trimmed = content.trim();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        } else {
            None
        };

        if let Some(path) = &cached {
            crate::debug_event!("store", "loaded", "{}", path.display());
        }

        Ok(Self { file, cached })
    }

    /// Overwrite the stored path.
    pub fn save(&mut self, path: &Path) -> StoreResult<()> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.file.clone(),
            source,
        };

        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.file, path.to_string_lossy().as_bytes()).map_err(write_err)?;

        crate::debug_event!("store", "saved", "{}", path.display());
        self.cached = Some(path.to_path_buf());
        Ok(())
    }

    /// The currently configured default folder.
    pub fn get(&self) -> Option<&Path> {
        self.cached.as_deref()
    }

    /// Location of the state file.
    pub fn file(&self) -> &Path {
        &self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = PathStore::load(temp_dir.path().join("none.txt")).unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_save_creates_parents_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(".config").join("default_notebook_path.txt");

        let mut store = PathStore::load(&file).unwrap();
        store.save(Path::new("/data/notebooks")).unwrap();
        assert_eq!(store.get(), Some(Path::new("/data/notebooks")));

        let reloaded = PathStore::load(&file).unwrap();
        assert_eq!(reloaded.get(), Some(Path::new("/data/notebooks")));
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("state.txt");

        let mut store = PathStore::load(&file).unwrap();
        store.save(Path::new("first")).unwrap();
        store.save(Path::new("second")).unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn test_load_trims_whitespace_and_ignores_empty() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("state.txt");

        std::fs::write(&file, "  notebooks/lab \n").unwrap();
        let store = PathStore::load(&file).unwrap();
        assert_eq!(store.get(), Some(Path::new("notebooks/lab")));

        std::fs::write(&file, "\n").unwrap();
        let store = PathStore::load(&file).unwrap();
        assert!(store.get().is_none());
    }
}
