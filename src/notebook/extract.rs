//! Extraction of proto cells into generated source files.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::{ExtractConfig, Settings};
use crate::vcs::{CommitLookup, GitCommitLookup};

use super::types::{Cell, Notebook};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read notebook {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed notebook {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Proto cells of one notebook, ready to be written out.
#[derive(Debug)]
pub struct ProtoBundle<'a> {
    /// File name of the source notebook, e.g. `demo.ipynb`.
    pub notebook_name: String,
    pub cells: Vec<&'a Cell>,
    /// Last commit touching the notebook, when annotation is enabled.
    pub commit: Option<String>,
}

/// Turns notebooks into generated proto files.
pub struct Extractor {
    config: ExtractConfig,
    commits: Option<Box<dyn CommitLookup>>,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            commits: None,
        }
    }

    /// Build from settings, wiring git annotation if enabled.
    pub fn from_settings(settings: &Settings) -> Self {
        let extractor = Self::new(settings.extract.clone());
        if settings.extract.annotate_commit {
            extractor.with_commit_lookup(GitCommitLookup)
        } else {
            extractor
        }
    }

    /// Annotate generated headers with the notebook's last commit.
    pub fn with_commit_lookup(mut self, lookup: impl CommitLookup + 'static) -> Self {
        self.commits = Some(Box::new(lookup));
        self
    }

    /// Whether `path` names a notebook by extension.
    pub fn is_notebook(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.config.notebook_extension)
    }

    /// Extract proto cells from a notebook using the current local time.
    ///
    /// Returns the generated file, or `None` when the notebook has no proto cells.
    pub fn extract_code_blocks(&self, notebook_path: &Path) -> ExtractResult<Option<PathBuf>> {
        self.extract_code_blocks_at(notebook_path, Local::now())
    }

    /// Extract proto cells as if run at `now`.
    pub fn extract_code_blocks_at(
        &self,
        notebook_path: &Path,
        now: DateTime<Local>,
    ) -> ExtractResult<Option<PathBuf>> {
        crate::log_event!("extract", "parsing", "{}", notebook_path.display());

        let text = std::fs::read_to_string(notebook_path).map_err(|source| ExtractError::Read {
            path: notebook_path.to_path_buf(),
            source,
        })?;
        let notebook = Notebook::from_json(&text).map_err(|source| ExtractError::Parse {
            path: notebook_path.to_path_buf(),
            source,
        })?;

        let cells: Vec<&Cell> = notebook.proto_cells(&self.config.marker).collect();
        crate::debug_event!("extract", "proto cells", "{}", cells.len());

        if cells.is_empty() {
            return Ok(None);
        }

        let bundle = ProtoBundle {
            notebook_name: notebook_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            cells,
            commit: self
                .commits
                .as_ref()
                .and_then(|lookup| lookup.latest(notebook_path)),
        };

        self.generate_output_file(&bundle, now).map(Some)
    }

    /// Write `bundle` to its dated output file, replacing any previous content.
    pub fn generate_output_file(
        &self,
        bundle: &ProtoBundle<'_>,
        now: DateTime<Local>,
    ) -> ExtractResult<PathBuf> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| ExtractError::Write {
            path: output_dir.clone(),
            source,
        })?;

        let output_path = self.output_path(&bundle.notebook_name, now);
        crate::log_event!("extract", "generating", "{}", output_path.display());

        std::fs::write(&output_path, render(bundle, now)).map_err(|source| {
            ExtractError::Write {
                path: output_path.clone(),
                source,
            }
        })?;

        Ok(output_path)
    }

    /// `{output_dir}/{base}_{YYYYMMDD}_proto.{ext}` for a notebook file name.
    pub fn output_path(&self, notebook_name: &str, now: DateTime<Local>) -> PathBuf {
        let suffix = format!(".{}", self.config.notebook_extension);
        let base = notebook_name.strip_suffix(&suffix).unwrap_or(notebook_name);
        self.config.output_dir.join(format!(
            "{base}_{}_proto.{}",
            now.format("%Y%m%d"),
            self.config.output_extension
        ))
    }
}

/// Render the generated file contents.
pub fn render(bundle: &ProtoBundle<'_>, now: DateTime<Local>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "# Generated from {}", bundle.notebook_name);
    let _ = writeln!(out, "# Timestamp: {}", now.format("%Y-%m-%d %H:%M:%S%.6f"));
    if let Some(commit) = &bundle.commit {
        let _ = writeln!(out, "# Commit: {commit}");
    }
    out.push('\n');

    for (i, cell) in bundle.cells.iter().enumerate() {
        let _ = writeln!(out, "# Block {}", i + 1);
        out.push_str(&cell.code());
        out.push_str("\n\n");
    }
    out
}
