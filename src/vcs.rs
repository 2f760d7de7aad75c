//! Source-control lookups used to annotate generated files.

use std::path::Path;
use std::process::Command;

/// Resolves the latest commit that touched a path.
pub trait CommitLookup: Send + Sync {
    /// Hash of the last commit touching `path`, if any.
    fn latest(&self, path: &Path) -> Option<String>;
}

/// Asks `git log` in the current working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommitLookup;

impl CommitLookup for GitCommitLookup {
    fn latest(&self, path: &Path) -> Option<String> {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%H", "--"])
            .arg(path)
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                crate::debug_event!("vcs", "git unavailable", "{e}");
                return None;
            }
        };

        if !output.status.success() {
            crate::debug_event!(
                "vcs",
                "git log failed",
                "{}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!hash.is_empty()).then_some(hash)
    }
}
