//! Command-line entry point: argument parsing and dispatch.

pub mod args;
pub mod commands;

pub use args::{Cli, Mode};

use anyhow::Context;

use crate::config::Settings;
use crate::notebook::Extractor;
use crate::store::PathStore;

/// Load settings for this invocation, falling back to defaults on error.
pub fn load_settings(cli: &Cli) -> Settings {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    })
}

/// Apply `--target`, then run exactly one of folder scan, watcher, or default scan.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli);
    crate::logging::init_with_config(&settings.logging);

    let mut store = PathStore::load(&settings.state_file).context("loading default path")?;

    if let Some(target) = &cli.target {
        commands::target::run(&mut store, target).context("saving default path")?;
    }

    let extractor = Extractor::from_settings(&settings);

    match cli.mode() {
        Mode::Folder(folder) => {
            commands::scan::run(&extractor, &mut store, Some(folder.as_path()))
                .with_context(|| format!("scanning {}", folder.display()))?;
        }
        Mode::Daemon => {
            commands::daemon::run(&settings, &store, extractor)
                .await
                .context("watching notebooks")?;
        }
        Mode::Default => {
            commands::scan::run(&extractor, &mut store, None).context("scanning default folder")?;
        }
    }

    Ok(())
}
