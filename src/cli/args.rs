//! CLI argument parsing using clap.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Extract #proto code cells from notebooks
#[derive(Parser, Debug)]
#[command(
    name = "notebook-watcher",
    version = env!("CARGO_PKG_VERSION"),
    about = "Watch notebooks and extract #proto code cells",
    long_about = "Extract code cells tagged with #proto from notebooks into dated source files.\n\
                  Without arguments, the stored default folder is scanned once.",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Folder to scan once; also stored as the new default
    #[arg(long, value_name = "PATH")]
    pub folder: Option<PathBuf>,

    /// Store PATH as the default notebook folder
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Watch the default folder until interrupted
    #[arg(long)]
    pub daemon: bool,

    /// Path to custom settings.toml file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// The single action an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Scan an explicit folder once.
    Folder(PathBuf),
    /// Run the watcher.
    Daemon,
    /// Scan the stored default folder once.
    Default,
}

impl Cli {
    /// `--folder` wins over `--daemon`; neither means a default scan.
    pub fn mode(&self) -> Mode {
        match (&self.folder, self.daemon) {
            (Some(folder), _) => Mode::Folder(folder.clone()),
            (None, true) => Mode::Daemon,
            (None, false) => Mode::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_selection() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("notebook-watcher").chain(args.iter().copied()))
                .unwrap()
        };

        assert_eq!(parse(&[]).mode(), Mode::Default);
        assert_eq!(parse(&["--daemon"]).mode(), Mode::Daemon);
        assert_eq!(
            parse(&["--folder", "nbs"]).mode(),
            Mode::Folder(PathBuf::from("nbs"))
        );
        assert_eq!(
            parse(&["--folder", "nbs", "--daemon"]).mode(),
            Mode::Folder(PathBuf::from("nbs"))
        );

        let cli = parse(&["--target", "lab"]);
        assert_eq!(cli.target, Some(PathBuf::from("lab")));
        assert_eq!(cli.mode(), Mode::Default);
    }
}
