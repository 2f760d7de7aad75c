//! Command implementations for the CLI.

pub mod daemon;
pub mod scan;
pub mod target;
