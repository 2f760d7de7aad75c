//! Notebook parsing and proto cell extraction.

mod extract;
mod types;

pub use extract::{ExtractError, ExtractResult, Extractor, ProtoBundle, render};
pub use types::{Cell, CellSource, Notebook};
