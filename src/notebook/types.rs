//! Notebook document model.
//!
//! Only the parts of the notebook format that extraction needs are modeled:
//! the ordered cell list, each cell's type, and its source. Everything else
//! in the document is ignored during deserialization.

use serde::Deserialize;
use serde::de::Error as _;

/// A parsed notebook document.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

/// A single notebook cell.
#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    /// Only code cells are required to carry a source.
    #[serde(default)]
    pub source: Option<CellSource>,
}

/// Cell source, stored either as one string or as line fragments.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Notebook {
    /// Parse a notebook from its JSON text.
    ///
    /// Fails if any code cell has no source.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let notebook: Self = serde_json::from_str(text)?;
        if let Some(index) = notebook
            .cells
            .iter()
            .position(|cell| cell.is_code() && cell.source.is_none())
        {
            return Err(serde_json::Error::custom(format!("code cell {index} has no source")));
        }
        Ok(notebook)
    }

    /// Code cells tagged with `marker`, in document order.
    pub fn proto_cells<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells.iter().filter(move |cell| cell.is_proto(marker))
    }
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }

    /// A proto cell is a code cell whose source carries the marker.
    pub fn is_proto(&self, marker: &str) -> bool {
        self.is_code()
            && self
                .source
                .as_ref()
                .is_some_and(|source| source.contains_marker(marker))
    }

    /// Trimmed source code; empty when the cell has no source.
    pub fn code(&self) -> String {
        self.source.as_ref().map(CellSource::code).unwrap_or_default()
    }
}

impl CellSource {
    /// Marker lookup.
    ///
    /// Line fragments must match the marker exactly; a single string only
    /// needs to contain it.
    pub fn contains_marker(&self, marker: &str) -> bool {
        match self {
            CellSource::Text(text) => text.contains(marker),
            CellSource::Lines(lines) => lines.iter().any(|line| line == marker),
        }
    }

    /// Source as a single string; fragments are joined without separators.
    pub fn joined(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }

    /// Joined source with surrounding whitespace removed.
    pub fn code(&self) -> String {
        self.joined().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "#proto\n";

    #[test]
    fn test_parse_both_source_shapes() {
        let nb = Notebook::from_json(
            r##"{
                "cells": [
                    {"cell_type": "code", "source": "#proto\nx = 1", "outputs": []},
                    {"cell_type": "code", "source": ["#proto\n", "y = 2\n"]}
                ],
                "metadata": {},
                "nbformat": 4
            }"##,
        )
        .unwrap();

        assert_eq!(nb.cells.len(), 2);
        assert_eq!(
            nb.cells[0].source,
            Some(CellSource::Text("#proto\nx = 1".to_string()))
        );
        assert_eq!(
            nb.cells[1].source,
            Some(CellSource::Lines(vec![
                "#proto\n".to_string(),
                "y = 2\n".to_string()
            ]))
        );
    }

    #[test]
    fn test_missing_cells_is_an_error() {
        assert!(Notebook::from_json(r#"{"metadata": {}}"#).is_err());
        assert!(Notebook::from_json("not json").is_err());
    }

    #[test]
    fn test_code_cell_without_source_is_an_error() {
        let err = Notebook::from_json(
            r#"{"cells": [{"cell_type": "markdown"}, {"cell_type": "code"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("code cell 1 has no source"));
    }

    #[test]
    fn test_other_cells_may_omit_source() {
        let nb = Notebook::from_json(
            r##"{
                "cells": [
                    {"cell_type": "markdown"},
                    {"cell_type": "raw"},
                    {"cell_type": "code", "source": "#proto\nx = 1"}
                ]
            }"##,
        )
        .unwrap();

        assert!(nb.cells[0].source.is_none());
        assert_eq!(nb.cells[0].code(), "");
        let protos: Vec<_> = nb.proto_cells(MARKER).collect();
        assert_eq!(protos.len(), 1);
        assert_eq!(protos[0].code(), "#proto\nx = 1");
    }

    #[test]
    fn test_proto_predicate() {
        let code = |source: CellSource| Cell {
            cell_type: "code".to_string(),
            source: Some(source),
        };

        assert!(code(CellSource::Text("#proto\nprint(1)".into())).is_proto(MARKER));
        assert!(code(CellSource::Text("a = 1\n#proto\nb".into())).is_proto(MARKER));
        // Marker at end of a string without newline does not count
        assert!(!code(CellSource::Text("print(1)\n#proto".into())).is_proto(MARKER));

        assert!(code(CellSource::Lines(vec!["#proto\n".into(), "x".into()])).is_proto(MARKER));
        // Fragments must match exactly
        assert!(!code(CellSource::Lines(vec!["#proto x\n".into()])).is_proto(MARKER));
        assert!(!code(CellSource::Lines(vec!["#proto".into()])).is_proto(MARKER));

        let markdown = Cell {
            cell_type: "markdown".to_string(),
            source: Some(CellSource::Text("#proto\ntext".into())),
        };
        assert!(!markdown.is_proto(MARKER));

        let empty = Cell {
            cell_type: "code".to_string(),
            source: None,
        };
        assert!(!empty.is_proto(MARKER));
    }

    #[test]
    fn test_code_normalization() {
        let lines = CellSource::Lines(vec![
            "#proto\n".into(),
            "def f():\n".into(),
            "    return 1\n".into(),
            "\n".into(),
        ]);
        assert_eq!(lines.code(), "#proto\ndef f():\n    return 1");

        let text = CellSource::Text("\n  #proto\nx = 1  \n".into());
        assert_eq!(text.code(), "#proto\nx = 1");
    }
}
