//! Error types surfaced while parsing and rendering feature documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering a document tree as Markdown.
///
/// Rendering either produces the complete Markdown text or fails with one of
/// these variants; partial output is never returned.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RenderError {
    /// Raised when a table row has more or fewer cells than the first row.
    #[error("table row {row_number} has {actual} cells but expected {expected}")]
    MalformedTable {
        /// 1-based index of the offending row, counting the header.
        row_number: usize,
        /// Number of cells in the first row.
        expected: usize,
        /// Number of cells present in the offending row.
        actual: usize,
    },
    /// Raised when a table contains no rows at all.
    #[error("table has no rows")]
    EmptyTable,
}

/// Errors raised while loading a `.feature` file into a [`Document`].
///
/// [`Document`]: crate::model::Document
#[derive(Debug, Error)]
pub enum ParseError {
    /// The feature file could not be read.
    #[error("failed to read feature file {}: {source}", path.display())]
    Read {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The feature text is not valid Gherkin.
    #[error("failed to parse feature file: {0}")]
    Parse(#[from] gherkin::ParseError),
}
