//! Error types for the data-loader crate.
//!
//! Every variant here is fatal for a build: a catalog that cannot be read
//! or decoded aborts the whole pipeline before any artifact is written.

use thiserror::Error;

/// Errors that can occur while loading the TMDB tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Row in a data file couldn't be decoded
    ///
    /// `line` is the 1-based line reported by the CSV reader
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// The header row lacks a column the loader depends on
    #[error("Missing column {column} in {file}")]
    MissingColumn { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
