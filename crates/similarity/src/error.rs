//! Error types for the similarity index.

use thiserror::Error;

/// Errors raised while fitting, querying or persisting an index
#[derive(Error, Debug)]
pub enum IndexError {
    /// No usable items survived feature building
    #[error("Cannot fit a similarity index on an empty corpus")]
    EmptyCorpus,

    /// Query title is not in the item table
    #[error("Movie not found: {title}")]
    NotFound { title: String },

    /// Item table and matrix rows do not line up
    #[error("Item table has {items} rows but the similarity matrix has {rows}")]
    Misaligned { items: usize, rows: usize },

    /// A persisted artifact is absent
    #[error("Missing artifact: {path}")]
    MissingArtifact { path: String },

    /// A persisted artifact could not be encoded or decoded
    #[error("Failed to (de)serialize {file}: {reason}")]
    Serialization { file: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, IndexError>;
