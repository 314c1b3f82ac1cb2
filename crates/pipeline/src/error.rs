//! Error types for the feature builder.

use thiserror::Error;

/// Fatal feature-building failures.
///
/// Malformed structured fields are deliberately absent: they are recovered
/// in place (see `StructuredField::Malformed`) and never abort a build.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// The title join between movies and credits produced no rows
    #[error("No overlapping titles between {movies} movie rows and {credits} credit rows")]
    Join { movies: usize, credits: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FeatureError>;
