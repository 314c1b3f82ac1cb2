//! Core traits for the tag pipeline.
//!
//! This module defines the Extractor trait that turns the entries of one
//! structured field into the names that become tags.

use crate::structured::FieldEntry;

/// Selects names from the decoded entries of a structured field.
///
/// ## Design Note
/// - `Send + Sync` lets one pipeline be shared across the rayon workers
/// - Extractors return raw names; whitespace collapsing happens in the pipeline
pub trait Extractor: Send + Sync {
    /// Returns the name of this extractor (for logging/debugging)
    fn name(&self) -> &str;

    /// Pick names from `entries`, preserving their list order
    fn extract(&self, entries: &[FieldEntry]) -> Vec<String>;
}
