//! Extractor implementations for the tag pipeline.
//!
//! This module contains the concrete extractors that can be composed
//! into a TagPipeline.

pub mod all_names;
pub mod by_job;
pub mod top_billed;

// Re-export for convenience
pub use all_names::AllNamesExtractor;
pub use by_job::JobExtractor;
pub use top_billed::TopBilledExtractor;
