//! Feature builder: turns raw catalog tables into a tag corpus.
//!
//! This crate provides:
//! - StructuredField for decoding the serialized object lists
//! - Extractor trait and implementations for picking names from a field
//! - TagPipeline for composing extractors
//! - FeatureBuilder for the join / projection / tagging pass
//!
//! ## Architecture
//! Records flow through the builder in stages:
//! 1. Movies and credits are joined on title
//! 2. Rows with missing essential values are dropped
//! 3. Each record's overview and structured fields become one token list
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureBuilder, TagPipeline};
//!
//! let builder = FeatureBuilder::new().with_pipeline(TagPipeline::standard());
//! let (items, corpus) = builder.build(&catalog.movies, &catalog.credits)?;
//! ```

pub mod error;
pub mod structured;
pub mod normalize;
pub mod traits;
pub mod extractors;
pub mod tag_pipeline;
pub mod corpus;
pub mod builder;

// Re-export main types
pub use builder::FeatureBuilder;
pub use corpus::TagCorpus;
pub use error::{FeatureError, Result};
pub use structured::{FieldEntry, StructuredField};
pub use tag_pipeline::{Field, RecordTags, TagPipeline};
pub use traits::Extractor;
