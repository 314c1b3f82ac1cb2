//! The TagPipeline turns one joined record into its tag tokens.
//!
//! Overview tokens always come first; structured fields follow in the order
//! they were added to the pipeline. Each extracted name is collapsed into a
//! single token before it is appended.

use crate::extractors::{AllNamesExtractor, JobExtractor, TopBilledExtractor};
use crate::normalize::{collapse, overview_tokens};
use crate::structured::StructuredField;
use crate::traits::Extractor;
use data_loader::MovieRecord;
use std::fmt;

/// Structured columns of a `MovieRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Genres,
    Keywords,
    Cast,
    Crew,
}

impl Field {
    fn raw<'a>(&self, record: &'a MovieRecord) -> &'a str {
        match self {
            Field::Genres => &record.genres,
            Field::Keywords => &record.keywords,
            Field::Cast => &record.cast,
            Field::Crew => &record.crew,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Genres => "genres",
            Field::Keywords => "keywords",
            Field::Cast => "cast",
            Field::Crew => "crew",
        };
        f.write_str(name)
    }
}

/// Tags produced for one record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordTags {
    pub tokens: Vec<String>,
    /// Fields that failed to decode and contributed nothing
    pub malformed: Vec<Field>,
}

/// Ordered chain of field extractors.
///
/// ## Usage
/// ```ignore
/// let pipeline = TagPipeline::new()
///     .add_field(Field::Genres, AllNamesExtractor)
///     .add_field(Field::Cast, TopBilledExtractor::new(3));
///
/// let tags = pipeline.tags_for(&record);
/// ```
pub struct TagPipeline {
    fields: Vec<(Field, Box<dyn Extractor>)>,
}

impl TagPipeline {
    /// Create a pipeline that only emits overview tokens.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// genres, keywords, top 3 cast, directors
    pub fn standard() -> Self {
        Self::new()
            .add_field(Field::Genres, AllNamesExtractor)
            .add_field(Field::Keywords, AllNamesExtractor)
            .add_field(Field::Cast, TopBilledExtractor::new(3))
            .add_field(Field::Crew, JobExtractor::director())
    }

    /// Add a field to the pipeline (builder pattern).
    pub fn add_field(mut self, field: Field, extractor: impl Extractor + 'static) -> Self {
        self.fields.push((field, Box::new(extractor)));
        self
    }

    /// Names of the configured (field, extractor) pairs, in order
    pub fn describe(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(field, extractor)| format!("{}:{}", field, extractor.name()))
            .collect()
    }

    /// Assemble `overview ++ field_1 ++ ... ++ field_n` for one record.
    pub fn tags_for(&self, record: &MovieRecord) -> RecordTags {
        let mut tags = RecordTags {
            tokens: overview_tokens(&record.overview).collect(),
            malformed: Vec::new(),
        };

        for (field, extractor) in &self.fields {
            let parsed = StructuredField::parse(field.raw(record));
            if parsed.is_malformed() {
                tags.malformed.push(*field);
                continue;
            }
            tags.tokens.extend(
                extractor
                    .extract(parsed.entries())
                    .iter()
                    .map(|name| collapse(name)),
            );
        }

        tags
    }
}

impl Default for TagPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
