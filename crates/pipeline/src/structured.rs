//! Decoding of the serialized object lists stored in the catalog.
//!
//! Genres, keywords, cast and crew arrive as JSON arrays of objects, e.g.
//! `[{"id": 28, "name": "Action"}]`. Parsing never fails: a value that is
//! not a list of named objects becomes `StructuredField::Malformed` and
//! contributes no entries.

use serde::Deserialize;

/// One object of a structured list. Keys other than `name` and `job` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

impl FieldEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: None,
        }
    }

    pub fn with_job(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: Some(job.into()),
        }
    }
}

/// Result of decoding one structured cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredField {
    /// A well-formed list, entries in their original order
    Valid(Vec<FieldEntry>),
    /// Anything else; `reason` is the decoder's message
    Malformed { reason: String },
}

impl StructuredField {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Vec<FieldEntry>>(raw) {
            Ok(entries) => StructuredField::Valid(entries),
            Err(e) => StructuredField::Malformed {
                reason: e.to_string(),
            },
        }
    }

    /// Entries of a valid list; empty for a malformed one
    pub fn entries(&self) -> &[FieldEntry] {
        match self {
            StructuredField::Valid(entries) => entries,
            StructuredField::Malformed { .. } => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StructuredField::Malformed { .. })
    }
}
