//! Extractor that keeps crew members holding one job.

use crate::structured::FieldEntry;
use crate::traits::Extractor;

/// Keeps the names of entries whose `job` equals the configured job exactly.
///
/// A film may have zero, one, or several directors; all are kept in order.
pub struct JobExtractor {
    job: String,
}

impl JobExtractor {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }

    /// The standard crew extractor
    pub fn director() -> Self {
        Self::new("Director")
    }
}

impl Extractor for JobExtractor {
    fn name(&self) -> &str {
        "JobExtractor"
    }

    fn extract(&self, entries: &[FieldEntry]) -> Vec<String> {
        entries
            .iter()
            .filter(|entry| entry.job.as_deref() == Some(self.job.as_str()))
            .map(|entry| entry.name.clone())
            .collect()
    }
}
