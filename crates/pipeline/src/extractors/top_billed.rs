//! Extractor that keeps the top-billed performers.
//!
//! Cast lists arrive in billing order; only the head of the list is kept
//! and the order is never changed.

use crate::structured::FieldEntry;
use crate::traits::Extractor;

/// Keeps the names of the first `limit` entries.
pub struct TopBilledExtractor {
    limit: usize,
}

impl TopBilledExtractor {
    /// Create a new TopBilledExtractor
    ///
    /// # Arguments
    /// * `limit` - How many leading entries to keep (3 for the standard pipeline)
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for TopBilledExtractor {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Extractor for TopBilledExtractor {
    fn name(&self) -> &str {
        "TopBilledExtractor"
    }

    fn extract(&self, entries: &[FieldEntry]) -> Vec<String> {
        entries
            .iter()
            .take(self.limit)
            .map(|entry| entry.name.clone())
            .collect()
    }
}
