//! Extractor that keeps every name of a field.
//!
//! Used for genres and keywords, which have no ordering or role semantics.

use crate::structured::FieldEntry;
use crate::traits::Extractor;

/// Keeps the `name` of every entry, unbounded.
pub struct AllNamesExtractor;

impl Extractor for AllNamesExtractor {
    fn name(&self) -> &str {
        "AllNamesExtractor"
    }

    fn extract(&self, entries: &[FieldEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_extractor() {
        let entries = vec![
            FieldEntry::named("Action"),
            FieldEntry::named("Science Fiction"),
            FieldEntry::named("Thriller"),
        ];

        let names = AllNamesExtractor.extract(&entries);

        assert_eq!(names, vec!["Action", "Science Fiction", "Thriller"]);
    }
}
