//! The tag corpus: one token bag per surviving catalog item.

/// Tag lists, index-aligned with the item table built alongside them.
///
/// Computed once per build and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCorpus {
    tags: Vec<Vec<String>>,
}

impl TagCorpus {
    pub fn new(tags: Vec<Vec<String>>) -> Self {
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags of the item at `row`
    pub fn get(&self, row: usize) -> Option<&[String]> {
        self.tags.get(row).map(|t| t.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.tags.iter().map(|t| t.as_slice())
    }

    /// Each item's tags joined with single spaces, ready for vectorizing
    pub fn documents(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.join(" ")).collect()
    }
}

impl FromIterator<Vec<String>> for TagCorpus {
    fn from_iter<I: IntoIterator<Item = Vec<String>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
