//! Bag-of-words vectorizer.
//!
//! ## Algorithm
//! 1. Lowercase each document and split it into runs of word characters
//! 2. Keep runs of two or more characters that are not stop words
//! 3. Count corpus-wide term frequency and keep the `max_features` most frequent
//! 4. Assign dimensions to the kept terms in ascending term order
//!
//! Ties at the cutoff are broken by term, so the vocabulary depends only on
//! the corpus contents.

use crate::config::DEFAULT_MAX_FEATURES;
use crate::stopwords::StopWords;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Split a document into lowercase tokens of two or more word characters
pub fn tokenize(document: &str) -> Vec<String> {
    document
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|run| run.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Learns a fixed vocabulary from a document collection
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    stop_words: StopWords,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            stop_words: StopWords::english(),
        }
    }

    /// Configure vocabulary size (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure the stop-word set (default: English)
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Tokens of `document` that survive stop-word removal
    pub fn analyze(&self, document: &str) -> Vec<String> {
        tokenize(document)
            .into_iter()
            .filter(|token| !self.stop_words.is_stop_word(token))
            .collect()
    }

    /// Build the vocabulary for `documents`
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Vocabulary {
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for document in documents {
            for token in self.analyze(document.as_ref()) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        let distinct = frequencies.len();
        let mut ranked: Vec<(String, u64)> = frequencies.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        debug!(
            "Vocabulary keeps {} of {} distinct terms",
            terms.len(),
            distinct
        );
        Vocabulary::from(terms)
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen term-to-dimension mapping.
///
/// Persisted as the sorted term list; the lookup map is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    dimensions: HashMap<String, u32>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in dimension order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn dimension(&self, term: &str) -> Option<u32> {
        self.dimensions.get(term).copied()
    }

    /// Count occurrences of each vocabulary term in `document`.
    ///
    /// Tokens outside the vocabulary (stop words included) are ignored.
    pub fn encode(&self, document: &str) -> CountVector {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokenize(document) {
            if let Some(dimension) = self.dimension(&token) {
                *counts.entry(dimension).or_insert(0) += 1;
            }
        }
        let mut entries: Vec<(u32, u32)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(dimension, _)| dimension);
        CountVector {
            dimensions: self.terms.len(),
            entries,
        }
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        let dimensions = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i as u32))
            .collect();
        Self { terms, dimensions }
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

/// Sparse term counts of one document, sorted by dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountVector {
    dimensions: usize,
    entries: Vec<(u32, u32)>,
}

impl CountVector {
    /// Non-zero `(dimension, count)` pairs
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn squared_norm(&self) -> u64 {
        self.entries
            .iter()
            .map(|&(_, count)| count as u64 * count as u64)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        (self.squared_norm() as f64).sqrt()
    }

    /// Exact integer dot product
    pub fn dot(&self, other: &CountVector) -> u64 {
        let (mut a, mut b) = (self.entries.iter().peekable(), other.entries.iter().peekable());
        let mut total = 0u64;
        while let (Some(&&(da, ca)), Some(&&(db, cb))) = (a.peek(), b.peek()) {
            if da == db {
                total += ca as u64 * cb as u64;
                a.next();
                b.next();
            } else if da < db {
                a.next();
            } else {
                b.next();
            }
        }
        total
    }

    /// Full-length integer vector over the vocabulary
    pub fn to_dense(&self) -> Vec<u32> {
        let mut dense = vec![0; self.dimensions];
        for &(dimension, count) in &self.entries {
            dense[dimension as usize] = count;
        }
        dense
    }
}
