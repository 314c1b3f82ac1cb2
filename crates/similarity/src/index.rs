//! Similarity index: the fitted model queried for neighbours.
//!
//! `SimilarityIndex` is the seam callers depend on; `DenseCosineIndex`
//! keeps the full N×N matrix in memory, which is what a few thousand
//! catalog items call for.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::matrix::SimilarityMatrix;
use crate::vectorizer::{CountVector, CountVectorizer, Vocabulary};
use pipeline::TagCorpus;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// One ranked neighbour of a query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub row: usize,
    pub score: f32,
}

/// A fitted model answering similarity queries by row
pub trait SimilarityIndex: Send + Sync {
    /// Fit the index on a tag corpus
    fn fit(corpus: &TagCorpus, config: &IndexConfig) -> Result<Self>
    where
        Self: Sized;

    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Similarity between rows `i` and `j`
    fn score(&self, i: usize, j: usize) -> Option<f32>;

    /// The `k` rows most similar to `row`, never including `row` itself
    fn neighbours(&self, row: usize, k: usize) -> Vec<Neighbour>;
}

/// Rank `scores` for the query at `row`: score descending, then row ascending
pub fn rank(scores: &[f32], row: usize, k: usize) -> Vec<Neighbour> {
    let mut ranked: Vec<Neighbour> = scores
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != row)
        .map(|(j, &score)| Neighbour { row: j, score })
        .collect();
    ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.row.cmp(&b.row),
        other => other,
    });
    ranked.truncate(k);
    ranked
}

/// Cosine similarity over bag-of-words counts, fully materialized
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCosineIndex {
    vocabulary: Vocabulary,
    matrix: SimilarityMatrix,
}

impl DenseCosineIndex {
    /// Reassemble an index from persisted parts
    pub fn from_parts(vocabulary: Vocabulary, matrix: SimilarityMatrix) -> Self {
        Self { vocabulary, matrix }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

impl SimilarityIndex for DenseCosineIndex {
    #[instrument(skip_all, fields(documents = corpus.len(), max_features = config.max_features))]
    fn fit(corpus: &TagCorpus, config: &IndexConfig) -> Result<Self> {
        if corpus.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let start = Instant::now();

        let documents = corpus.documents();
        let vocabulary = CountVectorizer::new()
            .with_max_features(config.max_features)
            .fit(&documents);

        let vectors: Vec<CountVector> = documents
            .par_iter()
            .map(|document| vocabulary.encode(document))
            .collect();
        let empty = vectors.iter().filter(|v| v.is_zero()).count();
        if empty > 0 {
            debug!("{} documents have no vocabulary terms", empty);
        }

        let matrix = SimilarityMatrix::from_vectors(&vectors);
        info!(
            "Fitted similarity index: {} items, {} terms in {:?}",
            matrix.len(),
            vocabulary.len(),
            start.elapsed()
        );

        Ok(Self { vocabulary, matrix })
    }

    fn len(&self) -> usize {
        self.matrix.len()
    }

    fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.matrix.get(i, j)
    }

    fn neighbours(&self, row: usize, k: usize) -> Vec<Neighbour> {
        match self.matrix.row(row) {
            Some(scores) => rank(scores, row, k),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(documents: &[&str]) -> TagCorpus {
        documents
            .iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect::<Vec<String>>())
            .collect()
    }

    #[test]
    fn test_rank_excludes_query_and_breaks_ties_by_row() {
        let ranked = rank(&[1.0, 0.3, 1.0, 0.3], 0, 5);
        let rows: Vec<usize> = ranked.iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![2, 1, 3]);
    }

    #[test]
    fn test_fit_empty_corpus() {
        let err = DenseCosineIndex::fit(&TagCorpus::default(), &IndexConfig::default()).unwrap_err();
        assert!(matches!(err, IndexError::EmptyCorpus));
    }

    #[test]
    fn test_neighbours() {
        let index = DenseCosineIndex::fit(
            &corpus(&["alien robot", "alien space", "robot"]),
            &IndexConfig::default(),
        )
        .unwrap();
        assert_eq!(index.len(), 3);

        let neighbours = index.neighbours(0, 5);
        assert_eq!(neighbours.len(), 2);
        // "robot" shares one of two terms with row 0 and has only one term itself
        assert_eq!(neighbours[0].row, 2);
        assert!((neighbours[0].score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(neighbours[1].row, 1);
        assert!((neighbours[1].score - 0.5).abs() < 1e-6);
        assert!(index.neighbours(9, 5).is_empty());
    }

    #[test]
    fn test_single_item_has_no_neighbours() {
        let index = DenseCosineIndex::fit(&corpus(&["alien"]), &IndexConfig::default()).unwrap();
        assert!(index.neighbours(0, 5).is_empty());
    }
}
