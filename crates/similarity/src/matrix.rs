//! Pairwise cosine similarity matrix.

use crate::vectorizer::CountVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Square, row-major matrix of cosine similarities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities of `vectors`.
    ///
    /// Dot products are accumulated as integers through an inverted index,
    /// so `get(i, j) == get(j, i)` exactly. An entry involving a zero
    /// vector is `0.0`.
    pub fn from_vectors(vectors: &[CountVector]) -> Self {
        let n = vectors.len();
        let dimensions = vectors
            .iter()
            .flat_map(|v| v.entries().iter().map(|&(d, _)| d as usize + 1))
            .max()
            .unwrap_or(0);

        // postings[d] lists (row, count) for every row with a non-zero count in d
        let mut postings: Vec<Vec<(usize, u32)>> = vec![Vec::new(); dimensions];
        for (row, vector) in vectors.iter().enumerate() {
            for &(dimension, count) in vector.entries() {
                postings[dimension as usize].push((row, count));
            }
        }

        let norms: Vec<f64> = vectors.iter().map(CountVector::norm).collect();

        let rows: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut dots = vec![0u64; n];
                for &(dimension, count) in vectors[i].entries() {
                    for &(j, other) in &postings[dimension as usize] {
                        dots[j] += count as u64 * other as u64;
                    }
                }

                dots.iter()
                    .enumerate()
                    .map(|(j, &dot)| {
                        if norms[i] == 0.0 || norms[j] == 0.0 {
                            0.0
                        } else if i == j {
                            1.0
                        } else {
                            (dot as f64 / (norms[i] * norms[j])).clamp(0.0, 1.0) as f32
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            n,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between rows `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// Every similarity of row `i`
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    /// Storage length matches the declared dimension
    pub fn is_well_formed(&self) -> bool {
        self.n.checked_mul(self.n) == Some(self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::Vocabulary;

    fn vectors(documents: &[&str]) -> Vec<CountVector> {
        let vocabulary = Vocabulary::from(vec![
            "alien".to_string(),
            "robot".to_string(),
            "space".to_string(),
        ]);
        documents.iter().map(|d| vocabulary.encode(d)).collect()
    }

    #[test]
    fn test_known_cosines() {
        let matrix = SimilarityMatrix::from_vectors(&vectors(&["alien robot", "alien space", "robot"]));
        assert_eq!(matrix.len(), 3);
        assert!((matrix.get(0, 1).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(matrix.get(1, 2), Some(0.0));
        assert_eq!(matrix.get(0, 0), Some(1.0));
        assert!(matrix.get(3, 0).is_none());
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let matrix = SimilarityMatrix::from_vectors(&vectors(&[
            "alien alien robot",
            "space robot robot",
            "alien space space space",
            "robot",
        ]));
        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                let value = matrix.get(i, j).unwrap();
                assert_eq!(value, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&value));
            }
            assert_eq!(matrix.get(i, i), Some(1.0));
        }
    }

    #[test]
    fn test_zero_vector_row_is_zero() {
        let matrix = SimilarityMatrix::from_vectors(&vectors(&["alien", "ghost"]));
        assert_eq!(matrix.row(1), Some(&[0.0, 0.0][..]));
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert!(matrix.row(0).unwrap().iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_empty() {
        let matrix = SimilarityMatrix::from_vectors(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.is_well_formed());
    }
}
