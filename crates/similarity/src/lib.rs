//! Content-based similarity index over a tag corpus.
//!
//! This crate provides:
//! - CountVectorizer and Vocabulary for bag-of-words encoding
//! - SimilarityMatrix holding pairwise cosine similarities
//! - SimilarityIndex trait with the dense cosine implementation
//! - recommend() for title-based queries
//! - ArtifactStore for persisting the item table and index together
//!
//! ## Example Usage
//! ```ignore
//! use similarity::{recommend, ArtifactStore, DenseCosineIndex, IndexConfig, SimilarityIndex};
//!
//! let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default())?;
//! ArtifactStore::new("artifacts").save(&items, &index)?;
//!
//! for rec in recommend("Gandhi", &items, &index, 5)? {
//!     println!("{} ({:.3})", rec.title, rec.score);
//! }
//! ```

pub mod config;
pub mod error;
pub mod stopwords;
pub mod vectorizer;
pub mod matrix;
pub mod index;
pub mod recommend;
pub mod store;

// Re-export main types
pub use config::{IndexConfig, DEFAULT_MAX_FEATURES, DEFAULT_TOP_K};
pub use error::{IndexError, Result};
pub use index::{DenseCosineIndex, Neighbour, SimilarityIndex};
pub use matrix::SimilarityMatrix;
pub use recommend::{recommend, Recommendation};
pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use store::{ArtifactStore, Manifest};
pub use vectorizer::{tokenize, CountVector, CountVectorizer, Vocabulary};
