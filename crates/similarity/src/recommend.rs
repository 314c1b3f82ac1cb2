//! Title-based recommendation over a fitted index.

use crate::error::{IndexError, Result};
use crate::index::SimilarityIndex;
use data_loader::{ItemTable, MovieId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recommended catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// Recommend the `k` items most similar to `title`.
///
/// The first row whose title matches exactly is the query; it never
/// appears in its own results.
pub fn recommend<I>(
    title: &str,
    items: &ItemTable,
    index: &I,
    k: usize,
) -> Result<Vec<Recommendation>>
where
    I: SimilarityIndex + ?Sized,
{
    if items.len() != index.len() {
        return Err(IndexError::Misaligned {
            items: items.len(),
            rows: index.len(),
        });
    }

    let row = items.position(title).ok_or_else(|| IndexError::NotFound {
        title: title.to_string(),
    })?;
    debug!("Query '{}' resolved to row {}", title, row);

    Ok(index
        .neighbours(row, k)
        .into_iter()
        .filter_map(|neighbour| {
            items.get(neighbour.row).map(|item| Recommendation {
                movie_id: item.movie_id,
                title: item.title.clone(),
                score: neighbour.score,
            })
        })
        .collect())
}
