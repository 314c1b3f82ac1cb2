//! # Recommendation Service
//!
//! Query side of the recommender:
//! 1. Load the item table and similarity index once at startup
//! 2. Resolve a title to its row
//! 3. Rank its neighbours
//! 4. Attach a poster URL to each result
//!
//! The loaded artifacts are immutable, so clones of the service share them
//! through `Arc` and answer queries concurrently without locking.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use data_loader::{Item, ItemTable, MovieId};
use similarity::{recommend, ArtifactStore, DenseCosineIndex};

use crate::posters::{PlaceholderPosters, PosterLookup, PLACEHOLDER_POSTER};

/// One ranked recommendation, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

/// Answers title queries against loaded artifacts
#[derive(Clone)]
pub struct RecommendationService {
    items: Arc<ItemTable>,
    index: Arc<DenseCosineIndex>,
    posters: Arc<dyn PosterLookup>,
}

impl fmt::Debug for RecommendationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendationService")
            .field("items", &self.items.len())
            .field("terms", &self.index.vocabulary().len())
            .finish_non_exhaustive()
    }
}

impl RecommendationService {
    /// Load artifacts from `artifact_dir`
    pub fn load(artifact_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = artifact_dir.as_ref();
        let start = Instant::now();
        let (items, index) = ArtifactStore::new(dir)
            .load()
            .with_context(|| format!("Failed to load artifacts from {}", dir.display()))?;
        info!("Loaded {} items in {:?}", items.len(), start.elapsed());
        Ok(Self::new(items, index))
    }

    /// Wrap an already fitted index
    pub fn new(items: ItemTable, index: DenseCosineIndex) -> Self {
        Self {
            items: Arc::new(items),
            index: Arc::new(index),
            posters: Arc::new(PlaceholderPosters),
        }
    }

    /// Configure the poster source (default: placeholder only)
    pub fn with_posters(mut self, posters: impl PosterLookup + 'static) -> Self {
        self.posters = Arc::new(posters);
        self
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `k` movies most similar to `title`.
    ///
    /// Fails if the title is not in the catalog.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<MovieRecommendation>> {
        let start = Instant::now();
        let recommendations = recommend(title, &self.items, self.index.as_ref(), k)
            .with_context(|| format!("No recommendations for '{}'", title))?;

        let results: Vec<MovieRecommendation> = recommendations
            .into_iter()
            .enumerate()
            .map(|(i, rec)| MovieRecommendation {
                rank: i + 1,
                poster_url: self.poster_for(rec.movie_id),
                movie_id: rec.movie_id,
                title: rec.title,
                score: rec.score,
            })
            .collect();

        debug!(
            "Recommended {} movies for '{}' in {:?}",
            results.len(),
            title,
            start.elapsed()
        );
        Ok(results)
    }

    /// Titles matching `fragment`, exact matches first
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<Item> {
        self.items
            .search(fragment)
            .into_iter()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect()
    }

    fn poster_for(&self, movie_id: MovieId) -> String {
        match self.posters.poster_url(movie_id) {
            Ok(Some(url)) => url,
            Ok(None) => PLACEHOLDER_POSTER.to_string(),
            Err(e) => {
                warn!("Poster lookup failed for movie {}: {:#}", movie_id, e);
                PLACEHOLDER_POSTER.to_string()
            }
        }
    }
}
