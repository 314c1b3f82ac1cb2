//! Poster artwork lookup.
//!
//! The service only needs a URL per movie; where it comes from is up to the
//! caller. A lookup that fails or has nothing resolves to the placeholder.

use std::collections::HashMap;

use anyhow::Result;
use data_loader::MovieId;

/// Shown when no poster is available
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// Prefix for TMDB poster paths
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500/";

/// Resolves a movie to its poster URL
pub trait PosterLookup: Send + Sync {
    fn poster_url(&self, movie_id: MovieId) -> Result<Option<String>>;
}

/// Never has a poster; every recommendation gets the placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderPosters;

impl PosterLookup for PlaceholderPosters {
    fn poster_url(&self, _movie_id: MovieId) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Fixed map of TMDB poster paths (e.g. `/abc.jpg`)
#[derive(Debug, Clone, Default)]
pub struct StaticPosters {
    paths: HashMap<MovieId, String>,
}

impl StaticPosters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poster(mut self, movie_id: MovieId, poster_path: impl Into<String>) -> Self {
        self.paths.insert(movie_id, poster_path.into());
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<(MovieId, String)> for StaticPosters {
    fn from_iter<I: IntoIterator<Item = (MovieId, String)>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl PosterLookup for StaticPosters {
    fn poster_url(&self, movie_id: MovieId) -> Result<Option<String>> {
        Ok(self.paths.get(&movie_id).map(|path| {
            format!("{}{}", TMDB_IMAGE_BASE, path.trim_start_matches('/'))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_posters_build_tmdb_urls() {
        let posters = StaticPosters::new().with_poster(19995, "/kmcqlZGaSh20zpTbuoF0Cdn07dT.jpg");
        assert_eq!(
            posters.poster_url(19995).unwrap().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/kmcqlZGaSh20zpTbuoF0Cdn07dT.jpg")
        );
        assert_eq!(posters.poster_url(1).unwrap(), None);
    }

    #[test]
    fn test_placeholder_posters() {
        assert_eq!(PlaceholderPosters.poster_url(19995).unwrap(), None);
    }
}
