//! Loading both TMDB tables from a data directory.

use crate::error::Result;
use crate::parser::{self, CREDITS_FILE, MOVIES_FILE};
use crate::types::{RawCredit, RawMovie};
use std::path::Path;
use tracing::info;

/// The two raw input tables, in file order
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    pub movies: Vec<RawMovie>,
    pub credits: Vec<RawCredit>,
}

impl RawCatalog {
    /// Load the movies and credits tables from `data_dir`.
    ///
    /// Both files are parsed in parallel; either failing aborts the load.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading TMDB catalog from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let credits_path = data_dir.join(CREDITS_FILE);

        let (movies, credits) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_credits(&credits_path),
        );
        let movies = movies?;
        let credits = credits?;

        info!(
            "Loaded {} movie rows and {} credit rows",
            movies.len(),
            credits.len()
        );

        Ok(Self { movies, credits })
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.credits.len())
    }
}
