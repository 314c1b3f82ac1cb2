//! Core domain types for the TMDB catalog.
//!
//! Three layers of the same movie live here:
//! - `RawMovie` / `RawCredit`: one row of each input table, every column optional
//! - `MovieRecord`: a joined row with every essential field present
//! - `Item` / `ItemTable`: the reduced projection persisted next to the similarity matrix

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie, assigned by TMDB
pub type MovieId = u32;

// =============================================================================
// Raw Input Rows
// =============================================================================

/// One row of `tmdb_5000_movies.csv`.
///
/// Only the columns the feature builder reads are declared; serde skips the
/// rest. Empty cells deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    /// Serialized list of `{id, name}` objects
    pub genres: Option<String>,
    /// Serialized list of `{id, name}` objects
    pub keywords: Option<String>,
}

/// One row of `tmdb_5000_credits.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCredit {
    pub movie_id: Option<MovieId>,
    pub title: Option<String>,
    /// Serialized list of performer objects, in billing order
    pub cast: Option<String>,
    /// Serialized list of crew objects carrying a `job`
    pub crew: Option<String>,
}

// =============================================================================
// Joined Record
// =============================================================================

/// A catalog entry after the title join, with no missing essential field.
///
/// The structured fields are still in their serialized form here; the
/// pipeline crate owns turning them into tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub keywords: String,
    pub cast: String,
    pub crew: String,
}

impl MovieRecord {
    /// Project a joined movie/credit pair, dropping it if any field is missing.
    ///
    /// `movie_id` comes from the credits table, everything textual from
    /// whichever table owns the column.
    pub fn project(movie: &RawMovie, credit: &RawCredit) -> Option<Self> {
        Some(Self {
            movie_id: credit.movie_id?,
            title: movie.title.clone()?,
            overview: movie.overview.clone()?,
            genres: movie.genres.clone()?,
            keywords: movie.keywords.clone()?,
            cast: credit.cast.clone()?,
            crew: credit.crew.clone()?,
        })
    }
}

// =============================================================================
// Item Table
// =============================================================================

/// The persisted identity of one catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub movie_id: MovieId,
    pub title: String,
}

/// Ordered item table; row `i` lines up with row `i` of the similarity matrix.
///
/// Titles are not unique, so lookups by title always resolve to the first
/// row in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTable {
    items: Vec<Item>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the item stored at `row`
    pub fn get(&self, row: usize) -> Option<&Item> {
        self.items.get(row)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Row of the first item whose title equals `title` exactly (case-sensitive)
    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// within each group table order is kept.
    pub fn search(&self, fragment: &str) -> Vec<(usize, &Item)> {
        let needle = fragment.to_lowercase();
        let mut matches: Vec<(u8, usize, &Item)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(row, item)| {
                let title = item.title.to_lowercase();
                if title == needle {
                    Some((0, row, item))
                } else if title.contains(&needle) {
                    Some((1, row, item))
                } else {
                    None
                }
            })
            .collect();
        matches.sort_by_key(|&(relevance, row, _)| (relevance, row));
        matches
            .into_iter()
            .map(|(_, row, item)| (row, item))
            .collect()
    }
}

impl FromIterator<Item> for ItemTable {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
