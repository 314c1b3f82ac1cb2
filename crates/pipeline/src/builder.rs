//! Feature builder: raw tables in, item table and tag corpus out.
//!
//! ## Steps
//! 1. Inner-join movies and credits on `title`
//! 2. Project the essential columns and drop rows with a missing value
//! 3. Run the tag pipeline over every surviving record
//!
//! Pure transformation: nothing is read from or written to disk here.

use crate::corpus::TagCorpus;
use crate::error::{FeatureError, Result};
use crate::tag_pipeline::TagPipeline;
use data_loader::{Item, ItemTable, MovieRecord, RawCredit, RawMovie};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Builds the tag corpus for a catalog.
pub struct FeatureBuilder {
    pipeline: TagPipeline,
}

impl FeatureBuilder {
    /// Create a builder around the standard tag pipeline
    pub fn new() -> Self {
        Self {
            pipeline: TagPipeline::standard(),
        }
    }

    /// Use a custom tag pipeline
    pub fn with_pipeline(mut self, pipeline: TagPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Join, project and tag the catalog.
    ///
    /// # Returns
    /// * `Ok((ItemTable, TagCorpus))` - index-aligned, in join order
    /// * `Err(FeatureError::Join)` - if no title appears in both tables
    #[instrument(skip_all, fields(movies = movies.len(), credits = credits.len()))]
    pub fn build(
        &self,
        movies: &[RawMovie],
        credits: &[RawCredit],
    ) -> Result<(ItemTable, TagCorpus)> {
        let joined = join_on_title(movies, credits);
        if joined.is_empty() {
            return Err(FeatureError::Join {
                movies: movies.len(),
                credits: credits.len(),
            });
        }
        debug!("Title join produced {} rows", joined.len());

        let records: Vec<MovieRecord> = joined
            .iter()
            .filter_map(|(movie, credit)| MovieRecord::project(movie, credit))
            .collect();
        debug!(
            "Dropped {} rows with missing values",
            joined.len() - records.len()
        );

        let tagged: Vec<_> = records
            .par_iter()
            .map(|record| self.pipeline.tags_for(record))
            .collect();

        let malformed: usize = tagged.iter().map(|t| t.malformed.len()).sum();
        if malformed > 0 {
            warn!(
                "{} structured fields could not be decoded and were treated as empty",
                malformed
            );
        }

        let items: ItemTable = records
            .iter()
            .map(|record| Item {
                movie_id: record.movie_id,
                title: record.title.clone(),
            })
            .collect();
        let corpus: TagCorpus = tagged.into_iter().map(|t| t.tokens).collect();

        info!("Built tag corpus for {} items", corpus.len());
        Ok((items, corpus))
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Inner join on title.
///
/// Left (movies) order is preserved; a title present several times on the
/// right yields one row per match, in right order. Rows without a title
/// never join.
fn join_on_title<'a>(
    movies: &'a [RawMovie],
    credits: &'a [RawCredit],
) -> Vec<(&'a RawMovie, &'a RawCredit)> {
    let mut by_title: HashMap<&str, Vec<&RawCredit>> = HashMap::new();
    for credit in credits {
        if let Some(title) = credit.title.as_deref() {
            by_title.entry(title).or_default().push(credit);
        }
    }

    movies
        .iter()
        .filter_map(|movie| {
            let title = movie.title.as_deref()?;
            by_title.get(title).map(|matches| (movie, matches))
        })
        .flat_map(|(movie, matches)| matches.iter().map(move |credit| (movie, *credit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str) -> RawMovie {
        RawMovie {
            id: Some(id),
            title: Some(title.to_string()),
            overview: Some(format!("{} overview", title)),
            genres: Some(r#"[{"id": 1, "name": "Drama"}]"#.to_string()),
            keywords: Some("[]".to_string()),
        }
    }

    fn credit(id: u32, title: &str) -> RawCredit {
        RawCredit {
            movie_id: Some(id),
            title: Some(title.to_string()),
            cast: Some(r#"[{"name": "Lead Actor"}]"#.to_string()),
            crew: Some(r#"[{"job": "Director", "name": "Some Director"}]"#.to_string()),
        }
    }

    #[test]
    fn test_join_keeps_left_order() {
        let movies = vec![movie(1, "B"), movie(2, "A"), movie(3, "C")];
        let credits = vec![credit(2, "A"), credit(1, "B")];

        let joined = join_on_title(&movies, &credits);
        let ids: Vec<_> = joined.iter().map(|(_, c)| c.movie_id).collect();

        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_join_duplicate_titles() {
        let movies = vec![movie(1, "Twin"), movie(2, "Twin")];
        let credits = vec![credit(10, "Twin"), credit(20, "Twin")];

        let joined = join_on_title(&movies, &credits);

        assert_eq!(joined.len(), 4);
        assert_eq!(joined[1].0.id, Some(1));
        assert_eq!(joined[1].1.movie_id, Some(20));
    }

    #[test]
    fn test_join_error_on_disjoint_titles() {
        let movies = vec![movie(1, "A")];
        let credits = vec![credit(2, "B")];

        let result = FeatureBuilder::new().build(&movies, &credits);

        assert!(matches!(
            result,
            Err(FeatureError::Join { movies: 1, credits: 1 })
        ));
    }

    #[test]
    fn test_build_drops_rows_with_missing_values() {
        let mut incomplete = movie(2, "B");
        incomplete.keywords = None;
        let movies = vec![movie(1, "A"), incomplete, movie(3, "C")];
        let credits = vec![credit(1, "A"), credit(2, "B"), credit(3, "C")];

        let (items, corpus) = FeatureBuilder::new().build(&movies, &credits).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(corpus.len(), 2);
        assert_eq!(items.get(1).map(|i| i.title.as_str()), Some("C"));
    }

    #[test]
    fn test_build_uses_credit_movie_id() {
        let movies = vec![movie(999, "A")];
        let credits = vec![credit(1, "A")];

        let (items, _) = FeatureBuilder::new().build(&movies, &credits).unwrap();

        assert_eq!(items.get(0).map(|i| i.movie_id), Some(1));
    }

    #[test]
    fn test_build_tags() {
        let (_, corpus) = FeatureBuilder::new()
            .build(&[movie(1, "A")], &[credit(1, "A")])
            .unwrap();

        assert_eq!(
            corpus.get(0).unwrap(),
            &["A", "overview", "Drama", "LeadActor", "SomeDirector"]
        );
    }

    #[test]
    fn test_malformed_field_keeps_row() {
        let mut broken = movie(1, "A");
        broken.genres = Some("[{\"id\": 1, \"name\": ".to_string());

        let (items, corpus) = FeatureBuilder::new()
            .build(&[broken], &[credit(1, "A")])
            .unwrap();

        assert_eq!(items.len(), 1);
        assert!(!corpus.get(0).unwrap().contains(&"Drama".to_string()));
    }
}
