//! Parser for the TMDB 5000 CSV tables.
//!
//! - tmdb_5000_movies.csv: budget,genres,homepage,id,keywords,...,overview,...,title,...
//! - tmdb_5000_credits.csv: movie_id,title,cast,crew
//!
//! Structured columns (genres, keywords, cast, crew) are quoted JSON arrays
//! inside a CSV cell. They are kept as raw strings here and decoded later by
//! the feature builder, where a malformed value degrades instead of failing.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// File name of the movies table inside a data directory
pub const MOVIES_FILE: &str = "tmdb_5000_movies.csv";

/// File name of the credits table inside a data directory
pub const CREDITS_FILE: &str = "tmdb_5000_credits.csv";

const MOVIE_COLUMNS: &[&str] = &["id", "title", "overview", "genres", "keywords"];
const CREDIT_COLUMNS: &[&str] = &["movie_id", "title", "cast", "crew"];

/// Open a file, mapping a missing path onto `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Deserialize every row of a headed CSV table.
///
/// `columns` are checked against the header up front so that a renamed
/// column is reported once instead of surfacing as a per-row decode error.
fn read_table<T, R>(reader: R, file: &str, columns: &[&str]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: 1,
            reason: format!("Failed to read header: {}", e),
        })?
        .clone();

    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<T>() {
        let row = record.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse the movies table from any reader
pub fn parse_movies_from<R: Read>(reader: R) -> Result<Vec<RawMovie>> {
    read_table(reader, MOVIES_FILE, MOVIE_COLUMNS)
}

/// Parse the credits table from any reader
pub fn parse_credits_from<R: Read>(reader: R) -> Result<Vec<RawCredit>> {
    read_table(reader, CREDITS_FILE, CREDIT_COLUMNS)
}

/// Parse the tmdb_5000_movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<RawMovie>> {
    parse_movies_from(open(path)?)
}

/// Parse the tmdb_5000_credits.csv file
pub fn parse_credits(path: &Path) -> Result<Vec<RawCredit>> {
    parse_credits_from(open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "\
budget,genres,id,keywords,overview,title,vote_average
237000000,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",19995,\"[{\"\"id\"\": 1463, \"\"name\"\": \"\"culture clash\"\"}]\",In the 22nd century a paraplegic Marine is dispatched.,Avatar,7.2
0,[],459488,[],,Untitled,0
";

    const CREDITS: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}]\",\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"James Cameron\"\"}]\"
";

    #[test]
    fn test_parse_movies() {
        let movies = parse_movies_from(MOVIES.as_bytes()).unwrap();
        assert_eq!(movies.len(), 2);

        let avatar = &movies[0];
        assert_eq!(avatar.id, Some(19995));
        assert_eq!(avatar.title.as_deref(), Some("Avatar"));
        assert_eq!(
            avatar.genres.as_deref(),
            Some("[{\"id\": 28, \"name\": \"Action\"}]")
        );
    }

    #[test]
    fn test_empty_cell_is_missing() {
        let movies = parse_movies_from(MOVIES.as_bytes()).unwrap();
        assert_eq!(movies[1].overview, None);
        assert_eq!(movies[1].genres.as_deref(), Some("[]"));
    }

    #[test]
    fn test_parse_credits() {
        let credits = parse_credits_from(CREDITS.as_bytes()).unwrap();
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].movie_id, Some(19995));
        assert!(credits[0].crew.as_deref().unwrap().contains("James Cameron"));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_credits_from("movie_id,title,cast\n1,A,[]\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "crew"));
    }

    #[test]
    fn test_invalid_id_reports_line() {
        let err = parse_credits_from("movie_id,title,cast,crew\nabc,A,[],[]\n".as_bytes())
            .unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, CREDITS_FILE);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
