//! # Data Loader Crate
//!
//! This crate reads the TMDB 5000 catalog (movies and credits tables) and
//! defines the domain types shared by the rest of the workspace.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawMovie, RawCredit, MovieRecord, ItemTable)
//! - **parser**: Parse the CSV tables into Rust structs
//! - **catalog**: Load both tables from a data directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RawCatalog;
//! use std::path::Path;
//!
//! let catalog = RawCatalog::load_from_files(Path::new("data"))?;
//! let (movies, credits) = catalog.counts();
//! println!("{} movies, {} credit rows", movies, credits);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;

// Re-export commonly used types for convenience
pub use catalog::RawCatalog;
pub use error::{DataLoadError, Result};
pub use types::{Item, ItemTable, MovieId, MovieRecord, RawCredit, RawMovie};
