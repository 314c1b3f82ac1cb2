//! Server crate for the Cinematch recommender.
//!
//! This crate contains the query-side service that the shell talks to:
//! it loads the persisted artifacts once and answers title queries.

pub mod posters;
pub mod service;

pub use posters::{PlaceholderPosters, PosterLookup, StaticPosters, PLACEHOLDER_POSTER};
pub use service::{MovieRecommendation, RecommendationService};
