//! Token normalization.

/// Remove every whitespace character so a multi-word name becomes one token.
///
/// "Sam Worthington" -> "SamWorthington"
pub fn collapse(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Overview text is split on whitespace only: no stripping, no stemming.
pub fn overview_tokens(overview: &str) -> impl Iterator<Item = String> + '_ {
    overview.split_whitespace().map(str::to_string)
}
