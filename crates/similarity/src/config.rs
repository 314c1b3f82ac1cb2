//! Index configuration.

/// Default vocabulary size
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Default number of recommendations per query
pub const DEFAULT_TOP_K: usize = 5;

/// Settings for fitting and querying a similarity index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Upper bound on vocabulary size
    pub max_features: usize,
    /// Neighbours returned when a caller does not ask for a count
    pub top_k: usize,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Configure vocabulary size (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure default neighbour count (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
