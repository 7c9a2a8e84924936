//! Engine configuration with sensible defaults.
//!
//! [`EngineConfig`] controls the search mode, fuzzy threshold, result cap,
//! cache bound and header aliases. It is serde-(de)serializable so
//! applications can keep it next to their own settings.

use serde::{Deserialize, Serialize};

use crate::algorithms::jaro::DEFAULT_PREFIX_WEIGHT;
use crate::algorithms::levenshtein::LONG_STRING_LIMIT;
use crate::error::EngineError;
use crate::indexing::record::FieldAliases;

/// Which tiers a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Structural matching only (exact, word, prefix, contains, pattern)
    Simple,
    /// Structural matching, then n-gram filtered fuzzy scoring when the
    /// structural tier comes up short
    #[default]
    Tiered,
}

/// Configuration for a lookup engine.
///
/// Use [`Default::default()`] and override fields as needed, then pass to
/// [`LookupEngine::with_config`](crate::LookupEngine::with_config), which
/// validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: SearchMode,
    /// Minimum fuzzy score (0..=100) for a tier-2 candidate to be kept.
    pub fuzzy_threshold: u8,
    /// Maximum number of results returned by a search.
    pub max_results: usize,
    /// Structural result count at which the fuzzy tier is skipped.
    pub tier1_short_circuit: usize,
    /// Winkler prefix weight, in [0.0, 0.25].
    pub prefix_weight: f64,
    /// Strings longer than this many chars get the Levenshtein length estimate.
    pub exact_distance_limit: usize,
    /// Maximum cached queries. `None` is unbounded, `Some(0)` disables caching.
    pub cache_capacity: Option<usize>,
    /// Shortest normalized prefix that produces suggestions.
    pub min_suggestion_len: usize,
    /// Header aliases used by [`LookupEngine::from_rows`](crate::LookupEngine::from_rows).
    pub aliases: FieldAliases,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Tiered,
            fuzzy_threshold: 75,
            max_results: 1000,
            tier1_short_circuit: 10,
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            exact_distance_limit: LONG_STRING_LIMIT,
            cache_capacity: Some(4096),
            min_suggestion_len: 2,
            aliases: FieldAliases::default(),
        }
    }
}

impl EngineConfig {
    /// Structural-only configuration
    pub fn simple() -> Self {
        Self {
            mode: SearchMode::Simple,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_aliases(mut self, aliases: FieldAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `fuzzy_threshold` must be at most 100
    /// - `max_results` must be greater than 0
    /// - `prefix_weight` must be finite and within [0.0, 0.25]
    /// - `min_suggestion_len` must be greater than 0
    /// - both alias lists must be non-empty
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fuzzy_threshold > 100 {
            return Err(EngineError::Config(format!(
                "fuzzy_threshold must be <= 100, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.max_results == 0 {
            return Err(EngineError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if !self.prefix_weight.is_finite() || !(0.0..=0.25).contains(&self.prefix_weight) {
            return Err(EngineError::Config(format!(
                "prefix_weight must be in range [0.0, 0.25], got {}",
                self.prefix_weight
            )));
        }
        if self.min_suggestion_len == 0 {
            return Err(EngineError::Config(
                "min_suggestion_len must be greater than 0".into(),
            ));
        }
        if self.aliases.code.is_empty() {
            return Err(EngineError::Config(
                "at least one code alias is required".into(),
            ));
        }
        if self.aliases.description.is_empty() {
            return Err(EngineError::Config(
                "at least one description alias is required".into(),
            ));
        }
        Ok(())
    }
}
