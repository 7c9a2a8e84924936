//! Result, scope and diagnostics types returned by the lookup engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::indexing::record::Record;

/// Which logical field(s) a query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldScope {
    /// Code and description; the better of the two wins
    #[default]
    Both,
    CodeOnly,
    DescriptionOnly,
}

impl FieldScope {
    #[inline]
    pub fn includes_code(self) -> bool {
        matches!(self, Self::Both | Self::CodeOnly)
    }

    #[inline]
    pub fn includes_description(self) -> bool {
        matches!(self, Self::Both | Self::DescriptionOnly)
    }
}

/// How a result matched the query.
///
/// Structural kinds are listed from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Word,
    Prefix,
    Contains,
    Pattern,
    Fuzzy,
    /// Empty query: every record is returned unscored
    All,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Word => "word",
            Self::Prefix => "prefix",
            Self::Contains => "contains",
            Self::Pattern => "pattern",
            Self::Fuzzy => "fuzzy",
            Self::All => "all",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Algorithm that produced a result's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Structural comparison on normalized text
    Exact,
    Levenshtein,
    JaroWinkler,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro_winkler",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Position of the record in the corpus the engine was built from
    pub index: usize,
    /// The matched record, shared with the engine
    pub record: Arc<Record>,
    /// Relevance in 0..=100, higher is better
    pub score: u8,
    pub match_type: MatchType,
    pub algorithm: Algorithm,
}

/// Engine introspection for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_rows: usize,
    pub cache_size: usize,
    pub fuzzy_threshold: u8,
    pub trigram_entries: usize,
    pub bigram_entries: usize,
    pub exact_entries: usize,
    pub word_entries: usize,
}

/// Order by score descending, then corpus position ascending.
pub(crate) fn rank(results: &mut [SearchResult]) {
    results.sort_unstable_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
}
