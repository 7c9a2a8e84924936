//! fuzzylookup - tiered fuzzy lookup over code/description tables
//!
//! Rows of a reference table (work-item codes with free-text descriptions,
//! often Vietnamese) are indexed once and searched with noisy queries:
//! missing diacritics, typos, partial words, `?`/`*` wildcards.
//!
//! # Features
//! - Accent-stripping, case-folding normalization
//! - Structural tier (exact, word, prefix, contains, wildcard pattern)
//! - Fuzzy tier (Levenshtein, Jaro-Winkler) over n-gram filtered candidates
//! - Per-engine result cache and autocomplete suggestions
//!
//! # Example
//!
//! ```rust
//! use fuzzylookup::{FieldScope, LookupEngine, MatchType, Record};
//!
//! let engine = LookupEngine::new(vec![
//!     Record::new("M10A", "Đào đất"),
//!     Record::new("M20", "Đắp cát"),
//! ]);
//!
//! let results = engine.search("M1OA", FieldScope::Both);
//! assert_eq!(results[0].record.code(), "M10A");
//! assert_eq!(results[0].match_type, MatchType::Fuzzy);
//! ```

pub mod algorithms;
pub mod config;
pub mod dedup;
pub mod error;
pub mod indexing;
pub mod search;

pub use algorithms::normalize::normalize;
pub use algorithms::Similarity;
pub use config::{EngineConfig, SearchMode};
pub use error::{EngineError, Result};
pub use indexing::record::{FieldAliases, RawRow, Record};
pub use search::types::{Algorithm, EngineStats, FieldScope, MatchType, SearchResult};
pub use search::LookupEngine;
