//! Tiered lookup engine.
//!
//! # Pipeline
//!
//! 1. Normalize the query; an empty query lists the corpus unscored
//! 2. Return memoized results for (query, scope) if present
//! 3. Tier 1: structural rules over every record
//! 4. If tier 1 found fewer than `tier1_short_circuit` records (and the
//!    engine is tiered), tier 2 scores index candidates with Levenshtein
//!    and Jaro-Winkler
//! 5. Append tier-2 rows not already returned by tier 1, cap, memoize
//!
//! Skipping tier 2 when tier 1 is full only bounds cost; it does not mean
//! no better fuzzy match exists.

pub mod cache;
pub mod fuzzy;
pub mod structural;
pub mod suggest;
pub mod types;

use std::sync::Arc;
use tracing::debug;

use crate::algorithms::normalize::normalize;
use crate::algorithms::{JaroWinkler, Levenshtein, Similarity};
use crate::config::{EngineConfig, SearchMode};
use crate::dedup::merge_unique;
use crate::error::Result;
use crate::indexing::record::{RawRow, Record};
use crate::indexing::record_index::RecordIndex;

use cache::{CacheKey, ResultCache};
use types::{Algorithm, EngineStats, FieldScope, MatchType, SearchResult};

/// Minimum number of items before a scan is spread over the rayon pool.
///
/// Below this, sequential iteration beats thread coordination.
pub(crate) const PARALLEL_THRESHOLD: usize = 1024;

/// Fuzzy lookup over an immutable corpus of records.
///
/// Build once, search many times. Rebuild when the corpus changes.
///
/// # Example
///
/// ```rust
/// use fuzzylookup::{FieldScope, LookupEngine, MatchType, Record};
///
/// let engine = LookupEngine::new(vec![
///     Record::new("M10A", "Đào đất"),
///     Record::new("B20", "Bê tông lót móng"),
/// ]);
///
/// let results = engine.search("dao dat", FieldScope::Both);
/// assert_eq!(results[0].record.code(), "M10A");
/// assert_eq!(results[0].score, 100);
/// assert_eq!(results[0].match_type, MatchType::Exact);
/// ```
pub struct LookupEngine {
    records: Vec<Arc<Record>>,
    index: RecordIndex,
    metrics: Vec<Box<dyn Similarity>>,
    cache: ResultCache,
    config: EngineConfig,
}

impl std::fmt::Debug for LookupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupEngine")
            .field("rows", &self.records.len())
            .field("cache_size", &self.cache.len())
            .field("config", &self.config)
            .finish()
    }
}

impl LookupEngine {
    /// Build an engine with the default configuration.
    pub fn new(records: Vec<Record>) -> Self {
        Self::build(records, EngineConfig::default())
    }

    /// Build an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::EngineError::Config) if the
    /// configuration is invalid. An empty corpus is not an error.
    pub fn with_config(records: Vec<Record>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(records, config))
    }

    /// Build from original table rows, resolving code and description
    /// through `config.aliases`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::EngineError::Config) if the
    /// configuration is invalid.
    pub fn from_rows<I>(rows: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        config.validate()?;
        let records = rows
            .into_iter()
            .map(|row| Record::from_row(row, &config.aliases))
            .collect();
        Ok(Self::build(records, config))
    }

    fn build(records: Vec<Record>, config: EngineConfig) -> Self {
        let index = RecordIndex::build(&records);
        let metrics: Vec<Box<dyn Similarity>> = vec![
            Box::new(Levenshtein::with_exact_limit(config.exact_distance_limit)),
            Box::new(JaroWinkler::with_prefix_weight(config.prefix_weight)),
        ];
        debug!(rows = records.len(), mode = ?config.mode, "lookup engine built");

        Self {
            records: records.into_iter().map(Arc::new).collect(),
            index,
            metrics,
            cache: ResultCache::new(config.cache_capacity),
            config,
        }
    }

    /// Ranked matches for `query` within `scope`.
    ///
    /// At most `max_results` entries, best first; equal scores keep corpus
    /// order. Never fails: an empty corpus gives an empty list.
    pub fn search(&self, query: &str, scope: FieldScope) -> Vec<SearchResult> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return self.list_all();
        }

        let key = CacheKey::new(normalized.as_str(), scope);
        if let Some(hit) = self.cache.get(&key) {
            return hit.as_ref().clone();
        }

        let results = self.run_tiers(&normalized, scope);
        self.cache.insert(key, Arc::new(results.clone()));
        results
    }

    fn run_tiers(&self, query: &str, scope: FieldScope) -> Vec<SearchResult> {
        let limit = self.config.max_results;
        let mut results =
            structural::structural_search(&self.index, &self.records, query, scope, limit);

        if self.config.mode == SearchMode::Simple
            || results.len() >= self.config.tier1_short_circuit
        {
            debug!(query, structural = results.len(), "fuzzy tier skipped");
            return results;
        }

        let fuzzy = fuzzy::fuzzy_search(
            &self.index,
            &self.records,
            &self.metrics,
            query,
            scope,
            self.config.fuzzy_threshold,
            limit,
        );
        debug!(
            query,
            structural = results.len(),
            fuzzy = fuzzy.len(),
            "fuzzy tier merged"
        );

        merge_unique(&mut results, fuzzy, limit);
        results
    }

    /// First `max_results` records, unscored.
    fn list_all(&self) -> Vec<SearchResult> {
        self.records
            .iter()
            .take(self.config.max_results)
            .enumerate()
            .map(|(index, record)| SearchResult {
                index,
                record: Arc::clone(record),
                score: 100,
                match_type: MatchType::All,
                algorithm: Algorithm::Exact,
            })
            .collect()
    }

    /// Up to `max_count` distinct original code/description texts that
    /// contain `prefix` after normalization.
    pub fn suggestions(&self, prefix: &str, max_count: usize) -> Vec<String> {
        suggest::suggestions(
            &self.index,
            &self.records,
            prefix,
            max_count,
            self.config.min_suggestion_len,
        )
    }

    /// Drop every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("result cache cleared");
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_rows: self.records.len(),
            cache_size: self.cache.len(),
            fuzzy_threshold: self.config.fuzzy_threshold,
            trigram_entries: self.index.trigram_entries(),
            bigram_entries: self.index.bigram_entries(),
            exact_entries: self.index.exact_entries(),
            word_entries: self.index.word_entries(),
        }
    }

    /// Record at corpus position `index`
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index).map(Arc::as_ref)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
