//! Tier 2: n-gram filtered fuzzy scoring.
//!
//! Only records sharing an exact text, word, trigram or bigram with the
//! query are scored. Each in-scope field is scored by every metric; the
//! record keeps its best score and the metric that produced it.

use rayon::prelude::*;
use std::sync::Arc;

use super::types::{rank, FieldScope, MatchType, SearchResult};
use super::PARALLEL_THRESHOLD;
use crate::algorithms::Similarity;
use crate::indexing::record::Record;
use crate::indexing::record_index::{NormalizedRecord, RecordIndex};

/// Best (score, metric) for one record, or `None` if no field is in scope.
///
/// Earlier metrics win ties.
fn best_score<'m>(
    metrics: &'m [Box<dyn Similarity>],
    query: &str,
    record: &NormalizedRecord,
    scope: FieldScope,
) -> Option<(u8, &'m dyn Similarity)> {
    let fields = [
        scope.includes_code().then_some(record.code.as_str()),
        scope.includes_description().then_some(record.description.as_str()),
    ];

    let mut best: Option<(u8, &'m dyn Similarity)> = None;
    for field in fields.into_iter().flatten() {
        for metric in metrics {
            let score = metric.score(query, field);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, &**metric));
            }
        }
    }
    best
}

/// Run tier 2 over the index candidates for `query` (normalized).
///
/// Keeps records scoring at least `threshold`; ranked and capped at `limit`.
pub fn fuzzy_search(
    index: &RecordIndex,
    records: &[Arc<Record>],
    metrics: &[Box<dyn Similarity>],
    query: &str,
    scope: FieldScope,
    threshold: u8,
    limit: usize,
) -> Vec<SearchResult> {
    let candidates = index.candidates_normalized(query);

    let score_candidate = |id: usize| {
        let normalized = index.normalized(id)?;
        let (score, metric) = best_score(metrics, query, normalized, scope)?;
        (score >= threshold).then(|| SearchResult {
            index: id,
            record: Arc::clone(&records[id]),
            score,
            match_type: MatchType::Fuzzy,
            algorithm: metric.algorithm(),
        })
    };

    let mut matches: Vec<SearchResult> = if candidates.len() >= PARALLEL_THRESHOLD {
        candidates.into_par_iter().filter_map(score_candidate).collect()
    } else {
        candidates.into_iter().filter_map(score_candidate).collect()
    };

    rank(&mut matches);
    matches.truncate(limit);
    matches
}
