//! Tier 1: structural matching against normalized fields.
//!
//! Every record is checked (the tests are cheap). Per field the first rule
//! that holds decides the score:
//!
//! | rule                         | score | match type |
//! |------------------------------|-------|------------|
//! | field equals query           | 100   | exact      |
//! | query is a whole word        | 90    | word       |
//! | field starts with query      | 80    | prefix     |
//! | field contains query         | 60    | contains   |
//! | wildcard pattern matches     | 40    | pattern    |
//!
//! A record takes its best field.

use rayon::prelude::*;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use super::types::{rank, Algorithm, FieldScope, MatchType, SearchResult};
use super::PARALLEL_THRESHOLD;
use crate::indexing::record::Record;
use crate::indexing::record_index::{NormalizedRecord, RecordIndex};

/// Translate a query into an unanchored regex where `?` is one char, `*`
/// is any run, every other char is literal, and any text may sit between
/// consecutive steps.
///
/// `"m1a"` becomes `m.*1.*a`, so it matches `"m10a"`.
pub fn wildcard_pattern(query: &str) -> String {
    let mut steps: Vec<String> = Vec::with_capacity(query.len());
    for c in query.chars() {
        match c {
            '?' => steps.push(".".to_string()),
            '*' => steps.push(".*".to_string()),
            c => steps.push(regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    format!("(?s){}", steps.join(".*"))
}

/// Compiled structural rules for one normalized query.
#[derive(Debug)]
pub struct StructuralMatcher {
    query: String,
    word: Option<Regex>,
    pattern: Option<Regex>,
}

impl StructuralMatcher {
    /// `query` must be normalized and non-empty.
    pub fn new(query: &str) -> Self {
        let word = compile(&format!(r"\b{}\b", regex::escape(query)));
        let pattern = compile(&wildcard_pattern(query));
        Self {
            query: query.to_string(),
            word,
            pattern,
        }
    }

    /// Score one normalized field, or `None` if no rule holds.
    pub fn match_field(&self, field: &str) -> Option<(u8, MatchType)> {
        if field.is_empty() {
            return None;
        }
        if field == self.query {
            return Some((100, MatchType::Exact));
        }
        if self.word.as_ref().is_some_and(|rx| rx.is_match(field)) {
            return Some((90, MatchType::Word));
        }
        if field.starts_with(&self.query) {
            return Some((80, MatchType::Prefix));
        }
        if field.contains(&self.query) {
            return Some((60, MatchType::Contains));
        }
        if self.pattern.as_ref().is_some_and(|rx| rx.is_match(field)) {
            return Some((40, MatchType::Pattern));
        }
        None
    }

    /// Best rule across the fields in `scope`; code wins ties.
    pub fn match_record(
        &self,
        record: &NormalizedRecord,
        scope: FieldScope,
    ) -> Option<(u8, MatchType)> {
        let code = scope
            .includes_code()
            .then(|| self.match_field(&record.code))
            .flatten();
        let description = scope
            .includes_description()
            .then(|| self.match_field(&record.description))
            .flatten();

        match (code, description) {
            (Some(c), Some(d)) => Some(if d.0 > c.0 { d } else { c }),
            (c, d) => c.or(d),
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(rx) => Some(rx),
        Err(err) => {
            debug!(error = %err, "structural rule skipped, regex did not compile");
            None
        }
    }
}

/// Run tier 1 over the whole corpus. Ranked and capped at `limit`.
pub fn structural_search(
    index: &RecordIndex,
    records: &[Arc<Record>],
    query: &str,
    scope: FieldScope,
    limit: usize,
) -> Vec<SearchResult> {
    let matcher = StructuralMatcher::new(query);
    let to_result = |normalized: &NormalizedRecord| {
        matcher
            .match_record(normalized, scope)
            .map(|(score, match_type)| SearchResult {
                index: normalized.index,
                record: Arc::clone(&records[normalized.index]),
                score,
                match_type,
                algorithm: Algorithm::Exact,
            })
    };

    let mut results: Vec<SearchResult> = if index.len() >= PARALLEL_THRESHOLD {
        index.records().par_iter().filter_map(to_result).collect()
    } else {
        index.records().iter().filter_map(to_result).collect()
    };

    rank(&mut results);
    results.truncate(limit);
    results
}
