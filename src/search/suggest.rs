//! Autocomplete suggestions drawn from the inverted tables.

use indexmap::IndexSet;
use std::sync::Arc;

use crate::algorithms::normalize::normalize;
use crate::indexing::record::Record;
use crate::indexing::record_index::RecordIndex;

/// Original field texts whose normalized form contains `prefix`.
///
/// Candidates are walked in corpus order, code before description. Returns
/// nothing when the normalized prefix is shorter than `min_len` chars.
pub fn suggestions(
    index: &RecordIndex,
    records: &[Arc<Record>],
    prefix: &str,
    max_count: usize,
    min_len: usize,
) -> Vec<String> {
    let needle = normalize(prefix);
    if max_count == 0 || needle.chars().count() < min_len {
        return Vec::new();
    }

    let mut found: IndexSet<String> = IndexSet::with_capacity(max_count);
    for id in index.candidates_normalized(&needle) {
        let (Some(normalized), Some(record)) = (index.normalized(id), records.get(id)) else {
            continue;
        };

        if normalized.code.contains(&needle) {
            found.insert(record.code().to_string());
        }
        if found.len() < max_count && normalized.description.contains(&needle) {
            found.insert(record.description().to_string());
        }
        if found.len() >= max_count {
            break;
        }
    }

    found.into_iter().collect()
}
