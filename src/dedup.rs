//! Row fingerprints for merging result tiers
//!
//! Two records are the same logical row when their full original rows are
//! equal cell for cell, regardless of corpus position or allocation. The
//! fuzzy tier uses this to skip rows the structural tier already returned.

use ahash::{AHashSet, AHasher};
use std::hash::{Hash, Hasher};

use crate::indexing::record::Record;
use crate::search::types::SearchResult;

/// Content hash of a record's full original row, in column order.
#[must_use]
pub fn row_fingerprint(record: &Record) -> u64 {
    // Fixed keys: equal rows hash equally across engine instances
    let mut hasher = AHasher::default();
    record.raw().len().hash(&mut hasher);
    for (header, cell) in record.raw() {
        header.hash(&mut hasher);
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

/// Append `extra` to `primary`, skipping rows already present, up to `limit`.
///
/// `primary` is taken as is, duplicates included. Each `extra` row is checked
/// against `primary` and against the `extra` rows appended before it, so
/// repeated rows in `extra` collapse to their first occurrence.
pub fn merge_unique(primary: &mut Vec<SearchResult>, extra: Vec<SearchResult>, limit: usize) {
    let mut seen: AHashSet<u64> = primary
        .iter()
        .map(|result| row_fingerprint(&result.record))
        .collect();

    for result in extra {
        if primary.len() >= limit {
            break;
        }
        if seen.insert(row_fingerprint(&result.record)) {
            primary.push(result);
        }
    }

    primary.truncate(limit);
}
