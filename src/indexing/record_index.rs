//! Inverted indices over normalized record fields
//!
//! Four tables are built in one pass over the corpus:
//! - exact: whole normalized field -> records
//! - word: whitespace token (2+ chars) -> records
//! - bigram / trigram: every 2- and 3-char window -> records
//!
//! They only bound the input of the fuzzy scorer, so candidate lookup is
//! deliberately over-inclusive. Posting lists are ascending and unique
//! because records are inserted in corpus order.

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use super::record::Record;
use crate::algorithms::ngram::{extract_ngrams, unique_ngrams, word_tokens, Bigram, Trigram};
use crate::algorithms::normalize::normalize;

/// Normalized copy of a record's matched fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Position in the corpus
    pub index: usize,
    pub code: String,
    pub description: String,
}

/// Inverted indices for one corpus.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    records: Vec<NormalizedRecord>,
    exact: AHashMap<String, Vec<usize>>,
    words: AHashMap<String, Vec<usize>>,
    bigrams: AHashMap<Bigram, Vec<usize>>,
    trigrams: AHashMap<Trigram, Vec<usize>>,
}

/// Append `id` unless it is already the last posting.
#[inline]
fn post(list: &mut Vec<usize>, id: usize) {
    if list.last() != Some(&id) {
        list.push(id);
    }
}

impl RecordIndex {
    /// Build every table from `corpus`.
    pub fn build(corpus: &[Record]) -> Self {
        let mut index = Self {
            records: Vec::with_capacity(corpus.len()),
            ..Self::default()
        };

        for (id, record) in corpus.iter().enumerate() {
            let normalized = NormalizedRecord {
                index: id,
                code: normalize(record.code()),
                description: normalize(record.description()),
            };
            index.add_field(id, &normalized.code);
            index.add_field(id, &normalized.description);
            index.records.push(normalized);
        }

        debug!(
            rows = index.records.len(),
            exact = index.exact.len(),
            words = index.words.len(),
            bigrams = index.bigrams.len(),
            trigrams = index.trigrams.len(),
            "record index built"
        );

        index
    }

    fn add_field(&mut self, id: usize, field: &str) {
        if field.is_empty() {
            return;
        }

        post(self.exact.entry(field.to_string()).or_default(), id);

        for token in word_tokens(field) {
            post(self.words.entry(token.to_string()).or_default(), id);
        }

        // Code and description may share grams; `post` drops the repeat
        for gram in unique_ngrams::<2>(field) {
            post(self.bigrams.entry(gram).or_default(), id);
        }
        for gram in unique_ngrams::<3>(field) {
            post(self.trigrams.entry(gram).or_default(), id);
        }
    }

    /// Records sharing anything with `query`: the whole text, a word, a
    /// trigram or a bigram. Sorted ascending, unique.
    ///
    /// The query is normalized here; callers pass raw input.
    pub fn get_candidates(&self, query: &str) -> Vec<usize> {
        self.candidates_normalized(&normalize(query))
    }

    /// [`get_candidates`](Self::get_candidates) for an already-normalized query.
    pub fn candidates_normalized(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut candidate_ids: AHashSet<usize> = AHashSet::new();

        if let Some(ids) = self.exact.get(query) {
            candidate_ids.extend(ids.iter().copied());
        }

        for token in word_tokens(query) {
            if let Some(ids) = self.words.get(token) {
                candidate_ids.extend(ids.iter().copied());
            }
        }

        // Windows shorter than the gram size yield nothing
        for gram in extract_ngrams::<3>(query) {
            if let Some(ids) = self.trigrams.get(&gram) {
                candidate_ids.extend(ids.iter().copied());
            }
        }
        for gram in extract_ngrams::<2>(query) {
            if let Some(ids) = self.bigrams.get(&gram) {
                candidate_ids.extend(ids.iter().copied());
            }
        }

        let mut candidates: Vec<usize> = candidate_ids.into_iter().collect();
        candidates.sort_unstable();
        candidates
    }

    /// Normalized fields of the record at `index`
    pub fn normalized(&self, index: usize) -> Option<&NormalizedRecord> {
        self.records.get(index)
    }

    /// All normalized records in corpus order
    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct keys in the exact table
    pub fn exact_entries(&self) -> usize {
        self.exact.len()
    }

    /// Distinct keys in the word table
    pub fn word_entries(&self) -> usize {
        self.words.len()
    }

    /// Distinct keys in the bigram table
    pub fn bigram_entries(&self) -> usize {
        self.bigrams.len()
    }

    /// Distinct keys in the trigram table
    pub fn trigram_entries(&self) -> usize {
        self.trigrams.len()
    }
}
