//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Myers bit-parallel algorithm for patterns up to 64 chars
//! - Single-row DP fallback for longer patterns
//! - A length-only estimate past a configurable size limit, which caps
//!   the cost of scoring very long description fields
//!
//! Distances count Unicode scalar values, not bytes.

use super::{to_percent, Similarity};
use crate::search::types::Algorithm;
use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

/// Strings longer than this (in chars) get the length estimate instead of
/// an exact distance.
pub const LONG_STRING_LIMIT: usize = 100;

// ============================================================================
// Exact kernels
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 characters.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    if m > MYERS_BLOCK_SIZE {
        return dp_distance(pattern, text);
    }

    // For each character c, peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(26));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;
    let mask = 1u64 << (m - 1);

    for &tc in text {
        let eq = peq.get(&tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // First row is 0,1,2,... so the shifted-in horizontal delta is +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    score
}

/// Single-row DP distance for char slices
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Shorter string on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Upper-bound estimate used past the size limit:
/// `|m - n|`, plus `min(m, n)` when the strings differ.
#[inline]
fn estimate_distance(m: usize, n: usize, equal: bool) -> usize {
    let diff = m.abs_diff(n);
    if equal {
        diff
    } else {
        diff + m.min(n)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Exact Levenshtein distance regardless of input length.
#[inline]
#[must_use]
pub fn levenshtein_exact(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    // Shorter string as pattern: Myers is O(⌈m/64⌉n)
    let (pattern, text) = if a_chars.len() <= b_chars.len() {
        (&a_chars[..], &b_chars[..])
    } else {
        (&b_chars[..], &a_chars[..])
    };

    myers_64(pattern, text)
}

/// Levenshtein distance, exact while both inputs are at most `limit` chars.
///
/// Past the limit the result is the length estimate
/// `|len(a) - len(b)| + (a != b ? min(len(a), len(b)) : 0)`, which never
/// undercounts the true distance.
///
/// # Example
/// ```
/// use fuzzylookup::algorithms::levenshtein::levenshtein_with_limit;
///
/// assert_eq!(levenshtein_with_limit("kitten", "sitting", 100), 3);
/// // Over the limit: 1 (length difference) + 6 (shorter length)
/// assert_eq!(levenshtein_with_limit("kitten", "sitting", 4), 7);
/// ```
#[must_use]
pub fn levenshtein_with_limit(a: &str, b: &str, limit: usize) -> usize {
    let m = a.chars().count();
    let n = b.chars().count();

    if m > limit || n > limit {
        return estimate_distance(m, n, a == b);
    }

    levenshtein_exact(a, b)
}

/// Levenshtein distance with the default [`LONG_STRING_LIMIT`].
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    levenshtein_with_limit(a, b, LONG_STRING_LIMIT)
}

/// Similarity on the 0..=100 scale: `100 × (1 − distance / max_len)`.
///
/// Returns 100 when both strings are empty.
#[must_use]
pub fn levenshtein_similarity_with_limit(a: &str, b: &str, limit: usize) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let dist = levenshtein_with_limit(a, b, limit);
    to_percent(1.0 - dist as f64 / max_len as f64)
}

/// Similarity on the 0..=100 scale with the default [`LONG_STRING_LIMIT`].
///
/// # Example
/// ```
/// use fuzzylookup::algorithms::levenshtein::levenshtein_similarity;
///
/// assert_eq!(levenshtein_similarity("m1oa", "m10a"), 75);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> u8 {
    levenshtein_similarity_with_limit(a, b, LONG_STRING_LIMIT)
}

/// Levenshtein similarity metric
///
/// # Complexity
/// - Time: O(⌈m/64⌉n) up to the exact limit, O(m+n) past it
/// - Space: O(min(m,n))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levenshtein {
    /// Inputs longer than this use the length estimate
    pub exact_limit: usize,
}

impl Default for Levenshtein {
    fn default() -> Self {
        Self {
            exact_limit: LONG_STRING_LIMIT,
        }
    }
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exact_limit(exact_limit: usize) -> Self {
        Self { exact_limit }
    }

    #[must_use]
    pub fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein_with_limit(a, b, self.exact_limit)
    }
}

impl Similarity for Levenshtein {
    fn score(&self, a: &str, b: &str) -> u8 {
        levenshtein_similarity_with_limit(a, b, self.exact_limit)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Levenshtein
    }
}
