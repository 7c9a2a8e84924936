//! Jaro and Jaro-Winkler similarity implementations
//!
//! Well suited to short codes and names. Jaro-Winkler gives extra weight
//! to common prefixes, which matches how people type partial codes.
//!
//! ASCII inputs take a byte-based fast path; everything else is compared
//! per Unicode scalar value.

use super::{to_percent, Similarity};
use crate::search::types::Algorithm;
use smallvec::SmallVec;

/// Default Winkler prefix weight
pub const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;

/// Longest common prefix that earns the Winkler bonus
pub const MAX_PREFIX_LENGTH: usize = 4;

/// Raw Jaro similarity in 0.0..=1.0.
#[inline]
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    if a.is_ascii() && b.is_ascii() {
        return jaro_slices(a.as_bytes(), b.as_bytes());
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaro_slices(&a_chars, &b_chars)
}

/// Jaro over any comparable slice (bytes for ASCII, chars otherwise).
fn jaro_slices<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matches: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matches: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];

    let mut matches = 0usize;
    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matches[j] || a[i] != b[j] {
                continue;
            }
            a_matches[i] = true;
            b_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..a_len {
        if !a_matches[i] {
            continue;
        }
        while k < b_len && !b_matches[k] {
            k += 1;
        }
        if k >= b_len {
            break;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;

    (m / a_len as f64 + m / b_len as f64 + (m - t) / m) / 3.0
}

/// Raw Jaro-Winkler similarity in 0.0..=1.0.
///
/// `prefix_weight` is clamped to [0.0, 0.25] so the result stays <= 1.0.
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str, prefix_weight: f64) -> f64 {
    let jaro_sim = jaro_similarity(a, b);
    if jaro_sim == 0.0 {
        return 0.0;
    }

    let prefix_weight = if prefix_weight.is_finite() {
        prefix_weight.clamp(0.0, 0.25)
    } else {
        DEFAULT_PREFIX_WEIGHT
    };

    let prefix_len = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX_LENGTH)
        .take_while(|(ac, bc)| ac == bc)
        .count();

    jaro_sim + (prefix_len as f64 * prefix_weight * (1.0 - jaro_sim))
}

/// Jaro-Winkler on the 0..=100 scale.
///
/// 100 for identical strings, 0 when exactly one side is empty.
///
/// # Example
/// ```
/// use fuzzylookup::algorithms::jaro::jaro_winkler;
///
/// assert_eq!(jaro_winkler("martha", "martha", 0.1), 100);
/// assert_eq!(jaro_winkler("martha", "marhta", 0.1), 96);
/// assert_eq!(jaro_winkler("", "abc", 0.1), 0);
/// ```
#[inline]
#[must_use]
pub fn jaro_winkler(a: &str, b: &str, prefix_weight: f64) -> u8 {
    to_percent(jaro_winkler_similarity(a, b, prefix_weight))
}

/// Jaro-Winkler similarity metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
        }
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix_weight(prefix_weight: f64) -> Self {
        Self {
            prefix_weight: prefix_weight.clamp(0.0, 0.25),
        }
    }
}

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> u8 {
        jaro_winkler(a, b, self.prefix_weight)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::JaroWinkler
    }
}
