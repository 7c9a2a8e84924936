//! String similarity primitives used by the lookup engine
//!
//! Each algorithm is a standalone function for composability, plus a
//! trait-based interface so the fuzzy tier can iterate its metrics.

pub mod jaro;
pub mod levenshtein;
pub mod ngram;
pub mod normalize;

pub use jaro::*;
pub use levenshtein::*;
pub use ngram::*;
pub use normalize::normalize;

use crate::search::types::Algorithm;

/// Trait for similarity metrics scored on the integer 0..=100 scale.
///
/// 0 means completely different, 100 means identical.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;

    /// Tag recorded on results this metric produced
    fn algorithm(&self) -> Algorithm;

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str {
        self.algorithm().as_str()
    }
}

/// Convert a 0.0..=1.0 ratio to the 0..=100 integer scale.
#[inline]
pub(crate) fn to_percent(ratio: f64) -> u8 {
    if ratio.is_nan() {
        return 0;
    }
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
