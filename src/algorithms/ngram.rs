//! Character n-gram and token extraction
//!
//! N-grams are fixed-size windows of Unicode scalar values, represented as
//! `[char; N]` so they can key hash tables without allocating. Strings
//! shorter than `N` produce no n-grams; no padding is applied.

use ahash::AHashSet;
use smallvec::SmallVec;

/// Bigram key
pub type Bigram = [char; 2];

/// Trigram key
pub type Trigram = [char; 3];

/// Extract every `N`-char window of `s`, in order, duplicates included.
///
/// # Example
/// ```
/// use fuzzylookup::algorithms::ngram::extract_ngrams;
///
/// let grams = extract_ngrams::<2>("m10a");
/// assert_eq!(grams, vec![['m', '1'], ['1', '0'], ['0', 'a']]);
/// assert!(extract_ngrams::<3>("ab").is_empty());
/// ```
#[must_use]
pub fn extract_ngrams<const N: usize>(s: &str) -> Vec<[char; N]> {
    if N == 0 {
        return Vec::new();
    }

    let chars: SmallVec<[char; 64]> = s.chars().collect();
    chars
        .windows(N)
        .map(|window| {
            let mut gram = ['\0'; N];
            gram.copy_from_slice(window);
            gram
        })
        .collect()
}

/// Distinct `N`-char windows of `s`.
///
/// "aaa" with N=2 yields a single `['a', 'a']`, so posting lists never
/// receive the same record twice from one field.
#[must_use]
pub fn unique_ngrams<const N: usize>(s: &str) -> AHashSet<[char; N]> {
    extract_ngrams::<N>(s).into_iter().collect()
}

/// Whitespace-delimited tokens longer than one character.
pub fn word_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace().filter(|token| {
        let mut chars = token.chars();
        chars.next().is_some() && chars.next().is_some()
    })
}
