//! Text normalization applied to every indexed field and every query
//!
//! Lowercases, strips Latin diacritics, folds a small table of letters and
//! symbols that canonical decomposition leaves alone, and collapses
//! whitespace. The output is stable under a second pass.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Replacement for characters that survive NFD untouched.
///
/// Applied after lowercasing, so only lowercase forms are listed.
#[inline]
fn fold_special(c: char) -> Option<&'static str> {
    let folded = match c {
        'đ' | 'ð' => "d",
        'ø' => "o",
        'ł' => "l",
        'ħ' => "h",
        'ı' => "i",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{fe58}' | '\u{fe63}' | '\u{ff0d}' => "-",
        '\u{2018}' | '\u{2019}' | '\u{201a}' | '\u{201b}' => "'",
        '\u{201c}' | '\u{201d}' | '\u{201e}' | '\u{201f}' => "\"",
        '™' | '®' | '©' => "",
        _ => return None,
    };
    Some(folded)
}

/// Normalize text for matching.
///
/// # Example
/// ```
/// use fuzzylookup::algorithms::normalize::normalize;
///
/// assert_eq!(normalize("  Đào   ĐẤT "), "dao dat");
/// assert_eq!(normalize("Acme™ – Pro"), "acme - pro");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_ascii() {
        return collapse_whitespace(&text.to_ascii_lowercase());
    }

    let mut folded = String::with_capacity(text.len());
    for c in text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match fold_special(c) {
            Some(replacement) => folded.push_str(replacement),
            None => folded.push(c),
        }
    }

    collapse_whitespace(&folded)
}

/// Collapse whitespace runs into a single space and trim both ends.
#[inline]
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
