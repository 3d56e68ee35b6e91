//! Free-text query cleanup before it is sent to the catalog search.

use once_cell::sync::Lazy;
use regex::Regex;

// `\W` is Unicode-aware in `regex`, so kana, kanji and accented letters survive.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("non-word pattern"));

static DISC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(CD|disc|disk)\s*\d+").expect("disc marker pattern"));

/// Strip punctuation and medium markers ("CD1", "Disc 2") from a search query.
///
/// Punctuation such as `!` or `-` makes the catalog search return nothing
/// even when the words match, and medium markers rarely appear in album
/// titles. Whitespace is not trimmed.
pub fn normalize(query: &str) -> String {
    let mut out = NON_WORD.replace_all(query, " ").into_owned();
    // A removal can splice a new marker together ("CCD1D1" -> "CD1").
    while DISC_MARKER.is_match(&out) {
        out = DISC_MARKER.replace_all(&out, "").into_owned();
    }
    out
}
