//! Text normalization helpers shared by extraction and summarization.
//!
//! - Whitespace collapsing
//! - Removal of boilerplate phrases publishers append to article bodies
//! - Character-bounded truncation
//! - Collapsing of immediately repeated words left behind by greedy decoding
//! - Log-safe previews of long strings

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Comment prompts, topic footers and promotional tails. The last alternative
/// swallows everything up to the end of the (single-line) text.
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Comments|Topics mentioned in this article|Listen to the latest songs.*)").unwrap()
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Replace every run of whitespace (including newlines) with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Remove known boilerplate phrases.
///
/// Removal can leave a double space behind where a phrase sat between two
/// words; callers that need a canonical form collapse whitespace first and
/// accept that seam.
pub fn strip_boilerplate(text: &str) -> String {
    BOILERPLATE.replace_all(text, "").into_owned()
}

/// Keep at most `max_chars` characters. A hard cut: no word-boundary
/// adjustment and no ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Collapse immediately repeated words into a single occurrence.
///
/// Two words are repeats when they are identical (case-sensitive) and
/// separated only by whitespace. A run of three or more collapses to one.
/// Punctuation between words breaks a run, so `"no, no"` is kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_repeated_words("the the cat"), "the cat");
/// assert_eq!(collapse_repeated_words("The the cat"), "The the cat");
/// ```
pub fn collapse_repeated_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut emitted_to = 0usize;
    let mut prev: Option<(&str, usize)> = None;

    for m in WORD.find_iter(text) {
        let word = m.as_str();
        if let Some((prev_word, prev_end)) = prev {
            let gap = &text[prev_end..m.start()];
            if word == prev_word && !gap.is_empty() && gap.chars().all(char::is_whitespace) {
                emitted_to = m.end();
                prev = Some((prev_word, m.end()));
                continue;
            }
        }
        out.push_str(&text[emitted_to..m.end()]);
        emitted_to = m.end();
        prev = Some((word, m.end()));
    }

    out.push_str(&text[emitted_to..]);
    out
}

/// Shorten a string for logging.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped bytes appended.
pub fn preview(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() == s.len() {
        cut
    } else {
        format!("{}…(+{} bytes)", cut, s.len() - cut.len())
    }
}
