//! Issue reference extraction from free text.

use super::IssueReference;
use regex::Regex;
use std::sync::OnceLock;

// Word boundaries are checked by hand against ASCII word characters so that
// non-ASCII letters next to an identifier never suppress a match.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([A-Z]{2,10})-([0-9]{1,6})").expect("reference pattern compiles")
    })
}

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before = start
        .checked_sub(1)
        .and_then(|index| bytes.get(index))
        .copied();
    let after = bytes.get(end).copied();
    !before.is_some_and(is_word_byte) && !after.is_some_and(is_word_byte)
}

/// Extracts Linear issue references such as `LIN-123` from text.
///
/// Matches are returned in order of appearance and are never deduplicated.
/// A match must be a whole word: `XLIN-1`, `LIN-1_a` and eleven-letter keys
/// are rejected. Lowercase keys never match.
///
/// # Examples
///
/// ```
/// use trackline::reference::domain::extract_references;
///
/// let refs = extract_references("Fix LIN-123 and TEAM-4567, also lin-9");
/// let ids: Vec<&str> = refs.iter().map(|r| r.issue_id()).collect();
/// assert_eq!(ids, ["LIN-123", "TEAM-4567"]);
/// ```
#[must_use]
pub fn extract_references(text: &str) -> Vec<IssueReference> {
    reference_pattern()
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            if !is_bounded(text, whole.start(), whole.end()) {
                return None;
            }
            let team_key = captures.get(1)?.as_str();
            let issue_number = captures.get(2)?.as_str();
            Some(IssueReference::from_match(team_key, issue_number))
        })
        .collect()
}
