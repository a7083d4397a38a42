use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// Word characters, whitespace and basic sentence punctuation survive.
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,;:?!()]").expect("character class is valid"));

/// Normalizes extracted PDF text before analysis: lowercase, single spaces,
/// and only basic punctuation.
pub fn preprocess_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE_RUN.replace_all(&lowered, " ");
    let cleaned = DISALLOWED_CHARS.replace_all(&collapsed, "");
    cleaned.trim().to_string()
}
