use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Legal phrasing and its plain-English replacement, applied in this order.
/// Multi-word entries come before their single-word prefixes so that
/// "pursuant to" wins over "pursuant".
pub const SIMPLIFICATIONS: &[(&str, &str)] = &[
    ("notwithstanding", "despite"),
    ("pursuant to", "according to"),
    ("in accordance with", "following"),
    ("prior to", "before"),
    ("subsequent to", "after"),
    ("commence", "start"),
    ("terminate", "end"),
    ("utilize", "use"),
    ("implement", "use"),
    ("facilitate", "help"),
    ("endeavor", "try"),
    ("pursuant", "according"),
    ("herein", "in this document"),
    ("thereof", "of this"),
    ("therein", "in that"),
    ("whereby", "by which"),
    ("wherein", "where"),
    ("vis-a-vis", "compared to"),
    ("henceforth", "from now on"),
];

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SIMPLIFICATIONS
        .iter()
        .map(|(complex, simple)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(complex));
            (
                Regex::new(&pattern).expect("escaped literal is a valid pattern"),
                *simple,
            )
        })
        .collect()
});

/// Replaces legal jargon with simpler words. Matching ignores case and only
/// hits whole words, so "terminated" and "commencement" are left alone.
pub fn simplify_text(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, NoExpand(replacement)).into_owned()
        })
}
