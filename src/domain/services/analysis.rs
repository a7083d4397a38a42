use crate::domain::model::Analysis;
use crate::domain::services::{simplify_text, split_sentences};

pub const DEFAULT_LOOPHOLE_KEYWORDS: &[&str] = &[
    "loophole",
    "exemption",
    "exception",
    "exclude",
    "exclusion",
    "notwithstanding",
    "except",
    "unless",
    "provided that",
    "subject to",
    "in accordance with",
    "as per",
];

pub const DEFAULT_BENEFIT_KEYWORDS: &[&str] = &[
    "benefit",
    "advantage",
    "entitlement",
    "right",
    "privilege",
    "eligible",
    "qualify",
    "qualification",
    "shall",
    "must",
    "required",
    "obligation",
    "duty",
];

pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Longest flagged phrase, in characters, before it is cut at a word boundary.
pub const MAX_PHRASE_CHARS: usize = 100;

/// Keyword scanner that sorts sentences into loopholes and benefits.
#[derive(Debug, Clone)]
pub struct Analyzer {
    loophole_keywords: Vec<String>,
    benefit_keywords: Vec<String>,
    max_items: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOOPHOLE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            DEFAULT_BENEFIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            DEFAULT_MAX_ITEMS,
        )
    }
}

impl Analyzer {
    pub fn new(
        loophole_keywords: Vec<String>,
        benefit_keywords: Vec<String>,
        max_items: usize,
    ) -> Self {
        let lower = |keywords: Vec<String>| -> Vec<String> {
            keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            loophole_keywords: lower(loophole_keywords),
            benefit_keywords: lower(benefit_keywords),
            max_items,
        }
    }

    /// Flags every sentence containing a keyword (plain substring match on the
    /// lowercased sentence). A sentence can be both a loophole and a benefit.
    /// Each list keeps the first `max_items` hits in document order.
    pub fn detect_loopholes_and_benefits(&self, text: &str) -> Analysis {
        let mut analysis = Analysis::default();

        for sentence in split_sentences(text) {
            if analysis.loopholes.len() >= self.max_items
                && analysis.benefits.len() >= self.max_items
            {
                break;
            }

            let lowered = sentence.to_lowercase();
            let is_loophole = contains_any(&lowered, &self.loophole_keywords);
            let is_benefit = contains_any(&lowered, &self.benefit_keywords);
            if !is_loophole && !is_benefit {
                continue;
            }

            let phrase = clip_phrase(&simplify_text(sentence.trim()));
            if is_loophole && analysis.loopholes.len() < self.max_items {
                analysis.loopholes.push(phrase.clone());
            }
            if is_benefit && analysis.benefits.len() < self.max_items {
                analysis.benefits.push(phrase);
            }
        }

        tracing::debug!(
            "Flagged {} loopholes and {} benefits",
            analysis.loopholes.len(),
            analysis.benefits.len()
        );
        analysis
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword.as_str()))
}

/// Keeps the first [`MAX_PHRASE_CHARS`] characters. A phrase that had to be
/// cut loses its trailing partial word and gets an ellipsis; without any
/// space the last kept character is dropped instead.
pub fn clip_phrase(phrase: &str) -> String {
    if phrase.chars().count() < MAX_PHRASE_CHARS {
        return phrase.to_string();
    }

    let clipped: String = phrase.chars().take(MAX_PHRASE_CHARS).collect();
    match clipped.rfind(' ') {
        Some(last_space) => format!("{}...", &clipped[..last_space]),
        None => {
            let head: String = clipped.chars().take(MAX_PHRASE_CHARS - 1).collect();
            format!("{}...", head)
        }
    }
}
