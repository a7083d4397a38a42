use crate::domain::model::LengthBounds;
use crate::domain::ports::Summarizer;
use crate::domain::services::split_sentences;
use crate::utils::error::{DigestError, Result};
use std::collections::HashMap;

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "shall", "this",
    "that", "these", "those", "it", "its", "as", "if", "then", "than", "so", "such", "no", "not",
    "any", "all", "each", "other", "which", "who", "whom", "what", "their", "they", "he", "she",
    "his", "her", "we", "you", "our", "your", "there", "here", "into", "upon", "under",
];

// Sentences shorter than this are headings or list debris.
const MIN_SENTENCE_WORDS: usize = 4;

/// Frequency-based extractive summarizer. Bounds are counted in words.
///
/// Sentences are scored by the mean log term-frequency of their content
/// words with a small bonus for appearing early. The best sentences are taken
/// until `min_length` words are collected, emitted in document order, and the
/// result is cut at `max_length` words.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self
    }
}

struct Scored {
    position: usize,
    score: f32,
    text: String,
}

impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &'static str {
        "extractive"
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let mut sentences: Vec<String> = split_sentences(text)
            .into_iter()
            .filter(|s| s.split_whitespace().count() >= MIN_SENTENCE_WORDS)
            .collect();
        if sentences.is_empty() {
            sentences = split_sentences(text);
        }
        if sentences.is_empty() || bounds.max_length == 0 {
            return Err(DigestError::SummarizationError {
                message: "no sentences to summarize".to_string(),
            });
        }

        let frequencies = term_frequencies(&sentences);
        let total = sentences.len() as f32;
        let mut ranked: Vec<Scored> = sentences
            .into_iter()
            .enumerate()
            .map(|(position, text)| {
                let score = sentence_score(&text, &frequencies)
                    + 0.1 * (1.0 - position as f32 / total);
                Scored {
                    position,
                    score,
                    text,
                }
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });

        let target = bounds.min_length.max(1);
        let mut selected = Vec::new();
        let mut words = 0;
        for sentence in ranked {
            if words >= target {
                break;
            }
            words += sentence.text.split_whitespace().count();
            selected.push(sentence);
        }
        selected.sort_by_key(|s| s.position);

        let joined = selected
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(truncate_words(&joined, bounds.max_length))
    }
}

fn content_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
}

fn term_frequencies(sentences: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for sentence in sentences {
        for word in content_words(sentence) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}

fn sentence_score(sentence: &str, frequencies: &HashMap<String, usize>) -> f32 {
    let (sum, count) = content_words(sentence).fold((0.0f32, 0usize), |(sum, count), word| {
        let tf = frequencies.get(&word).copied().unwrap_or(0);
        (sum + 1.0 + (tf.max(1) as f32).ln(), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Keeps at most `max_words` whitespace-separated words.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
