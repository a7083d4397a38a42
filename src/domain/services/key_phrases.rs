use crate::domain::services::simplify_text;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const DEFAULT_MAX_PHRASES: usize = 5;

// Words that may open a noun chunk.
const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "any", "each", "every", "all", "such",
    "its", "their", "his", "her", "our", "your", "my", "no", "some", "said",
];

// Function words, auxiliaries and frequent contract verbs. These end a chunk.
const BREAK_WORDS: &[&str] = &[
    "and", "or", "but", "nor", "in", "on", "at", "to", "for", "of", "with", "by", "from", "into",
    "upon", "under", "over", "within", "without", "between", "after", "before", "during",
    "about", "against", "as", "if", "then", "than", "so", "not", "only", "also", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "shall", "may", "might", "must", "can", "it", "he", "she",
    "they", "we", "you", "i", "me", "him", "them", "us", "which", "who", "whom", "what", "whose",
    "where", "when", "why", "how", "there", "here", "unless", "except", "until", "while",
    "because", "whether", "per", "via", "pay", "pays", "paid", "agree", "agrees", "agreed",
    "provide", "provides", "provided", "include", "includes", "including", "receive",
    "receives", "received", "apply", "applies", "applied", "begin", "begins", "end", "ends",
    "remain", "remains", "become", "becomes", "make", "makes", "made", "give", "gives", "given",
    "take", "takes", "use", "uses", "used", "start", "starts", "help", "helps", "try", "tries",
    "according", "following", "despite",
];

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december";
const NUMBER_WORDS: &str = "one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|fifteen|twenty|thirty|forty|forty-five|fifty|sixty|ninety|hundred";
const UNITS: &str = "business days?|calendar days?|days?|weeks?|months?|years?|hours?|percent|per cent|dollars?|cents?|installments?|payments?";

// Dates and quantities, the multi-word entities legal text is full of.
static ENTITIES: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(?:(?:{m})\s+\d{{1,2}}(?:,\s*\d{{4}})?|\d{{1,2}}\s+(?:{m})(?:\s+\d{{4}})?|(?:\d+(?:[.,]\d+)*|{n})\s+(?:{u}))\b",
        m = MONTHS,
        n = NUMBER_WORDS,
        u = UNITS,
    );
    Regex::new(&pattern).expect("entity pattern is valid")
});

/// Rule-based noun chunking: a chunk is an optional determiner followed by a
/// run of content words, broken by punctuation and function words. Multi-word
/// chunks come first, then multi-word dates and quantities. Phrases are
/// simplified, de-duplicated, and cut to `max_phrases`.
pub fn extract_key_phrases(text: &str, max_phrases: usize) -> Vec<String> {
    let chunks = noun_chunks(text)
        .into_iter()
        .filter(|chunk| chunk.len() >= 2)
        .map(|chunk| chunk.join(" "));
    let entities = entities(text).into_iter();

    let mut phrases = Vec::new();
    let mut seen = HashSet::new();
    for candidate in chunks.chain(entities) {
        if phrases.len() >= max_phrases {
            break;
        }
        let phrase = simplify_text(&candidate);
        if seen.insert(phrase.to_lowercase()) {
            phrases.push(phrase);
        }
    }

    phrases
}

fn entities(text: &str) -> Vec<String> {
    ENTITIES
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|entity| entity.split_whitespace().count() >= 2)
        .collect()
}

fn noun_chunks(text: &str) -> Vec<Vec<&str>> {
    let mut chunks = Vec::new();

    for clause in text.split(|c: char| !(c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '\'')) {
        let mut current: Vec<&str> = Vec::new();
        let mut has_content = false;

        for word in clause.split_whitespace() {
            let word = word.trim_matches(|c: char| c == '-' || c == '\'');
            if word.is_empty() {
                continue;
            }
            let lowered = word.to_lowercase();

            if DETERMINERS.contains(&lowered.as_str()) {
                flush(&mut chunks, &mut current, has_content);
                has_content = false;
                current.push(word);
            } else if BREAK_WORDS.contains(&lowered.as_str()) {
                flush(&mut chunks, &mut current, has_content);
                has_content = false;
            } else {
                current.push(word);
                has_content = true;
            }
        }

        flush(&mut chunks, &mut current, has_content);
    }

    chunks
}

fn flush<'a>(chunks: &mut Vec<Vec<&'a str>>, current: &mut Vec<&'a str>, has_content: bool) {
    if has_content {
        chunks.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
