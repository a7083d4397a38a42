// Abbreviations common in contracts that end with a period but not a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "no", "nos", "sec", "art", "v", "vs", "inc", "ltd", "co", "corp", "mr",
    "mrs", "ms", "dr", "st", "para", "cl", "approx", "p", "pp",
];

// Words that name a lettered part of a document, as in "exhibit a.".
const LABEL_WORDS: &[&str] = &[
    "exhibit", "schedule", "appendix", "annex", "attachment", "addendum", "rider", "section",
    "clause", "article", "part", "item", "paragraph", "subsection", "form", "plan", "option",
    "class", "tier", "grade", "type", "phase", "note",
];

/// Splits text after `.`, `!` or `?` when the next character is whitespace
/// (or the text ends). A period after a known abbreviation or an initial
/// does not end the sentence. A single letter counts as an initial unless it
/// labels a document part ("schedule b."). Returned sentences are trimmed
/// and non-empty.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let at_boundary = chars.get(i + 1).map_or(true, |next| next.is_whitespace());
        if !at_boundary || (ch == '.' && ends_with_abbreviation(&current)) {
            continue;
        }

        push_trimmed(&mut sentences, &current);
        current.clear();
    }

    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn ends_with_abbreviation(fragment: &str) -> bool {
    let without_period = fragment.trim_end_matches('.');
    let mut words = without_period.rsplit(|c: char| c.is_whitespace() || c == '(');
    let last_word = words.next().unwrap_or("");

    if last_word.chars().count() == 1 && last_word.chars().all(char::is_alphabetic) {
        let previous = words
            .find(|word| !word.is_empty())
            .unwrap_or("")
            .to_lowercase();
        return !LABEL_WORDS.contains(&previous.as_str());
    }

    let lowered = last_word.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}
