/// Greedy word wrap. Words are added to the current line while the measured
/// line stays within `max_width`; a word that is wider than `max_width` on its
/// own is broken across lines by characters. Every returned line measures at
/// most `max_width`, unless a single character is already wider than it.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if measure(word) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = break_word(word, max_width, &measure);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn break_word<F>(word: &str, max_width: f32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::replace(&mut piece, ch.to_string()));
        }
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::metrics::Font;

    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn test_greedy_wrap_by_character_count() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10.0, chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
    }

    #[test]
    fn test_long_word_is_broken() {
        let lines = wrap_text("a supercalifragilistic word", 8.0, chars);
        assert_eq!(lines, vec!["a", "supercal", "ifragili", "stic", "word"]);
        assert!(lines.iter().all(|line| chars(line) <= 8.0));
    }

    #[test]
    fn test_broken_word_tail_can_share_a_line() {
        let lines = wrap_text("abcdefghij k", 4.0, chars);
        assert_eq!(lines, vec!["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("   ", 50.0, chars).is_empty());
    }

    #[test]
    fn test_lines_never_exceed_page_width() {
        let text = "Notwithstanding anything to the contrary contained herein, the Lessee \
                    shall indemnify and hold harmless the Lessor from all claims, including \
                    WWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWW damages.";
        let max_width = 160.0;
        let measure = |s: &str| Font::Helvetica.string_width_mm(s, 12.0);
        let lines = wrap_text(text, max_width, measure);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line) <= max_width, "line too wide: {}", line);
        }
        let rejoined: String = lines.concat().split_whitespace().collect();
        let original: String = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }
}
