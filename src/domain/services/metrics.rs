//! Glyph widths for the base-14 Helvetica faces, in 1/1000 em, for the
//! printable ASCII range. Characters outside it are measured as the widest
//! common glyph so measurements never underestimate.

const FIRST_CHAR: u32 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 1000;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name used in the PDF font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name the page content refers to.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn glyph_width(self, ch: char) -> u16 {
        let table = match self {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        };
        (ch as u32)
            .checked_sub(FIRST_CHAR)
            .and_then(|index| table.get(index as usize))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// Rendered width of `text` in millimetres at `size_pt`.
    pub fn string_width_mm(self, text: &str, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.glyph_width(ch))).sum();
        units as f32 * size_pt / 1000.0 / POINTS_PER_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "a" is 556 units; at 1000pt that is 556pt
        let mm = Font::Helvetica.string_width_mm("a", 1000.0);
        assert!((mm - 556.0 / POINTS_PER_MM).abs() < 0.01);
        assert!(
            Font::HelveticaBold.string_width_mm("Title", 12.0)
                > Font::Helvetica.string_width_mm("Title", 12.0)
        );
    }

    #[test]
    fn test_width_is_additive() {
        let font = Font::Helvetica;
        let whole = font.string_width_mm("hello world", 12.0);
        let parts = font.string_width_mm("hello", 12.0)
            + font.string_width_mm(" ", 12.0)
            + font.string_width_mm("world", 12.0);
        assert!((whole - parts).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let width = Font::Helvetica.string_width_mm("é", 10.0);
        assert!((width - 10.0 / POINTS_PER_MM).abs() < 1e-4);
    }
}
