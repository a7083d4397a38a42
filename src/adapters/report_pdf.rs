use crate::domain::model::DocumentDigest;
use crate::domain::ports::ReportRenderer;
use crate::domain::services::metrics::Font;
use crate::domain::services::wrap_text;
use crate::utils::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use serde::{Deserialize, Serialize};

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Page geometry and typography for the summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub title: String,
    pub side_margin_mm: f32,
    pub top_margin_mm: f32,
    pub bottom_margin_mm: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub line_height_mm: f32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title: "Simple Document Summary".to_string(),
            side_margin_mm: 25.0,
            top_margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            title_size: 18.0,
            heading_size: 14.0,
            body_size: 12.0,
            line_height_mm: 8.0,
        }
    }
}

impl ReportLayout {
    /// Usable line width between the side margins.
    pub fn content_width_mm(&self) -> f32 {
        A4_WIDTH_MM - 2.0 * self.side_margin_mm
    }
}

/// Minimal single-column PDF writer: lines of text flow top to bottom and a
/// new page starts whenever the next line would cross the bottom margin.
/// Coordinates are millimetres from the top-left corner.
pub struct PdfWriter {
    left_margin: f32,
    right_margin: f32,
    top_margin: f32,
    bottom_margin: f32,
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl PdfWriter {
    pub fn a4() -> Self {
        Self::with_margins(10.0, 10.0, 10.0, 20.0)
    }

    pub fn with_margins(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left_margin: left,
            right_margin: right,
            top_margin: top,
            bottom_margin: bottom,
            pages: Vec::new(),
            y: top,
        }
    }

    pub fn content_width(&self) -> f32 {
        A4_WIDTH_MM - self.left_margin - self.right_margin
    }

    pub fn page_count(&self) -> usize {
        self.pages.len().max(1)
    }

    /// Vertical gap before the next line.
    pub fn gap(&mut self, height: f32) {
        self.y += height;
    }

    pub fn text_line(&mut self, text: &str, font: Font, size: f32, line_height: f32) {
        self.place(text, font, size, line_height, self.left_margin);
    }

    pub fn centered_line(&mut self, text: &str, font: Font, size: f32, line_height: f32) {
        let width = font.string_width_mm(text, size);
        let x = self.left_margin + (self.content_width() - width).max(0.0) / 2.0;
        self.place(text, font, size, line_height, x);
    }

    fn place(&mut self, text: &str, font: Font, size: f32, line_height: f32, x: f32) {
        if self.pages.is_empty() || self.y + line_height > A4_HEIGHT_MM - self.bottom_margin {
            self.pages.push(Vec::new());
            self.y = self.top_margin;
        }

        // Baseline sits a little below the middle of the line box.
        let baseline = self.y + 0.5 * line_height + 0.3 * size / POINTS_PER_MM;
        let operations = [
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            ),
            Operation::new(
                "Td",
                vec![
                    (x * POINTS_PER_MM).into(),
                    ((A4_HEIGHT_MM - baseline) * POINTS_PER_MM).into(),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(operations);
        }
        self.y += line_height;
    }

    /// Serializes all pages into a PDF file.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary(Font::Helvetica));
        let bold_id = doc.add_object(font_dictionary(Font::HelveticaBold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Helvetica.resource_name() => regular_id,
                Font::HelveticaBold.resource_name() => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                (A4_WIDTH_MM * POINTS_PER_MM).into(),
                (A4_HEIGHT_MM * POINTS_PER_MM).into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn font_dictionary(font: Font) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Maps text onto WinAnsi (CP-1252) bytes; characters the base fonts cannot
/// show become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{A0}'..='\u{FF}' => ch as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Renders a [`DocumentDigest`] into the fixed plain-language report.
#[derive(Debug, Clone, Default)]
pub struct PdfReportRenderer {
    layout: ReportLayout,
}

impl PdfReportRenderer {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Lines a body paragraph wraps into at the report's width.
    pub fn wrap_body(&self, text: &str) -> Vec<String> {
        let size = self.layout.body_size;
        wrap_text(text, self.layout.content_width_mm(), |line| {
            Font::Helvetica.string_width_mm(line, size)
        })
    }

    fn heading(&self, writer: &mut PdfWriter, text: &str) {
        writer.text_line(text, Font::HelveticaBold, self.layout.heading_size, 10.0);
        writer.gap(5.0);
    }

    fn bullet_list(&self, writer: &mut PdfWriter, items: &[String]) {
        for item in items {
            for line in self.wrap_body(&format!("- {}", item)) {
                writer.text_line(
                    &line,
                    Font::Helvetica,
                    self.layout.body_size,
                    self.layout.line_height_mm,
                );
            }
            writer.gap(3.0);
        }
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, digest: &DocumentDigest) -> Result<Vec<u8>> {
        let layout = &self.layout;
        let mut writer = PdfWriter::with_margins(
            layout.side_margin_mm,
            layout.side_margin_mm,
            layout.top_margin_mm,
            layout.bottom_margin_mm,
        );

        writer.centered_line(&layout.title, Font::HelveticaBold, layout.title_size, 15.0);
        writer.gap(5.0);

        writer.text_line(
            &format!("File Name: {}", digest.file_name),
            Font::Helvetica,
            layout.body_size,
            10.0,
        );
        writer.text_line(
            &format!("Date: {}", digest.generated_on.format("%B %d, %Y")),
            Font::Helvetica,
            layout.body_size,
            10.0,
        );
        writer.gap(10.0);

        self.heading(&mut writer, "What This Document Says:");
        for line in self.wrap_body(&digest.summary) {
            writer.text_line(&line, Font::Helvetica, layout.body_size, layout.line_height_mm);
        }
        writer.gap(10.0);

        self.heading(&mut writer, "Important Points:");
        self.bullet_list(&mut writer, &digest.key_phrases);
        writer.gap(7.0);

        self.heading(&mut writer, "Watch Out For These:");
        self.bullet_list(&mut writer, &digest.analysis.loopholes);
        writer.gap(7.0);

        self.heading(&mut writer, "Good Things to Know:");
        self.bullet_list(&mut writer, &digest.analysis.benefits);

        tracing::debug!(
            "Rendered report for {} ({} pages)",
            digest.file_name,
            writer.page_count()
        );
        writer.finish()
    }
}

/// `summary_<stem>.pdf` for an input file name.
pub fn report_file_name(input_file: &str) -> String {
    format!("summary_{}.pdf", file_stem(input_file))
}

/// `summary_<stem>.json` for an input file name.
pub fn digest_file_name(input_file: &str) -> String {
    format!("summary_{}.json", file_stem(input_file))
}

fn file_stem(input_file: &str) -> String {
    std::path::Path::new(input_file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.to_string())
}
