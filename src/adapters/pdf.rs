use crate::utils::error::{DigestError, Result};
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};

/// Pulls embedded text out of PDF bytes.
///
/// `pdf-extract` handles font encodings and spacing better, so it runs first.
/// When it fails (or panics, which it does on some malformed fonts) or finds
/// no text, lopdf's page-by-page extraction is used instead.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        if !Self::is_pdf(bytes) {
            return Err(DigestError::InvalidPdf {
                file: file_name.to_string(),
            });
        }

        let text = match Self::extract_with_pdf_extract(bytes) {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!("pdf-extract read {} chars from {}", text.len(), file_name);
                text
            }
            Ok(_) => {
                tracing::debug!("pdf-extract found no text in {}, trying lopdf", file_name);
                Self::extract_with_lopdf(bytes)?
            }
            Err(e) => {
                tracing::warn!("pdf-extract failed on {} ({}), trying lopdf", file_name, e);
                Self::extract_with_lopdf(bytes)?
            }
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(DigestError::EmptyDocument {
                file: file_name.to_string(),
            });
        }
        Ok(text)
    }

    /// Checks the `%PDF` magic bytes.
    pub fn is_pdf(bytes: &[u8]) -> bool {
        bytes.starts_with(b"%PDF")
    }

    fn extract_with_pdf_extract(bytes: &[u8]) -> Result<String> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(DigestError::ExtractionError {
                message: e.to_string(),
            }),
            Err(_) => Err(DigestError::ExtractionError {
                message: "pdf-extract panicked".to_string(),
            }),
        }
    }

    fn extract_with_lopdf(bytes: &[u8]) -> Result<String> {
        let doc = Document::load_mem(bytes)?;
        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            let page_text = doc.extract_text(&[*page_number])?;
            text.push_str(&page_text);
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::report_pdf::PdfWriter;
    use crate::domain::services::metrics::Font;

    fn sample_pdf(lines: &[&str]) -> Vec<u8> {
        let mut writer = PdfWriter::a4();
        for line in lines {
            writer.text_line(line, Font::Helvetica, 12.0, 8.0);
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_is_pdf() {
        assert!(PdfTextExtractor::is_pdf(b"%PDF-1.4"));
        assert!(!PdfTextExtractor::is_pdf(b"Not a PDF"));
        assert!(!PdfTextExtractor::is_pdf(b"%PD"));
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfTextExtractor::new()
            .extract("notes.pdf", b"plain text pretending")
            .unwrap_err();
        assert!(matches!(err, DigestError::InvalidPdf { .. }));
    }

    #[test]
    fn test_extracts_text_from_generated_pdf() {
        let bytes = sample_pdf(&["The Tenant shall pay rent.", "Deposit is refundable."]);
        let text = PdfTextExtractor::new().extract("lease.pdf", &bytes).unwrap();
        assert!(text.contains("Tenant"));
        assert!(text.contains("refundable"));
    }

    #[test]
    fn test_blank_pdf_is_empty_document() {
        let bytes = sample_pdf(&[]);
        let err = PdfTextExtractor::new().extract("blank.pdf", &bytes).unwrap_err();
        assert!(matches!(err, DigestError::EmptyDocument { .. }));
    }

    #[test]
    fn test_truncated_pdf_is_an_error() {
        let err = PdfTextExtractor::new()
            .extract("broken.pdf", b"%PDF-1.5\n1 0 obj\n<<")
            .unwrap_err();
        assert!(!matches!(err, DigestError::InvalidPdf { .. }));
    }
}
