use crate::adapters::pdf::PdfTextExtractor;
use crate::adapters::report_pdf::{digest_file_name, report_file_name, PdfReportRenderer};
use crate::core::{
    ConfigProvider, DocumentDigest, ExtractedFile, Pipeline, ReportRenderer, SourceDocument,
    Storage, Summarizer,
};
use crate::domain::services::{extract_key_phrases, preprocess_text, Analyzer};
use crate::utils::error::{DigestError, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// Reads `*.pdf` from the source storage and writes one report per document
/// to the sink storage. Summarization runs on tokio's blocking pool.
pub struct DigestPipeline<S: Storage, C: ConfigProvider, Z: Summarizer + 'static> {
    source: S,
    sink: S,
    config: C,
    summarizer: Arc<Z>,
    extractor: PdfTextExtractor,
    analyzer: Analyzer,
    renderer: PdfReportRenderer,
    report_date: Option<NaiveDate>,
}

impl<S: Storage, C: ConfigProvider, Z: Summarizer + 'static> DigestPipeline<S, C, Z> {
    pub fn new(source: S, sink: S, config: C, summarizer: Z) -> Self {
        let analyzer = Analyzer::new(
            config.loophole_keywords(),
            config.benefit_keywords(),
            config.max_items(),
        );
        Self {
            source,
            sink,
            config,
            summarizer: Arc::new(summarizer),
            extractor: PdfTextExtractor::new(),
            analyzer,
            renderer: PdfReportRenderer::default(),
            report_date: None,
        }
    }

    pub fn with_renderer(mut self, renderer: PdfReportRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Stamps reports with a fixed date instead of today's.
    pub fn with_report_date(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }

    async fn read_document(&self, file_name: &str) -> Result<SourceDocument> {
        let bytes = self.source.read_file(file_name).await?;
        let text = self.extractor.extract(file_name, &bytes)?;
        tracing::debug!("Extracted {} chars from {}", text.len(), file_name);
        Ok(SourceDocument {
            file_name: file_name.to_string(),
            text,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, Z: Summarizer + 'static> Pipeline
    for DigestPipeline<S, C, Z>
{
    async fn extract(&self) -> Result<Vec<ExtractedFile>> {
        let names = self.source.list_files("pdf").await?;
        tracing::debug!(
            "Found {} PDF files in {}",
            names.len(),
            self.config.input_dir()
        );

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            let document = self.read_document(&name).await;
            files.push((name, document));
        }
        Ok(files)
    }

    async fn transform(&self, document: SourceDocument) -> Result<DocumentDigest> {
        let processed = preprocess_text(&document.text);
        if processed.is_empty() {
            return Err(DigestError::EmptyDocument {
                file: document.file_name,
            });
        }

        tracing::info!("Generating summary with the {} backend...", self.summarizer.name());
        let summarizer = Arc::clone(&self.summarizer);
        let bounds = self.config.length_bounds();
        let text = processed.clone();
        let summary = tokio::task::spawn_blocking(move || summarizer.summarize(&text, bounds))
            .await
            .map_err(|e| DigestError::SummarizationError {
                message: format!("summarizer task failed: {}", e),
            })??;
        if summary.trim().is_empty() {
            return Err(DigestError::SummarizationError {
                message: format!("empty summary for {}", document.file_name),
            });
        }

        tracing::info!("Analyzing text for loopholes and benefits...");
        let analysis = self.analyzer.detect_loopholes_and_benefits(&processed);

        tracing::info!("Extracting key phrases...");
        let key_phrases = extract_key_phrases(&processed, self.config.max_phrases());

        Ok(DocumentDigest {
            file_name: document.file_name,
            summary,
            analysis,
            key_phrases,
            generated_on: self
                .report_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        })
    }

    async fn load(&self, digest: DocumentDigest) -> Result<String> {
        tracing::info!("Generating PDF report...");
        let report = self.renderer.render(&digest)?;
        let report_name = report_file_name(&digest.file_name);

        tracing::debug!("Writing {} ({} bytes)", report_name, report.len());
        self.sink.write_file(&report_name, &report).await?;

        if self.config.write_json() {
            let json_name = digest_file_name(&digest.file_name);
            let json = serde_json::to_vec_pretty(&digest)?;
            self.sink.write_file(&json_name, &json).await?;
            tracing::debug!("Wrote {}", json_name);
        }

        Ok(self.sink.location(&report_name).display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::report_pdf::PdfWriter;
    use crate::domain::model::{Analysis, LengthBounds};
    use crate::domain::services::analysis::{DEFAULT_BENEFIT_KEYWORDS, DEFAULT_LOOPHOLE_KEYWORDS};
    use crate::domain::services::metrics::Font;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        root: String,
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new(root: &str) -> Self {
            Self {
                root: root.to_string(),
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: Vec<u8>) {
            self.files.lock().await.insert(path.to_string(), data);
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn list_files(&self, extension: &str) -> Result<Vec<String>> {
            let files = self.files.lock().await;
            let suffix = format!(".{}", extension.to_lowercase());
            let mut names: Vec<String> = files
                .keys()
                .filter(|name| name.to_lowercase().ends_with(&suffix))
                .cloned()
                .collect();
            names.sort();
            Ok(names)
        }

        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DigestError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> PathBuf {
            PathBuf::from(&self.root).join(path)
        }
    }

    struct MockConfig {
        write_json: bool,
    }

    impl ConfigProvider for MockConfig {
        fn input_dir(&self) -> &str {
            "in"
        }

        fn output_dir(&self) -> &str {
            "out"
        }

        fn length_bounds(&self) -> LengthBounds {
            LengthBounds {
                min_length: 3,
                max_length: 10,
            }
        }

        fn max_items(&self) -> usize {
            5
        }

        fn max_phrases(&self) -> usize {
            5
        }

        fn loophole_keywords(&self) -> Vec<String> {
            DEFAULT_LOOPHOLE_KEYWORDS.iter().map(|k| k.to_string()).collect()
        }

        fn benefit_keywords(&self) -> Vec<String> {
            DEFAULT_BENEFIT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        }

        fn write_json(&self) -> bool {
            self.write_json
        }
    }

    /// Returns the first `max_length` words it was given.
    struct EchoSummarizer;

    impl Summarizer for EchoSummarizer {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
            Ok(text
                .split_whitespace()
                .take(bounds.max_length)
                .collect::<Vec<_>>()
                .join(" "))
        }
    }

    /// Records the thread it was called on.
    struct ThreadRecordingSummarizer {
        thread: Arc<std::sync::Mutex<Option<std::thread::ThreadId>>>,
    }

    impl Summarizer for ThreadRecordingSummarizer {
        fn name(&self) -> &'static str {
            "thread-recording"
        }

        fn summarize(&self, text: &str, _bounds: LengthBounds) -> Result<String> {
            *self.thread.lock().unwrap() = Some(std::thread::current().id());
            Ok(text.to_string())
        }
    }

    struct PanickingSummarizer;

    impl Summarizer for PanickingSummarizer {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String> {
            panic!("decoder crashed")
        }
    }

    fn lease_document() -> SourceDocument {
        SourceDocument {
            file_name: "lease.pdf".to_string(),
            text: "The Tenant shall pay the monthly rent.".to_string(),
        }
    }

    fn pdf_with(lines: &[&str]) -> Vec<u8> {
        let mut writer = PdfWriter::a4();
        for line in lines {
            writer.text_line(line, Font::Helvetica, 12.0, 8.0);
        }
        writer.finish().unwrap()
    }

    fn build_pipeline(
        write_json: bool,
    ) -> (
        DigestPipeline<MockStorage, MockConfig, EchoSummarizer>,
        MockStorage,
        MockStorage,
    ) {
        let source = MockStorage::new("in");
        let sink = MockStorage::new("out");
        let pipeline = DigestPipeline::new(
            source.clone(),
            sink.clone(),
            MockConfig { write_json },
            EchoSummarizer,
        )
        .with_report_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        (pipeline, source, sink)
    }

    #[tokio::test]
    async fn test_extract_reads_pdfs_and_reports_failures() {
        let (pipeline, source, _) = build_pipeline(false);
        source
            .put("lease.pdf", pdf_with(&["The Tenant shall pay rent monthly."]))
            .await;
        source.put("fake.pdf", b"just text".to_vec()).await;
        source.put("notes.txt", b"ignored".to_vec()).await;

        let files = pipeline.extract().await.unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].0, "fake.pdf");
        assert!(matches!(files[0].1, Err(DigestError::InvalidPdf { .. })));
        assert_eq!(files[1].0, "lease.pdf");
        let document = files[1].1.as_ref().unwrap();
        assert!(document.text.contains("Tenant shall pay"));
    }

    #[tokio::test]
    async fn test_transform_builds_digest() {
        let (pipeline, _, _) = build_pipeline(false);
        let document = SourceDocument {
            file_name: "lease.pdf".to_string(),
            text: "The Tenant SHALL pay the monthly rent.  Pets are banned unless approved."
                .to_string(),
        };

        let digest = pipeline.transform(document).await.unwrap();

        assert_eq!(digest.file_name, "lease.pdf");
        assert_eq!(
            digest.summary,
            "the tenant shall pay the monthly rent. pets are banned"
        );
        assert_eq!(
            digest.analysis,
            Analysis {
                loopholes: vec!["pets are banned unless approved.".to_string()],
                benefits: vec!["the tenant shall pay the monthly rent.".to_string()],
            }
        );
        assert_eq!(digest.key_phrases, vec!["the tenant", "the monthly rent"]);
        assert_eq!(digest.generated_on, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[tokio::test]
    async fn test_summarizer_runs_off_the_async_thread() {
        let thread = Arc::new(std::sync::Mutex::new(None));
        let summarizer = ThreadRecordingSummarizer {
            thread: Arc::clone(&thread),
        };
        let pipeline = DigestPipeline::new(
            MockStorage::new("in"),
            MockStorage::new("out"),
            MockConfig { write_json: false },
            summarizer,
        );

        let digest = pipeline.transform(lease_document()).await.unwrap();

        assert_eq!(digest.summary, "the tenant shall pay the monthly rent.");
        let summarizer_thread = (*thread.lock().unwrap()).expect("summarizer was called");
        assert_ne!(summarizer_thread, std::thread::current().id());
    }

    #[tokio::test]
    async fn test_summarizer_panic_becomes_an_error() {
        let pipeline = DigestPipeline::new(
            MockStorage::new("in"),
            MockStorage::new("out"),
            MockConfig { write_json: false },
            PanickingSummarizer,
        );

        let err = pipeline.transform(lease_document()).await.unwrap_err();
        assert!(matches!(err, DigestError::SummarizationError { .. }));
    }

    #[tokio::test]
    async fn test_transform_rejects_text_without_words() {
        let (pipeline, _, _) = build_pipeline(false);
        let document = SourceDocument {
            file_name: "symbols.pdf".to_string(),
            text: "§§ — ***".to_string(),
        };
        let err = pipeline.transform(document).await.unwrap_err();
        assert!(matches!(err, DigestError::EmptyDocument { .. }));
    }

    #[tokio::test]
    async fn test_load_writes_report_and_optional_json() {
        let digest = DocumentDigest {
            file_name: "nda.pdf".to_string(),
            summary: "the parties keep secrets.".to_string(),
            analysis: Analysis::default(),
            key_phrases: vec![],
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };

        let (pipeline, _, sink) = build_pipeline(false);
        let path = pipeline.load(digest.clone()).await.unwrap();
        assert_eq!(PathBuf::from(path), PathBuf::from("out").join("summary_nda.pdf"));
        let report = sink.get_file("summary_nda.pdf").await.unwrap();
        assert!(report.starts_with(b"%PDF"));
        assert!(sink.get_file("summary_nda.json").await.is_none());

        let (pipeline, _, sink) = build_pipeline(true);
        pipeline.load(digest.clone()).await.unwrap();
        let json = sink.get_file("summary_nda.json").await.unwrap();
        let parsed: DocumentDigest = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, digest);
    }
}
