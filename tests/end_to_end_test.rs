use legal_digest::adapters::report_pdf::PdfWriter;
use legal_digest::domain::services::metrics::Font;
use legal_digest::{
    DigestConfig, DigestEngine, DigestPipeline, DocumentDigest, ExtractiveSummarizer,
    LocalStorage, PdfTextExtractor, SummarizerBackend,
};
use std::path::Path;
use tempfile::TempDir;

const LEASE: &[&str] = &[
    "This lease agreement is made between the Landlord and the Tenant.",
    "The Tenant shall pay the monthly rent on the first day of each month.",
    "The Landlord may terminate this lease if the rent is late by thirty days.",
    "The Tenant has the right to a refund of the security deposit at the end of the term.",
    "Pets are not allowed on the premises unless the Landlord gives written consent.",
    "Notwithstanding the foregoing, the Landlord is not liable for damage caused by floods.",
];

fn write_pdf(dir: &Path, name: &str, lines: &[&str]) {
    let mut writer = PdfWriter::a4();
    for line in lines {
        writer.text_line(line, Font::Helvetica, 11.0, 6.0);
    }
    std::fs::write(dir.join(name), writer.finish().unwrap()).unwrap();
}

fn extractive_config(input: &Path, output: &Path, write_json: bool) -> DigestConfig {
    let mut config = DigestConfig::default();
    config.input.dir = input.to_str().unwrap().to_string();
    config.output.dir = output.to_str().unwrap().to_string();
    config.output.write_json = write_json;
    config.summarizer.backend = SummarizerBackend::Extractive;
    config.summarizer.min_length = 10;
    config.summarizer.max_length = 60;
    config
}

fn engine_for(
    config: DigestConfig,
) -> DigestEngine<DigestPipeline<LocalStorage, DigestConfig, ExtractiveSummarizer>> {
    let source = LocalStorage::new(config.input.dir.clone());
    let sink = LocalStorage::new(config.output.dir.clone());
    let pipeline = DigestPipeline::new(source, sink, config, ExtractiveSummarizer::new());
    DigestEngine::new(pipeline)
}

#[tokio::test]
async fn test_batch_writes_one_report_per_pdf() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_pdf(input.path(), "lease.pdf", LEASE);
    write_pdf(input.path(), "addendum.PDF", &LEASE[1..4]);
    std::fs::write(input.path().join("readme.txt"), "not a pdf")?;

    let engine = engine_for(extractive_config(input.path(), output.path(), false));
    let batch = engine.run().await?;

    assert_eq!(batch.reports.len(), 2);
    assert!(batch.skipped.is_empty());
    for name in ["summary_lease.pdf", "summary_addendum.pdf"] {
        let report = std::fs::read(output.path().join(name))?;
        assert!(report.starts_with(b"%PDF"));
    }
    assert!(!output.path().join("summary_readme.pdf").exists());
    Ok(())
}

#[tokio::test]
async fn test_report_contains_sections_and_findings() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_pdf(input.path(), "lease.pdf", LEASE);

    let engine = engine_for(extractive_config(input.path(), output.path(), false));
    engine.run().await?;

    let report = std::fs::read(output.path().join("summary_lease.pdf"))?;
    let text = PdfTextExtractor::new().extract("summary_lease.pdf", &report)?;
    for heading in [
        "Simple Document Summary",
        "File Name: lease.pdf",
        "What This Document Says:",
        "Important Points:",
        "Watch Out For These:",
        "Good Things to Know:",
    ] {
        assert!(text.contains(heading), "missing {heading:?} in {text:?}");
    }
    assert!(text.contains("despite"));
    Ok(())
}

#[tokio::test]
async fn test_broken_and_empty_pdfs_are_skipped() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_pdf(input.path(), "good.pdf", LEASE);
    write_pdf(input.path(), "blank.pdf", &[]);
    std::fs::write(input.path().join("broken.pdf"), b"this is not a pdf")?;

    let engine = engine_for(extractive_config(input.path(), output.path(), false));
    let batch = engine.run().await?;

    assert_eq!(batch.total(), 3);
    assert_eq!(batch.reports.len(), 1);
    let mut skipped: Vec<&str> = batch.skipped.iter().map(|s| s.file_name.as_str()).collect();
    skipped.sort();
    assert_eq!(skipped, vec!["blank.pdf", "broken.pdf"]);
    assert!(output.path().join("summary_good.pdf").exists());
    assert!(!output.path().join("summary_broken.pdf").exists());
    Ok(())
}

#[tokio::test]
async fn test_json_digest_is_written_when_enabled() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_pdf(input.path(), "lease.pdf", LEASE);

    let engine = engine_for(extractive_config(input.path(), output.path(), true));
    engine.run().await?;

    let json = std::fs::read(output.path().join("summary_lease.json"))?;
    let digest: DocumentDigest = serde_json::from_slice(&json)?;
    assert_eq!(digest.file_name, "lease.pdf");
    assert!(!digest.summary.is_empty());
    assert!(digest.summary.split_whitespace().count() <= 60);
    assert!(digest.analysis.loopholes.len() <= 5);
    assert!(digest
        .analysis
        .benefits
        .iter()
        .any(|b| b.contains("refund")));
    Ok(())
}

#[tokio::test]
async fn test_empty_input_directory_produces_nothing() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;

    let engine = engine_for(extractive_config(input.path(), output.path(), false));
    let batch = engine.run().await?;

    assert!(batch.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_input_directory_fails_the_batch() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("does-not-exist");

    let engine = engine_for(extractive_config(&missing, output.path(), false));
    assert!(engine.run().await.is_err());
}
