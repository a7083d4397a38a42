use clap::Parser;
use legal_digest::core::{ConfigProvider, Storage, Summarizer};
use legal_digest::utils::{logger, validation::Validate};
use legal_digest::{
    CliConfig, DigestConfig, DigestEngine, DigestError, DigestPipeline, ExtractiveSummarizer,
    LocalStorage, PdfReportRenderer, SummarizerBackend, T5Summarizer,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting legal-digest");
    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), DigestError> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    let source = LocalStorage::new(config.input_dir().to_string());
    let sink = LocalStorage::new(config.output_dir().to_string());

    if cli.dry_run {
        return dry_run(&config, &source).await;
    }

    let summarizer = build_summarizer(&config)?;
    let renderer = PdfReportRenderer::new(config.report.clone());
    let pipeline = DigestPipeline::new(source, sink, config, summarizer).with_renderer(renderer);
    let engine = DigestEngine::new_with_monitoring(pipeline, cli.monitor);

    let batch = engine.run().await?;
    if batch.is_empty() {
        println!("No PDF documents found in the input directory.");
        return Ok(());
    }

    for report in &batch.reports {
        println!("✅ Report generated: {}", report);
    }
    for skipped in &batch.skipped {
        println!("⚠️  Skipped {}: {}", skipped.file_name, skipped.reason);
    }
    println!(
        "📁 {} of {} documents summarized",
        batch.reports.len(),
        batch.total()
    );
    Ok(())
}

fn build_summarizer(config: &DigestConfig) -> Result<Box<dyn Summarizer>, DigestError> {
    match config.summarizer.backend {
        SummarizerBackend::T5 => {
            let model_dir = Path::new(&config.summarizer.model_dir);
            let summarizer = T5Summarizer::load(model_dir, config.summarizer.generation.clone())?;
            Ok(Box::new(summarizer))
        }
        SummarizerBackend::Extractive => Ok(Box::new(ExtractiveSummarizer::new())),
    }
}

async fn dry_run(config: &DigestConfig, source: &LocalStorage) -> Result<(), DigestError> {
    tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
    let files = source.list_files("pdf").await?;

    println!("📋 Input:   {}", config.input_dir());
    println!("📋 Output:  {}", config.output_dir());
    println!(
        "📋 Backend: {:?} (length {}..={})",
        config.summarizer.backend, config.summarizer.min_length, config.summarizer.max_length
    );
    if files.is_empty() {
        println!("No PDF documents found in the input directory.");
    }
    for file in files {
        println!(
            "  {} -> {}",
            file,
            legal_digest::adapters::report_pdf::report_file_name(&file)
        );
    }
    Ok(())
}
