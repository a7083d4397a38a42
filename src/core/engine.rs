use crate::core::{BatchReport, Pipeline, SkippedFile, SourceDocument};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a [`Pipeline`] over every input file, one document at a time.
/// A document that fails at any stage is logged and skipped; only failing to
/// list the input aborts the batch.
pub struct DigestEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> DigestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<BatchReport> {
        tracing::info!("Processing PDF documents...");
        self.monitor.log_stats("Start");

        let files = self.pipeline.extract().await?;
        let mut batch = BatchReport::default();
        if files.is_empty() {
            tracing::warn!("No PDF documents found in the input directory.");
            return Ok(batch);
        }

        for (file_name, extracted) in files {
            tracing::info!("Processing: {}", file_name);

            let outcome = match extracted {
                Ok(document) => self.process(document).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(report_path) => {
                    tracing::info!("✅ Report generated: {}", report_path);
                    batch.reports.push(report_path);
                }
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Skipping {}: {} ({:?})",
                        file_name,
                        e,
                        e.category()
                    );
                    tracing::debug!("💡 {}", e.recovery_suggestion());
                    batch.skipped.push(SkippedFile {
                        file_name: file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            self.monitor.log_stats(&file_name);
        }

        tracing::info!(
            "Finished: {} reports written, {} files skipped",
            batch.reports.len(),
            batch.skipped.len()
        );
        self.monitor.log_final_stats();
        Ok(batch)
    }

    async fn process(&self, document: SourceDocument) -> Result<String> {
        let digest = self.pipeline.transform(document).await?;
        self.pipeline.load(digest).await
    }
}
