use crate::domain::model::{DocumentDigest, LengthBounds, SourceDocument};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    /// File names (not paths) directly under the storage root that carry
    /// `extension`, compared case-insensitively, sorted by name.
    fn list_files(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self, path: &str) -> PathBuf;
}

pub trait ConfigProvider: Send + Sync {
    fn input_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn length_bounds(&self) -> LengthBounds;
    fn max_items(&self) -> usize;
    fn max_phrases(&self) -> usize;
    fn loophole_keywords(&self) -> Vec<String>;
    fn benefit_keywords(&self) -> Vec<String>;
    fn write_json(&self) -> bool;
}

pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;
}

pub trait ReportRenderer: Send + Sync {
    fn render(&self, digest: &DocumentDigest) -> Result<Vec<u8>>;
}

/// One input file as seen by the extract stage: its name and either its text
/// or the reason it could not be read.
pub type ExtractedFile = (String, Result<SourceDocument>);

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ExtractedFile>>;
    async fn transform(&self, document: SourceDocument) -> Result<DocumentDigest>;
    async fn load(&self, digest: DocumentDigest) -> Result<String>;
}

impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        (**self).summarize(text, bounds)
    }
}
