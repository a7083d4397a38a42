pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{DigestConfig, SummarizerBackend};

pub use crate::adapters::{LocalStorage, PdfReportRenderer, PdfTextExtractor, T5Summarizer};
pub use crate::core::{engine::DigestEngine, pipeline::DigestPipeline};
pub use crate::domain::model::{BatchReport, DocumentDigest, LengthBounds};
pub use crate::domain::services::ExtractiveSummarizer;
pub use crate::utils::error::{DigestError, Result};
