pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{
    Analysis, BatchReport, DocumentDigest, LengthBounds, SkippedFile, SourceDocument,
};
pub use crate::domain::ports::{
    ConfigProvider, ExtractedFile, Pipeline, ReportRenderer, Storage, Summarizer,
};
pub use crate::utils::error::Result;
