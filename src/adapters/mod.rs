// Adapters layer: concrete implementations of the domain ports for the local
// filesystem, PDF input/output and the summarization model.

pub mod pdf;
pub mod report_pdf;
pub mod storage;
pub mod t5;

pub use pdf::PdfTextExtractor;
pub use report_pdf::PdfReportRenderer;
pub use storage::LocalStorage;
pub use t5::T5Summarizer;
