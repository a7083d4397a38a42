pub mod analysis;
pub mod extractive;
pub mod key_phrases;
pub mod metrics;
pub mod preprocess;
pub mod sentences;
pub mod simplify;
pub mod wrap;

pub use analysis::Analyzer;
pub use extractive::ExtractiveSummarizer;
pub use key_phrases::extract_key_phrases;
pub use preprocess::preprocess_text;
pub use sentences::split_sentences;
pub use simplify::simplify_text;
pub use wrap::wrap_text;
