use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text pulled out of one input PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub file_name: String,
    pub text: String,
}

/// Sentences flagged by keyword heuristics, already simplified and clipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub loopholes: Vec<String>,
    pub benefits: Vec<String>,
}

/// Everything a report is rendered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDigest {
    pub file_name: String,
    pub summary: String,
    pub analysis: Analysis,
    pub key_phrases: Vec<String>,
    pub generated_on: NaiveDate,
}

/// Summary length limits. Units are model tokens for the abstractive
/// backend and words for the extractive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min_length: 40,
            max_length: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub reports: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.reports.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
