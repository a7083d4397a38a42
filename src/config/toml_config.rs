use crate::adapters::report_pdf::ReportLayout;
use crate::adapters::t5::GenerationOptions;
use crate::domain::model::LengthBounds;
use crate::domain::ports::ConfigProvider;
use crate::domain::services::analysis::{
    DEFAULT_BENEFIT_KEYWORDS, DEFAULT_LOOPHOLE_KEYWORDS, DEFAULT_MAX_ITEMS,
};
use crate::domain::services::key_phrases::DEFAULT_MAX_PHRASES;
use crate::utils::error::{DigestError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub summarizer: SummarizerConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: "input".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub write_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            write_json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// Abstractive summaries from a T5 checkpoint
    T5,
    /// Highest-scoring sentences from the document itself
    Extractive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub backend: SummarizerBackend,
    pub model_dir: String,
    pub min_length: usize,
    pub max_length: usize,
    pub generation: GenerationOptions,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        let bounds = LengthBounds::default();
        Self {
            backend: SummarizerBackend::T5,
            model_dir: "models/t5-small".to_string(),
            min_length: bounds.min_length,
            max_length: bounds.max_length,
            generation: GenerationOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub max_items: usize,
    pub max_phrases: usize,
    pub loophole_keywords: Vec<String>,
    pub benefit_keywords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_phrases: DEFAULT_MAX_PHRASES,
            loophole_keywords: DEFAULT_LOOPHOLE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            benefit_keywords: DEFAULT_BENEFIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl DigestConfig {
    /// Loads a TOML file; missing sections fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written so the error surfaces in validation.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.dir", &self.input.dir)?;
        validation::validate_path("output.dir", &self.output.dir)?;

        validation::validate_length_bounds(
            "summarizer",
            self.summarizer.min_length,
            self.summarizer.max_length,
        )?;
        if self.summarizer.backend == SummarizerBackend::T5 {
            validation::validate_path("summarizer.model_dir", &self.summarizer.model_dir)?;
            let generation = &self.summarizer.generation;
            validation::validate_positive_number(
                "summarizer.generation.max_input_tokens",
                generation.max_input_tokens,
                2,
            )?;
            validation::validate_positive_number(
                "summarizer.generation.num_beams",
                generation.num_beams,
                1,
            )?;
            validation::validate_range(
                "summarizer.generation.length_penalty",
                generation.length_penalty,
                0.0,
                5.0,
            )?;
            validation::validate_range(
                "summarizer.generation.repeat_penalty",
                generation.repeat_penalty,
                1.0,
                5.0,
            )?;
        }

        validation::validate_positive_number("analysis.max_items", self.analysis.max_items, 1)?;
        validation::validate_positive_number(
            "analysis.max_phrases",
            self.analysis.max_phrases,
            1,
        )?;
        for keyword in self
            .analysis
            .loophole_keywords
            .iter()
            .chain(&self.analysis.benefit_keywords)
        {
            validation::validate_non_empty_string("analysis.keywords", keyword)?;
        }

        let report = &self.report;
        validation::validate_non_empty_string("report.title", &report.title)?;
        validation::validate_range("report.side_margin_mm", report.side_margin_mm, 0.0, 80.0)?;
        validation::validate_range("report.top_margin_mm", report.top_margin_mm, 0.0, 100.0)?;
        validation::validate_range(
            "report.bottom_margin_mm",
            report.bottom_margin_mm,
            0.0,
            100.0,
        )?;
        for (field, size) in [
            ("report.title_size", report.title_size),
            ("report.heading_size", report.heading_size),
            ("report.body_size", report.body_size),
        ] {
            validation::validate_range(field, size, 6.0, 36.0)?;
        }
        if report.line_height_mm <= 0.0 {
            return Err(DigestError::InvalidConfigValueError {
                field: "report.line_height_mm".to_string(),
                value: report.line_height_mm.to_string(),
                reason: "Line height must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for DigestConfig {
    fn input_dir(&self) -> &str {
        &self.input.dir
    }

    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn length_bounds(&self) -> LengthBounds {
        LengthBounds {
            min_length: self.summarizer.min_length,
            max_length: self.summarizer.max_length,
        }
    }

    fn max_items(&self) -> usize {
        self.analysis.max_items
    }

    fn max_phrases(&self) -> usize {
        self.analysis.max_phrases
    }

    fn loophole_keywords(&self) -> Vec<String> {
        self.analysis.loophole_keywords.clone()
    }

    fn benefit_keywords(&self) -> Vec<String> {
        self.analysis.benefit_keywords.clone()
    }

    fn write_json(&self) -> bool {
        self.output.write_json
    }
}

impl Validate for DigestConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
