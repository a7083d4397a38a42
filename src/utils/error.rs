use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("PDF text extraction failed: {message}")]
    ExtractionError { message: String },

    #[error("Not a PDF file: {file}")]
    InvalidPdf { file: String },

    #[error("No text could be extracted from {file}")]
    EmptyDocument { file: String },

    #[error("Model error: {0}")]
    ModelError(#[from] candle_core::Error),

    #[error("Tokenizer error: {message}")]
    TokenizerError { message: String },

    #[error("Summarization failed: {message}")]
    SummarizationError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Model,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DigestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DigestError::ConfigValidationError { .. }
            | DigestError::InvalidConfigValueError { .. }
            | DigestError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DigestError::PdfError(_)
            | DigestError::ExtractionError { .. }
            | DigestError::InvalidPdf { .. }
            | DigestError::EmptyDocument { .. } => ErrorCategory::Input,
            DigestError::ModelError(_)
            | DigestError::TokenizerError { .. }
            | DigestError::SummarizationError { .. } => ErrorCategory::Model,
            DigestError::SerializationError(_) => ErrorCategory::Output,
            DigestError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Model | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DigestError::InvalidPdf { .. } => {
                "Only files with a valid PDF header are processed; remove or fix the file".to_string()
            }
            DigestError::EmptyDocument { .. } | DigestError::ExtractionError { .. } => {
                "The PDF probably has no embedded text (scanned image); run OCR first".to_string()
            }
            DigestError::PdfError(_) => "The PDF structure looks damaged; try re-saving it".to_string(),
            DigestError::ModelError(_) | DigestError::TokenizerError { .. } => {
                "Check that the model directory holds config.json, tokenizer.json and model.safetensors"
                    .to_string()
            }
            DigestError::SummarizationError { .. } => {
                "Try the extractive backend or relax the summary length bounds".to_string()
            }
            DigestError::ConfigValidationError { field, .. }
            | DigestError::InvalidConfigValueError { field, .. }
            | DigestError::MissingConfigError { field } => {
                format!("Fix the '{}' setting in the config file or on the command line", field)
            }
            DigestError::IoError(_) => {
                "Check that the input and output directories exist and are accessible".to_string()
            }
            DigestError::SerializationError(_) => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read document: {}", self),
            ErrorCategory::Model => format!("Summarizer problem: {}", self),
            ErrorCategory::Output => format!("Could not write report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

impl From<tokenizers::Error> for DigestError {
    fn from(err: tokenizers::Error) -> Self {
        DigestError::TokenizerError {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DigestError {
    fn from(err: toml::de::Error) -> Self {
        DigestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
