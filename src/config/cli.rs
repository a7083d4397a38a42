use crate::config::toml_config::{DigestConfig, SummarizerBackend};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "legal-digest")]
#[command(about = "Summarize legal PDFs into plain-language PDF reports")]
pub struct CliConfig {
    /// TOML configuration file; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Folder scanned for *.pdf files
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Folder the summary_<name>.pdf reports are written to
    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long, value_enum)]
    pub backend: Option<SummarizerBackend>,

    /// Directory with config.json, tokenizer.json and model.safetensors
    #[arg(long)]
    pub model_dir: Option<String>,

    #[arg(long)]
    pub min_length: Option<usize>,

    #[arg(long)]
    pub max_length: Option<usize>,

    /// Also write summary_<name>.json next to each report
    #[arg(long)]
    pub json: bool,

    /// List the files that would be processed and exit
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> Result<DigestConfig> {
        let mut config = match &self.config {
            Some(path) => DigestConfig::from_file(path)?,
            None => DigestConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input.dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(backend) = self.backend {
            config.summarizer.backend = backend;
        }
        if let Some(dir) = &self.model_dir {
            config.summarizer.model_dir = dir.clone();
        }
        if let Some(min) = self.min_length {
            config.summarizer.min_length = min;
        }
        if let Some(max) = self.max_length {
            config.summarizer.max_length = max;
        }
        if self.json {
            config.output.write_json = true;
        }

        Ok(config)
    }
}
