use crate::domain::model::LengthBounds;
use crate::domain::ports::Summarizer;
use crate::utils::error::{DigestError, Result};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use candle_transformers::utils::apply_repeat_penalty;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokenizers::Tokenizer;

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Task prefix the model was fine-tuned with.
    pub prefix: String,
    /// Longer inputs are cut to this many tokens (EOS included).
    pub max_input_tokens: usize,
    /// Beam width; 1 decodes greedily.
    pub num_beams: usize,
    /// Exponent on the hypothesis length when ranking finished beams.
    /// Values above 1 favour longer summaries.
    pub length_penalty: f32,
    pub repeat_penalty: f32,
    /// How many recent output tokens the repeat penalty looks at.
    pub repeat_last_n: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            prefix: "summarize: ".to_string(),
            max_input_tokens: 1024,
            num_beams: 4,
            length_penalty: 2.0,
            repeat_penalty: 1.2,
            repeat_last_n: 64,
        }
    }
}

/// Abstractive summarizer backed by a T5-family checkpoint on the CPU.
///
/// The model directory must hold `config.json`, `tokenizer.json` and
/// `model.safetensors`.
pub struct T5Summarizer {
    generator: T5Generator,
    tokenizer: Tokenizer,
}

impl T5Summarizer {
    pub fn load(model_dir: &Path, options: GenerationOptions) -> Result<Self> {
        let config_path = required_file(model_dir, CONFIG_FILE)?;
        let tokenizer_path = required_file(model_dir, TOKENIZER_FILE)?;
        let weights_path = required_file(model_dir, WEIGHTS_FILE)?;

        tracing::info!("Loading summarization model from {}", model_dir.display());
        let mut config: Config = serde_json::from_str(&std::fs::read_to_string(config_path)?)?;
        config.use_cache = true;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)?;
        let device = Device::Cpu;
        // SAFETY: the weights file is only read, and is not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
        let model = T5ForConditionalGeneration::load(vb, &config)?;
        tracing::debug!(
            "Model loaded ({} vocab entries, {} beams)",
            config.vocab_size,
            options.num_beams
        );

        Ok(Self {
            generator: T5Generator::new(model, config, device, options),
            tokenizer,
        })
    }
}

impl Summarizer for T5Summarizer {
    fn name(&self) -> &'static str {
        "t5"
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let prompt = format!("{}{}", self.generator.options.prefix, text);
        let encoding = self.tokenizer.encode(prompt, true)?;
        let input_ids = truncate_input(
            encoding.get_ids(),
            self.generator.options.max_input_tokens,
            self.generator.eos_token(),
        );
        tracing::debug!("Summarizing {} input tokens", input_ids.len());

        let summary_ids = self.generator.generate(&input_ids, bounds)?;
        let summary = self.tokenizer.decode(&summary_ids, true)?;
        let summary = summary.trim().to_string();
        if summary.is_empty() {
            return Err(DigestError::SummarizationError {
                message: "model produced an empty summary".to_string(),
            });
        }
        Ok(summary)
    }
}

/// Token-level decoding over a loaded model.
///
/// The end-of-sequence token is masked out until `min_length` tokens have
/// been produced and generation stops at `max_length` tokens, so the output
/// length always falls within the bounds.
struct T5Generator {
    // The decoder keeps a KV cache, so decoding needs exclusive access.
    model: Mutex<T5ForConditionalGeneration>,
    config: Config,
    device: Device,
    options: GenerationOptions,
}

impl T5Generator {
    fn new(
        model: T5ForConditionalGeneration,
        config: Config,
        device: Device,
        options: GenerationOptions,
    ) -> Self {
        Self {
            model: Mutex::new(model),
            config,
            device,
            options,
        }
    }

    fn start_token(&self) -> u32 {
        self.config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32
    }

    fn eos_token(&self) -> u32 {
        self.config.eos_token_id as u32
    }

    fn generate(&self, input_ids: &[u32], bounds: LengthBounds) -> Result<Vec<u32>> {
        let mut guard = self.model.lock().map_err(|_| DigestError::SummarizationError {
            message: "model lock poisoned by an earlier failure".to_string(),
        })?;
        let model = &mut *guard;
        model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        if self.options.num_beams <= 1 {
            return self.greedy(model, &encoder_output, bounds);
        }

        let start_token = self.start_token();
        beam_search(
            |prefix| {
                let mut tokens = Vec::with_capacity(prefix.len() + 1);
                tokens.push(start_token);
                tokens.extend_from_slice(prefix);
                self.next_log_probs(model, &encoder_output, &tokens)
            },
            self.eos_token(),
            bounds,
            self.options.num_beams,
            self.options.length_penalty,
        )
    }

    fn greedy(
        &self,
        model: &mut T5ForConditionalGeneration,
        encoder_output: &Tensor,
        bounds: LengthBounds,
    ) -> Result<Vec<u32>> {
        let eos_token = self.eos_token();
        let mut output = vec![self.start_token()];

        for step in 0..bounds.max_length {
            let decoder_input = if step == 0 {
                Tensor::new(output.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                Tensor::new(&output[output.len() - 1..], &self.device)?.unsqueeze(0)?
            };
            let logits = model.decode(&decoder_input, encoder_output)?.squeeze(0)?;
            let logits = self.penalize(logits, &output)?;

            let scores = logits.to_vec1::<f32>()?;
            let allow_eos = step >= bounds.min_length;
            match select_next_token(&scores, eos_token, allow_eos) {
                Some(token) if token != eos_token => output.push(token),
                _ => break,
            }
        }

        Ok(output.split_off(1))
    }

    /// Log-probabilities of the token after `tokens` (start token included).
    /// Each beam is re-decoded from scratch, so the KV cache is reset first.
    fn next_log_probs(
        &self,
        model: &mut T5ForConditionalGeneration,
        encoder_output: &Tensor,
        tokens: &[u32],
    ) -> Result<Vec<f32>> {
        model.clear_kv_cache();
        let decoder_input = Tensor::new(tokens, &self.device)?.unsqueeze(0)?;
        let logits = model.decode(&decoder_input, encoder_output)?.squeeze(0)?;
        let logits = self.penalize(logits, tokens)?;
        let log_probs = candle_nn::ops::log_softmax(&logits, D::Minus1)?;
        Ok(log_probs.to_vec1::<f32>()?)
    }

    fn penalize(&self, logits: Tensor, context: &[u32]) -> Result<Tensor> {
        if self.options.repeat_penalty == 1.0 {
            return Ok(logits);
        }
        let window = context.len().saturating_sub(self.options.repeat_last_n);
        Ok(apply_repeat_penalty(
            &logits,
            self.options.repeat_penalty,
            &context[window..],
        )?)
    }
}

#[derive(Debug, Clone)]
struct Hypothesis {
    tokens: Vec<u32>,
    log_prob: f32,
}

impl Hypothesis {
    fn normalized_score(&self, length_penalty: f32) -> f32 {
        self.log_prob / (self.tokens.len().max(1) as f32).powf(length_penalty)
    }
}

/// Beam search with early stopping. `next_log_probs` scores the token after
/// a prefix of generated tokens. Search ends once `num_beams` hypotheses
/// have emitted EOS, or at `max_length` tokens, where the live beams count
/// as finished. The returned tokens exclude EOS.
fn beam_search<F>(
    mut next_log_probs: F,
    eos_token: u32,
    bounds: LengthBounds,
    num_beams: usize,
    length_penalty: f32,
) -> Result<Vec<u32>>
where
    F: FnMut(&[u32]) -> Result<Vec<f32>>,
{
    let num_beams = num_beams.max(1);
    let mut beams = vec![Hypothesis {
        tokens: Vec::new(),
        log_prob: 0.0,
    }];
    let mut finished: Vec<Hypothesis> = Vec::new();
    let mut stopped_early = false;

    for step in 0..bounds.max_length {
        let allow_eos = step >= bounds.min_length;
        let mut candidates = Vec::with_capacity(beams.len() * (num_beams + 1));
        for beam in &beams {
            let scores = next_log_probs(&beam.tokens)?;
            for (token, score) in top_tokens(&scores, num_beams + 1, eos_token, allow_eos) {
                let mut tokens = beam.tokens.clone();
                tokens.push(token);
                candidates.push(Hypothesis {
                    tokens,
                    log_prob: beam.log_prob + score,
                });
            }
        }
        candidates.sort_by(|a, b| b.log_prob.total_cmp(&a.log_prob));

        beams.clear();
        for (rank, mut candidate) in candidates.into_iter().enumerate() {
            if candidate.tokens.last() == Some(&eos_token) {
                if rank < num_beams {
                    candidate.tokens.pop();
                    finished.push(candidate);
                }
            } else {
                beams.push(candidate);
            }
            if beams.len() == num_beams {
                break;
            }
        }

        if finished.len() >= num_beams || beams.is_empty() {
            stopped_early = true;
            break;
        }
    }

    if !stopped_early {
        finished.append(&mut beams);
    }

    finished
        .into_iter()
        .max_by(|a, b| {
            a.normalized_score(length_penalty)
                .total_cmp(&b.normalized_score(length_penalty))
        })
        .map(|hypothesis| hypothesis.tokens)
        .ok_or_else(|| DigestError::SummarizationError {
            message: "beam search produced no hypothesis".to_string(),
        })
}

/// The `k` best-scoring tokens, highest first; ties keep vocabulary order.
fn top_tokens(scores: &[f32], k: usize, eos_token: u32, allow_eos: bool) -> Vec<(u32, f32)> {
    let mut ranked: Vec<(u32, f32)> = scores
        .iter()
        .enumerate()
        .filter(|(index, score)| (allow_eos || *index as u32 != eos_token) && !score.is_nan())
        .map(|(index, &score)| (index as u32, score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

fn required_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(DigestError::MissingConfigError {
            field: format!("summarizer.model_dir ({} not found)", path.display()),
        })
    }
}

/// Cuts token ids to `max_tokens`, keeping a trailing EOS so the encoder
/// still sees a terminated sequence.
fn truncate_input(ids: &[u32], max_tokens: usize, eos_token: u32) -> Vec<u32> {
    if ids.len() <= max_tokens || max_tokens == 0 {
        return ids.to_vec();
    }
    let mut truncated = ids[..max_tokens - 1].to_vec();
    truncated.push(eos_token);
    truncated
}

/// Greedy choice over the vocabulary scores. With `allow_eos` false the EOS
/// token is never picked. Returns `None` for an empty score vector.
fn select_next_token(scores: &[f32], eos_token: u32, allow_eos: bool) -> Option<u32> {
    scores
        .iter()
        .enumerate()
        .filter(|(index, score)| (allow_eos || *index as u32 != eos_token) && !score.is_nan())
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(index, _)| index as u32)
}
