//! Sentence-BERT phrase encoder (safetensors checkpoint + tokenizer).
//!
//! Use [`BertEncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;


pub use config::{BERT_EMBEDDING_DIM, BERT_MAX_SEQ_LEN, BertEncoderConfig};

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use crate::embedding::PhraseEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EncoderError;

enum EncoderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Phrase encoder backed by a candle BERT checkpoint, with mean pooling over
/// the attention mask and L2-normalized output (supports stub mode).
pub struct SentenceBertEncoder {
    backend: EncoderBackend,
    config: BertEncoderConfig,
}

impl std::fmt::Debug for SentenceBertEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceBertEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceBertEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: BertEncoderConfig) -> Result<Self, EncoderError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence encoder");

        if !config.weights_available() || !config.tokenizer_available() {
            return Err(EncoderError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence-BERT encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &BertEncoderConfig,
        device: &Device,
    ) -> Result<(BertModel, Tokenizer), EncoderError> {
        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len)?;

        let config_path = config.model_dir.join("config.json");
        let config_content = std::fs::read_to_string(&config_path)?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| EncoderError::ModelLoadFailed {
                reason: format!("failed to parse {}: {}", config_path.display(), e),
            })?;

        if config.embedding_dim > bert_config.hidden_size {
            return Err(EncoderError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        let weights_path = config.model_dir.join("model.safetensors");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device).map_err(
                |e| EncoderError::ModelLoadFailed {
                    reason: format!("failed to map safetensors: {}", e),
                },
            )?
        };

        // Sentence-transformers exports put the encoder at the root; plain HF
        // exports nest it under a "bert" prefix.
        let model = if vb.contains_tensor("embeddings.word_embeddings.weight") {
            BertModel::load(vb, &bert_config)
        } else {
            BertModel::load(vb.pp("bert"), &bert_config)
        }
        .map_err(|e| EncoderError::ModelLoadFailed {
            reason: format!("failed to load BERT weights: {}", e),
        })?;

        info!(
            hidden_size = bert_config.hidden_size,
            "BERT transformer loaded"
        );

        Ok((model, tokenizer))
    }

    fn encode_with_model(
        &self,
        phrases: &[String],
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EncoderError> {
        let inputs: Vec<&str> = phrases.iter().map(String::as_str).collect();
        let encodings =
            tokenizer
                .encode_batch(inputs, true)
                .map_err(|e| EncoderError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            phrases = phrases.len(),
            seq_len = encodings.first().map(|e| e.get_ids().len()),
            "Encoding phrase batch (transformer forward pass)"
        );

        let token_ids = encodings
            .iter()
            .map(|encoding| Tensor::new(encoding.get_ids(), device))
            .collect::<Result<Vec<_>, _>>()?;
        let input_ids = Tensor::stack(&token_ids, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let masks = encodings
            .iter()
            .map(|encoding| Tensor::new(encoding.get_attention_mask(), device))
            .collect::<Result<Vec<_>, _>>()?;
        let attention_mask = Tensor::stack(&masks, 0)?;

        let hidden = model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EncoderError::InferenceFailed {
                reason: format!("transformer forward pass failed: {}", e),
            })?;

        // Mean pooling: average the token states under the attention mask,
        // shape [batch, seq, hidden] -> [batch, hidden].
        let mask = attention_mask.to_dtype(DType::F32)?;
        let summed = hidden.broadcast_mul(&mask.unsqueeze(2)?)?.sum(1)?;
        let counts = mask.sum_keepdim(1)?.maximum(1.0)?;
        let pooled = summed.broadcast_div(&counts)?;

        let vectors = pooled
            .narrow(1, 0, self.config.embedding_dim)?
            .to_vec2::<f32>()?;

        Ok(vectors.into_iter().map(normalize_l2).collect())
    }

    fn encode_stub(&self, phrase: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        phrase.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize_l2(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &BertEncoderConfig {
        &self.config
    }
}

impl PhraseEncoder for SentenceBertEncoder {
    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn encode_chunk(&self, phrases: &[String]) -> Result<Vec<Vec<f32>>, EncoderError> {
        if phrases.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(phrases, model, tokenizer, device),
            EncoderBackend::Stub => Ok(phrases
                .iter()
                .map(|phrase| self.encode_stub(phrase))
                .collect()),
        }
    }
}

/// Loads `tokenizer.json` from the model directory, configured to truncate at
/// `max_len` and pad each batch to its longest member.
fn load_tokenizer(model_dir: &Path, max_len: usize) -> Result<Tokenizer, EncoderError> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    let mut tokenizer =
        Tokenizer::from_file(&tokenizer_path).map_err(|e| EncoderError::TokenizationFailed {
            reason: format!("failed to load {}: {}", tokenizer_path.display(), e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EncoderError::TokenizationFailed {
            reason: format!("failed to configure truncation: {}", e),
        })?;
    tokenizer.with_padding(Some(PaddingParams::default()));

    Ok(tokenizer)
}

fn normalize_l2(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
