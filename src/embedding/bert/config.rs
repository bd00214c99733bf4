use std::path::PathBuf;

use crate::embedding::error::EncoderError;

/// Default sentence-embedding dimension (MiniLM-class checkpoints).
pub const BERT_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default max token count per encoded phrase.
pub const BERT_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Configuration for [`SentenceBertEncoder`](super::SentenceBertEncoder).
#[derive(Debug, Clone)]
pub struct BertEncoderConfig {
    /// Directory holding `config.json`, `model.safetensors`, and
    /// `tokenizer.json` (a sentence-transformers checkpoint layout).
    pub model_dir: PathBuf,
    /// Max tokens per phrase; longer phrases are truncated.
    pub max_seq_len: usize,
    /// Output embedding dimension (at most the model's hidden size).
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for BertEncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: BERT_MAX_SEQ_LEN,
            embedding_dim: BERT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl BertEncoderConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_DIR: &'static str = "SGEVAL_ENCODER_PATH";

    /// Loads config from environment variables (a missing value becomes an
    /// empty path).
    pub fn from_env() -> Self {
        let model_dir = std::env::var(Self::ENV_MODEL_DIR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default();

        Self {
            model_dir,
            ..Default::default()
        }
    }

    /// Creates a config for a checkpoint directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic
    /// embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EncoderError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EncoderError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.exists() {
            return Err(EncoderError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Returns `true` if the safetensors weights file exists.
    pub fn weights_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.model_dir.join("model.safetensors").exists()
    }

    /// Returns `true` if `tokenizer.json` exists in the model directory.
    pub fn tokenizer_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.model_dir.join("tokenizer.json").exists()
    }
}
