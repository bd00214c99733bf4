use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced through the [`PhraseEncoder`](super::PhraseEncoder) seam.
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("sentence-encoder model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load sentence-encoder model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("phrase encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EncoderError {
    fn from(err: candle_core::Error) -> Self {
        EncoderError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EncoderError {
    fn from(err: std::io::Error) -> Self {
        EncoderError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
