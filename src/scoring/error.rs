use thiserror::Error;

use crate::embedding::EncoderError;

/// Errors produced while computing scores.
///
/// Only soft-SPICE can fail (it calls into the phrase encoder); the pure
/// tuple-set metrics are total functions.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("phrase encoder error: {0}")]
    Encoder(#[from] EncoderError),

    /// The encoder broke its order/length-preservation contract.
    #[error("encoder returned {actual} vectors for {expected} phrases")]
    VectorCountMismatch { expected: usize, actual: usize },
}
