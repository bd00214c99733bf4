use thiserror::Error;

use crate::parser::ParseError;
use crate::scoring::{ScoreError, UnknownMethodError};

/// Errors from [`Evaluator::evaluate`](super::Evaluator::evaluate).
///
/// Every variant aborts the whole call; there is no partial scoring. The
/// structural errors (`ShapeMismatch`, `ParserRequired`, `EncoderRequired`)
/// fire before any parsing or scoring work; collaborator errors propagate
/// unmodified.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Some input is raw caption text but no scene-graph parser was
    /// configured on the evaluator.
    #[error("a scene-graph parser is required for non-graph inputs")]
    ParserRequired,

    /// Soft-SPICE was requested but no phrase encoder was configured.
    #[error("a phrase encoder is required for the soft_spice method")]
    EncoderRequired,

    /// Candidates and references are not positionally aligned.
    #[error("{candidates} candidates but {references} reference lists")]
    ShapeMismatch {
        candidates: usize,
        references: usize,
    },

    /// A method name outside the supported set, from
    /// [`Method::from_str`](crate::scoring::Method).
    #[error(transparent)]
    UnknownMethod(#[from] UnknownMethodError),

    /// The scene-graph parser failed.
    #[error(transparent)]
    Parser(#[from] ParseError),

    /// A scorer failed (only soft-SPICE can: it calls the encoder).
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Convenience alias for evaluator results.
pub type EvalResult<T> = Result<T, EvalError>;
