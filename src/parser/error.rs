use thiserror::Error;

/// Errors surfaced through the [`SceneGraphParser`](super::SceneGraphParser)
/// seam.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The parser implementation failed.
    #[error("scene-graph parsing failed: {reason}")]
    Failed { reason: String },

    /// The implementation returned a different number of graphs than texts,
    /// breaking the order/length-preservation contract.
    #[error("parser returned {actual} graphs for {expected} texts")]
    OutputLengthMismatch { expected: usize, actual: usize },
}
