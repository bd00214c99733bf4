//! The scene-graph parser seam.
//!
//! Parsing caption text into graph strings is an external concern (typically
//! a seq2seq model); the evaluator only needs the narrow [`SceneGraphParser`]
//! contract. [`MockParser`] is a table-driven implementation for tests,
//! available behind the `mock` feature.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::ParseError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockParser;

/// Converts raw caption text into graph strings.
///
/// Implementations must preserve order and length: `parse(texts, ..)` returns
/// exactly one graph string per input text, in input order. The evaluator
/// enforces the length half of the contract and fails with
/// [`ParseError::OutputLengthMismatch`] when an implementation breaks it.
pub trait SceneGraphParser {
    /// Parses a flat batch of texts, processing at most `batch_size` at a
    /// time.
    fn parse(&self, texts: &[String], batch_size: usize) -> Result<Vec<String>, ParseError>;
}
