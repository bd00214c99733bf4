//! The phrase-embedding seam for soft-SPICE.
//!
//! Scene-graph tuples become short phrases ("man wear hat") that an encoder
//! turns into fixed-size vectors; soft-SPICE then matches candidate and
//! reference phrases by cosine similarity. [`SentenceBertEncoder`] is the
//! shipped implementation; anything satisfying [`PhraseEncoder`] plugs in.

/// Sentence-BERT encoder (candle safetensors checkpoint, stub mode).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

pub use bert::{BERT_EMBEDDING_DIM, BERT_MAX_SEQ_LEN, BertEncoderConfig, SentenceBertEncoder};
pub use error::EncoderError;

/// Turns phrases into fixed-size numeric vectors.
///
/// Implementations must be deterministic for identical input and
/// order-preserving: `encode(phrases, ..)[i]` is the vector for `phrases[i]`.
pub trait PhraseEncoder {
    /// Output vector dimensionality.
    fn embedding_dim(&self) -> usize;

    /// Encodes a single chunk of phrases, one vector per phrase, in order.
    fn encode_chunk(&self, phrases: &[String]) -> Result<Vec<Vec<f32>>, EncoderError>;

    /// Encodes phrases in chunks of at most `batch_size`, preserving order.
    ///
    /// Chunking bounds peak memory during model inference; it must never
    /// change the resulting vectors. A `batch_size` of zero is treated as 1.
    fn encode(
        &self,
        phrases: &[String],
        batch_size: usize,
    ) -> Result<Vec<Vec<f32>>, EncoderError> {
        if phrases.is_empty() {
            return Ok(vec![]);
        }

        let batch_size = batch_size.max(1);
        let mut vectors = Vec::with_capacity(phrases.len());

        for chunk in phrases.chunks(batch_size) {
            vectors.extend(self.encode_chunk(chunk)?);
        }

        Ok(vectors)
    }
}
