//! Soft-SPICE: embedding-based phrase matching.
//!
//! Graphs decompose into short phrases (`(man, wear, hat)` becomes
//! `"man wear hat"`) which an external encoder turns into vectors; a
//! candidate phrase then earns the cosine similarity of its closest
//! reference phrase instead of demanding exact equality.
//!
//! The pipeline runs in three stages over a whole batch: accumulate all
//! phrases into flat arenas (recording per-item phrase counts), encode each
//! arena in `batch_size` chunks, then regroup by the recorded counts and
//! score item by item. This is the crate's only hot path; chunk size bounds
//! encoder memory and never affects the scores.

use tracing::debug;

use crate::embedding::PhraseEncoder;
use crate::graph::extract_tuples;

use super::error::ScoreError;

/// Scores every candidate against its pooled reference phrases.
///
/// Per item, the score is the mean over candidate phrases of the best cosine
/// similarity against any phrase from any of the item's references. An item
/// with no candidate phrases or no reference phrases scores 0.0.
///
/// `candidates` and `references` must be positionally aligned; the caller
/// (the evaluator) checks the lengths.
pub fn soft_spice_scores(
    encoder: &dyn PhraseEncoder,
    candidates: &[String],
    references: &[Vec<String>],
    batch_size: usize,
) -> Result<Vec<f64>, ScoreError> {
    debug_assert_eq!(candidates.len(), references.len());

    let mut cand_arena = PhraseArena::default();
    let mut ref_arena = PhraseArena::default();

    for (candidate, refs) in candidates.iter().zip(references) {
        cand_arena.push_item(graph_phrases(candidate));
        ref_arena.push_item(refs.iter().flat_map(|reference| graph_phrases(reference)));
    }

    debug!(
        items = candidates.len(),
        candidate_phrases = cand_arena.phrases.len(),
        reference_phrases = ref_arena.phrases.len(),
        batch_size,
        "Encoding phrases for soft-SPICE"
    );

    let cand_vectors = encode_arena(encoder, &cand_arena, batch_size)?;
    let ref_vectors = encode_arena(encoder, &ref_arena, batch_size)?;

    let mut scores = Vec::with_capacity(candidates.len());
    let mut cand_cursor = 0;
    let mut ref_cursor = 0;

    for (cand_len, ref_len) in cand_arena.lengths.iter().zip(&ref_arena.lengths) {
        let cand_slice = &cand_vectors[cand_cursor..cand_cursor + cand_len];
        let ref_slice = &ref_vectors[ref_cursor..ref_cursor + ref_len];
        cand_cursor += cand_len;
        ref_cursor += ref_len;

        scores.push(item_score(cand_slice, ref_slice));
    }

    Ok(scores)
}

/// Flat phrase store plus per-item phrase counts, so vectors encoded from
/// the flat stream can be sliced back to their originating item.
#[derive(Debug, Default)]
struct PhraseArena {
    phrases: Vec<String>,
    lengths: Vec<usize>,
}

impl PhraseArena {
    fn push_item(&mut self, phrases: impl IntoIterator<Item = String>) {
        let before = self.phrases.len();
        self.phrases.extend(phrases);
        self.lengths.push(self.phrases.len() - before);
    }
}

/// Phrases of a graph's tuples, sorted for a deterministic stream.
fn graph_phrases(graph: &str) -> Vec<String> {
    let mut tuples: Vec<_> = extract_tuples(graph).tuples.into_iter().collect();
    tuples.sort();
    tuples.iter().map(|tuple| tuple.phrase()).collect()
}

fn encode_arena(
    encoder: &dyn PhraseEncoder,
    arena: &PhraseArena,
    batch_size: usize,
) -> Result<Vec<Vec<f32>>, ScoreError> {
    let vectors = encoder.encode(&arena.phrases, batch_size)?;

    if vectors.len() != arena.phrases.len() {
        return Err(ScoreError::VectorCountMismatch {
            expected: arena.phrases.len(),
            actual: vectors.len(),
        });
    }

    Ok(vectors)
}

fn item_score(candidates: &[Vec<f32>], references: &[Vec<f32>]) -> f64 {
    if candidates.is_empty() || references.is_empty() {
        return 0.0;
    }

    let total: f64 = candidates
        .iter()
        .map(|cand| {
            references
                .iter()
                .map(|reference| f64::from(cosine_similarity(cand, reference)))
                .fold(0.0, f64::max)
        })
        .sum();

    (total / candidates.len() as f64).clamp(0.0, 1.0)
}

#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
