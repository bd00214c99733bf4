//! Fuzzy tuple-set matching with partial string-level credit.
//!
//! Where SPICE demands exact tuple equality, set-match pays fractional credit
//! for near misses: `(man, wears, hat)` against `(man, wear, hat)` still
//! earns most of a point. The partial-credit formula is Jaccard similarity
//! over the two tuples' token sets, restricted to same-arity pairs, so the
//! metric is insensitive to token order inside a tuple; order sensitivity is
//! SPICE's job.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{Tuple, extract_tuples};

/// Scores a candidate graph against its references with partial credit,
/// returning the best per-reference similarity.
///
/// Per reference, every candidate tuple and every reference tuple takes its
/// best-match credit against the other side, and the similarity is the mean
/// of those credits. Matching any single acceptable annotation well is enough
/// for a high score.
pub fn set_match_score(candidate: &str, references: &[String]) -> f64 {
    let cand = extract_tuples(candidate).tuples;

    let score = references
        .iter()
        .map(|reference| pair_similarity(&cand, &extract_tuples(reference).tuples))
        .fold(0.0, f64::max);

    debug!(
        candidate_tuples = cand.len(),
        references = references.len(),
        score,
        "Computed set-match score"
    );

    score
}

/// Mean best-match credit over the union of tuple roles: `|C| + |R|` terms,
/// each tuple scored against the best same-arity partner on the other side.
///
/// Credits are summed in sorted tuple order so the result is bit-identical
/// across calls (hash-order summation would let float rounding drift).
fn pair_similarity(candidate: &HashSet<Tuple>, reference: &HashSet<Tuple>) -> f64 {
    if candidate.is_empty() && reference.is_empty() {
        return 1.0;
    }
    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let forward: f64 = sorted(candidate)
        .into_iter()
        .map(|tuple| best_credit(tuple, reference))
        .sum();
    let backward: f64 = sorted(reference)
        .into_iter()
        .map(|tuple| best_credit(tuple, candidate))
        .sum();

    (forward + backward) / (candidate.len() + reference.len()) as f64
}

fn sorted(tuples: &HashSet<Tuple>) -> Vec<&Tuple> {
    let mut ordered: Vec<&Tuple> = tuples.iter().collect();
    ordered.sort();
    ordered
}

fn best_credit(tuple: &Tuple, pool: &HashSet<Tuple>) -> f64 {
    pool.iter()
        .filter(|other| other.arity() == tuple.arity())
        .map(|other| token_jaccard(tuple, other))
        .fold(0.0, f64::max)
}

/// Jaccard similarity of the two tuples' whitespace-token sets.
///
/// Identical tuples score 1.0, token-disjoint tuples 0.0.
fn token_jaccard(a: &Tuple, b: &Tuple) -> f64 {
    let tokens_a: HashSet<&str> = a.tokens().collect();
    let tokens_b: HashSet<&str> = b.tokens().collect();

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }

    tokens_a.intersection(&tokens_b).count() as f64 / union as f64
}
