//! SPICE: exact tuple-set precision/recall/F1.
//!
//! The classic semantic-propositional metric. All references of an item are
//! unioned into one reference tuple set, and matching is exact tuple
//! equality, token for token, order sensitive inside a tuple.

use std::collections::HashSet;

use serde::Serialize;

use crate::graph::{Tuple, extract_tuples};

/// The components behind a SPICE score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiceBreakdown {
    /// `|C ∩ R| / |C|`.
    pub precision: f64,
    /// `|C ∩ R| / |R|`.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f_score: f64,
    /// Exact tuple matches.
    pub matches: usize,
    /// Distinct candidate tuples.
    pub candidate_tuples: usize,
    /// Distinct tuples in the reference union.
    pub reference_tuples: usize,
}

/// SPICE F-score of a candidate graph against its references.
pub fn spice_score(candidate: &str, references: &[String]) -> f64 {
    spice_breakdown(candidate, references).f_score
}

/// Full precision/recall/F1 breakdown of a SPICE comparison.
///
/// Empty-set conventions: both sides empty counts as perfect agreement
/// (precision, recall, and F1 all 1.0); one side empty scores 0.0.
pub fn spice_breakdown(candidate: &str, references: &[String]) -> SpiceBreakdown {
    let cand = extract_tuples(candidate).tuples;

    let mut refs: HashSet<Tuple> = HashSet::new();
    for reference in references {
        refs.extend(extract_tuples(reference).tuples);
    }

    let matches = cand.intersection(&refs).count();

    let precision = ratio(matches, cand.len(), refs.is_empty());
    let recall = ratio(matches, refs.len(), cand.is_empty());

    let f_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    SpiceBreakdown {
        precision,
        recall,
        f_score,
        matches,
        candidate_tuples: cand.len(),
        reference_tuples: refs.len(),
    }
}

fn ratio(matches: usize, denominator: usize, other_side_empty: bool) -> f64 {
    if denominator == 0 {
        // 0/0 against an equally empty other side is vacuous agreement.
        if other_side_empty { 1.0 } else { 0.0 }
    } else {
        matches as f64 / denominator as f64
    }
}
