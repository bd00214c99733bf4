//! Property tests for the crate's documented invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use sgeval::evaluator::nesting::{flatten, restore};
use sgeval::{
    BertEncoderConfig, EvalOptions, Evaluator, Method, SentenceBertEncoder, extract_tuples,
    is_graph_format, set_match_score, space_out_symbols, spice_score,
};

/// Short noun/verb vocabulary so generated tuples collide often enough to
/// exercise real matches, not just disjoint sets.
fn field() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "man", "hat", "dog", "cat", "grass", "tall", "red", "small", "wear", "chase", "on",
    ])
    .prop_map(String::from)
}

fn tuple() -> impl Strategy<Value = String> {
    prop_oneof![
        (field(), field()).prop_map(|(object, attribute)| format!("{object}, {attribute}")),
        (field(), field(), field())
            .prop_map(|(subject, relation, object)| format!("{subject}, {relation}, {object}")),
    ]
}

/// A graph string of zero or more tuples (zero yields the empty string).
fn graph() -> impl Strategy<Value = String> {
    prop::collection::vec(tuple(), 0..5).prop_map(|tuples| tuples.join(" ; "))
}

/// A graph string with at least one tuple, so it passes format detection.
fn nonempty_graph() -> impl Strategy<Value = String> {
    prop::collection::vec(tuple(), 1..5).prop_map(|tuples| tuples.join(" ; "))
}

/// Positionally aligned candidates and reference lists of non-empty graphs.
fn aligned_batch() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    prop::collection::vec(
        (
            nonempty_graph(),
            prop::collection::vec(nonempty_graph(), 1..4),
        ),
        1..5,
    )
    .prop_map(|items| items.into_iter().unzip())
}

fn stub_encoder() -> SentenceBertEncoder {
    SentenceBertEncoder::load(BertEncoderConfig::stub()).expect("load stub encoder")
}

proptest! {
    #[test]
    fn prop_flatten_restore_round_trips(
        nested in prop::collection::vec(prop::collection::vec(".*", 0..5), 0..6)
    ) {
        let (flat, lengths) = flatten(&nested);

        prop_assert_eq!(flat.len(), lengths.iter().sum::<usize>());
        prop_assert_eq!(restore(flat, &lengths), nested);
    }

    #[test]
    fn prop_symbol_spacing_is_idempotent(input in ".*") {
        let once = space_out_symbols(&input);
        let twice = space_out_symbols(&once);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_symbol_spacing_preserves_extraction(graph in graph()) {
        let spaced = space_out_symbols(&graph);

        prop_assert_eq!(
            extract_tuples(&graph).tuples,
            extract_tuples(&spaced).tuples
        );
    }

    #[test]
    fn prop_generated_graphs_are_graph_format(graph in nonempty_graph()) {
        prop_assert!(is_graph_format(&graph));
    }

    #[test]
    fn prop_spice_score_is_bounded(
        candidate in graph(),
        references in prop::collection::vec(graph(), 1..4)
    ) {
        let score = spice_score(&candidate, &references);
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of bounds", score);
    }

    #[test]
    fn prop_spice_is_one_iff_tuple_sets_are_equal(
        candidate in graph(),
        references in prop::collection::vec(graph(), 1..4)
    ) {
        let candidate_tuples = extract_tuples(&candidate).tuples;
        let reference_tuples: HashSet<_> = references
            .iter()
            .flat_map(|reference| extract_tuples(reference).tuples)
            .collect();

        let perfect = spice_score(&candidate, &references) == 1.0;
        prop_assert_eq!(perfect, candidate_tuples == reference_tuples);
    }

    #[test]
    fn prop_set_match_score_is_bounded(
        candidate in graph(),
        references in prop::collection::vec(graph(), 1..4)
    ) {
        let score = set_match_score(&candidate, &references);
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of bounds", score);
    }

    #[test]
    fn prop_duplicate_reference_never_lowers_set_match(
        candidate in graph(),
        references in prop::collection::vec(graph(), 1..4),
        duplicate in any::<prop::sample::Index>()
    ) {
        let base = set_match_score(&candidate, &references);

        let mut augmented = references.clone();
        augmented.push(references[duplicate.index(references.len())].clone());
        let with_duplicate = set_match_score(&candidate, &augmented);

        prop_assert!(with_duplicate >= base);
    }

    #[test]
    fn prop_set_match_is_one_for_identical_graphs(graph in nonempty_graph()) {
        let references = vec![graph.clone()];
        prop_assert_eq!(set_match_score(&graph, &references), 1.0);
    }

    #[test]
    fn prop_soft_spice_is_batch_invariant(
        (candidates, references) in aligned_batch(),
        batch_size in 1usize..8
    ) {
        let evaluator = Evaluator::new().with_encoder(stub_encoder());

        let at = |batch_size| {
            evaluator
                .evaluate(
                    &candidates,
                    &references,
                    &EvalOptions::new(Method::SoftSpice).with_batch_size(batch_size),
                )
                .expect("soft-SPICE evaluation")
        };

        let full = at(usize::MAX);
        prop_assert_eq!(at(1), full.clone());
        prop_assert_eq!(at(batch_size), full);
    }

    #[test]
    fn prop_public_scores_are_scaled_raw_scores(
        (candidates, references) in aligned_batch()
    ) {
        let evaluator = Evaluator::new();

        let spice = evaluator
            .evaluate(&candidates, &references, &EvalOptions::new(Method::Spice))
            .expect("spice evaluation");
        let set_match = evaluator
            .evaluate(&candidates, &references, &EvalOptions::new(Method::SetMatch))
            .expect("set-match evaluation");

        for index in 0..candidates.len() {
            let raw_spice = spice_score(&candidates[index], &references[index]);
            let raw_set_match = set_match_score(&candidates[index], &references[index]);

            prop_assert!((spice[index] - 100.0 * raw_spice).abs() < 1e-9);
            prop_assert!((set_match[index] - 100.0 * raw_set_match).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_scores_never_exceed_the_scale(
        (candidates, references) in aligned_batch()
    ) {
        let evaluator = Evaluator::new().with_encoder(stub_encoder());

        for method in Method::ALL {
            let scores = evaluator
                .evaluate(&candidates, &references, &EvalOptions::new(method))
                .expect("evaluation");

            for score in scores {
                prop_assert!(
                    (0.0..=100.0).contains(&score),
                    "{} produced {}",
                    method,
                    score
                );
            }
        }
    }
}
