use super::*;

fn tuple_set(tuples: &[Tuple]) -> HashSet<Tuple> {
    tuples.iter().cloned().collect()
}

mod extraction_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_attribute_and_relation() {
        let extraction = extract_tuples("man, tall ; man, wear, hat");

        assert_eq!(
            extraction.tuples,
            tuple_set(&[
                Tuple::attribute("man", "tall"),
                Tuple::relation("man", "wear", "hat"),
            ])
        );
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_extract_compact_spacing() {
        let compact = extract_tuples("man,tall;man,wear,hat");
        let spaced = extract_tuples("man , tall ; man , wear , hat");

        assert_eq!(compact.tuples, spaced.tuples);
    }

    #[test]
    fn test_extract_lowercases_fields() {
        let extraction = extract_tuples("Man, Tall");
        assert_eq!(
            extraction.tuples,
            tuple_set(&[Tuple::attribute("man", "tall")])
        );
    }

    #[test]
    fn test_extract_collapses_inner_whitespace() {
        let extraction = extract_tuples("car, parked   on, street");
        assert_eq!(
            extraction.tuples,
            tuple_set(&[Tuple::relation("car", "parked on", "street")])
        );
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let extraction = extract_tuples("man, tall ; man, tall ; MAN,  tall");
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_extract_empty_string() {
        let extraction = extract_tuples("");
        assert!(extraction.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_extract_ignores_blank_segments() {
        let extraction = extract_tuples("man, tall ; ; man, wear, hat ;");
        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_extract_skips_wrong_arity() {
        let extraction = extract_tuples("man ; man, wear, a, hat ; man, tall");
        assert_eq!(
            extraction.tuples,
            tuple_set(&[Tuple::attribute("man", "tall")])
        );
        assert_eq!(extraction.skipped, 2);
    }

    #[test]
    fn test_extract_skips_empty_field() {
        let extraction = extract_tuples("man, , hat ; dog, small");
        assert_eq!(
            extraction.tuples,
            tuple_set(&[Tuple::attribute("dog", "small")])
        );
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let first = extract_tuples("Dog, small ; dog, chase, cat");
        let second = extract_tuples(&render_graph(&first.tuples));

        assert_eq!(first.tuples, second.tuples);
        assert_eq!(second.skipped, 0);
    }
}

mod tuple_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arity() {
        assert_eq!(Tuple::attribute("man", "tall").arity(), 2);
        assert_eq!(Tuple::relation("man", "wear", "hat").arity(), 3);
    }

    #[test]
    fn test_fields_preserve_order() {
        let tuple = Tuple::relation("man", "wear", "hat");
        assert_eq!(tuple.fields(), vec!["man", "wear", "hat"]);
    }

    #[test]
    fn test_field_order_is_meaningful() {
        assert_ne!(
            Tuple::relation("man", "wear", "hat"),
            Tuple::relation("hat", "wear", "man")
        );
    }

    #[test]
    fn test_tokens_split_multiword_fields() {
        let tuple = Tuple::relation("car", "parked on", "street");
        let tokens: Vec<&str> = tuple.tokens().collect();
        assert_eq!(tokens, vec!["car", "parked", "on", "street"]);
    }

    #[test]
    fn test_phrase_joins_tokens() {
        assert_eq!(Tuple::relation("man", "wear", "hat").phrase(), "man wear hat");
        assert_eq!(Tuple::attribute("man", "tall").phrase(), "man tall");
    }

    #[test]
    fn test_display_round_trips_through_extraction() {
        let tuple = Tuple::relation("car", "parked on", "street");
        let extraction = extract_tuples(&tuple.to_string());
        assert_eq!(extraction.tuples, tuple_set(&[tuple]));
    }

    #[test]
    fn test_constructors_normalize() {
        assert_eq!(
            Tuple::attribute("  Man ", "Very   Tall"),
            Tuple::Attribute {
                object: "man".to_string(),
                attribute: "very tall".to_string(),
            }
        );
    }
}

mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_empty_set() {
        assert_eq!(render_graph(&HashSet::new()), "");
    }

    #[test]
    fn test_render_is_deterministic() {
        let tuples = tuple_set(&[
            Tuple::attribute("man", "tall"),
            Tuple::relation("man", "wear", "hat"),
            Tuple::attribute("hat", "red"),
        ]);

        assert_eq!(render_graph(&tuples), render_graph(&tuples.clone()));
    }

    #[test]
    fn test_render_round_trip_preserves_tuples() {
        let graph = "sheep, white ; sheep, graze on, grass ; grass, green";
        let original = extract_tuples(graph);
        let round_tripped = extract_tuples(&render_graph(&original.tuples));

        assert_eq!(original.tuples, round_tripped.tuples);
    }
}
