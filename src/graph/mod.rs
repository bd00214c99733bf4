//! Scene-graph tuples and the graph-string grammar.
//!
//! A serialized scene graph is a [`TUPLE_DELIMITER`]-separated list of tuples,
//! each a [`FIELD_DELIMITER`]-separated list of fields:
//! `"man, tall ; man, wear, hat"`. Two fields make an attribute tuple, three
//! make a relation tuple. This grammar is frozen: it is the only serialized
//! artifact the crate understands, and [`extract_tuples`] / [`render_graph`]
//! are inverse up to canonical form.

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::constants::{ATTRIBUTE_ARITY, FIELD_DELIMITER, RELATION_ARITY, TUPLE_DELIMITER};

/// One fact extracted from a scene graph.
///
/// Field order is meaningful: `(man, wear, hat)` and `(hat, wear, man)` are
/// different tuples. Fields are stored case- and whitespace-normalized so that
/// tuple equality is insensitive to the surface form they were parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tuple {
    /// `(object, attribute)`, as in "the man is tall".
    Attribute {
        /// Object the attribute applies to.
        object: String,
        /// Attribute value.
        attribute: String,
    },
    /// `(subject, relation, object)`, as in "the man wears a hat".
    Relation {
        /// Relation source.
        subject: String,
        /// Relation name.
        relation: String,
        /// Relation target.
        object: String,
    },
}

impl Tuple {
    /// Builds an attribute tuple from raw fields, normalizing each.
    pub fn attribute(object: &str, attribute: &str) -> Self {
        Tuple::Attribute {
            object: normalize_field(object),
            attribute: normalize_field(attribute),
        }
    }

    /// Builds a relation tuple from raw fields, normalizing each.
    pub fn relation(subject: &str, relation: &str, object: &str) -> Self {
        Tuple::Relation {
            subject: normalize_field(subject),
            relation: normalize_field(relation),
            object: normalize_field(object),
        }
    }

    /// Number of fields (2 for attributes, 3 for relations).
    pub fn arity(&self) -> usize {
        match self {
            Tuple::Attribute { .. } => ATTRIBUTE_ARITY,
            Tuple::Relation { .. } => RELATION_ARITY,
        }
    }

    /// Fields in order.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Tuple::Attribute { object, attribute } => vec![object, attribute],
            Tuple::Relation {
                subject,
                relation,
                object,
            } => vec![subject, relation, object],
        }
    }

    /// Whitespace tokens across all fields, in order.
    ///
    /// Multi-word fields contribute one token per word: the relation
    /// `(car, parked on, street)` yields `car`, `parked`, `on`, `street`.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .into_iter()
            .flat_map(|field| field.split_whitespace())
    }

    /// Natural-language phrase form: all tokens joined by single spaces.
    ///
    /// This is what the soft-SPICE pipeline feeds to the sentence encoder,
    /// e.g. `"man wear hat"`.
    pub fn phrase(&self) -> String {
        self.tokens().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        let mut first = true;
        for field in fields {
            if !first {
                write!(f, "{} ", FIELD_DELIMITER)?;
            }
            write!(f, "{}", field)?;
            first = false;
        }
        Ok(())
    }
}

/// Result of tuple extraction: the valid tuple set plus how many malformed
/// tuple-strings were dropped on the way.
///
/// Graphs often come from a noisy upstream parser, so a tuple-string with the
/// wrong arity or an empty field is skipped and counted rather than failing
/// the whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Well-formed tuples, duplicates collapsed.
    pub tuples: HashSet<Tuple>,
    /// Count of tuple-strings dropped as malformed.
    pub skipped: usize,
}

impl Extraction {
    /// Returns `true` if no valid tuples were extracted.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Number of distinct valid tuples.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }
}

/// Parses a graph string into its tuple set.
///
/// Splits on [`TUPLE_DELIMITER`], then each tuple-string on
/// [`FIELD_DELIMITER`]. Fields are trimmed, inner whitespace collapsed, and
/// lowercased. Blank segments (e.g. from a trailing delimiter) are ignored
/// outright; segments with content but the wrong field count, or with an
/// empty field, are counted in [`Extraction::skipped`].
///
/// Extraction is pure and idempotent: re-extracting the rendered form of an
/// extraction yields the same tuple set.
pub fn extract_tuples(graph: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for segment in graph.split(TUPLE_DELIMITER) {
        if segment.trim().is_empty() {
            continue;
        }

        let fields: Vec<String> = segment
            .split(FIELD_DELIMITER)
            .map(normalize_field)
            .collect();

        if fields.iter().any(String::is_empty) {
            extraction.skipped += 1;
            continue;
        }

        match fields.len() {
            ATTRIBUTE_ARITY => {
                extraction.tuples.insert(Tuple::Attribute {
                    object: fields[0].clone(),
                    attribute: fields[1].clone(),
                });
            }
            RELATION_ARITY => {
                extraction.tuples.insert(Tuple::Relation {
                    subject: fields[0].clone(),
                    relation: fields[1].clone(),
                    object: fields[2].clone(),
                });
            }
            _ => extraction.skipped += 1,
        }
    }

    if extraction.skipped > 0 {
        debug!(
            skipped = extraction.skipped,
            kept = extraction.tuples.len(),
            "Dropped malformed tuples during extraction"
        );
    }

    extraction
}

/// Renders a tuple set back to its canonical graph string.
///
/// Tuples are sorted for determinism (a set has no inherent order) and joined
/// with `" ; "`. `extract_tuples(render_graph(&t)) == t` for any tuple set.
pub fn render_graph(tuples: &HashSet<Tuple>) -> String {
    let mut ordered: Vec<&Tuple> = tuples.iter().collect();
    ordered.sort();

    ordered
        .iter()
        .map(|tuple| tuple.to_string())
        .collect::<Vec<_>>()
        .join(&format!(" {} ", TUPLE_DELIMITER))
}

/// Lowercases a field and collapses its whitespace to single spaces.
fn normalize_field(field: &str) -> String {
    field
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
