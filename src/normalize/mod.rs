//! Graph-string normalization: format detection, symbol spacing, cleaning,
//! and the lemmatization seam.
//!
//! Everything here is a pure string predicate or transform. The evaluator
//! applies [`space_out_symbols`] to every graph string (parsed or supplied)
//! and then, when configured, token-wise lemmatization, so all graphs reach
//! the scorers in one canonical surface form.

pub mod error;


pub use error::LemmaDictError;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::constants::{
    ATTRIBUTE_ARITY, FIELD_DELIMITER, MAX_FIELD_TOKENS, RELATION_ARITY, TUPLE_DELIMITER,
};
use crate::graph::{extract_tuples, render_graph};

/// Returns `true` if `text` structurally matches the graph-string grammar.
///
/// A string is graph format iff it is non-blank, has at least one non-blank
/// tuple segment, and every non-blank segment splits into exactly two or
/// three non-empty fields of at most [`MAX_FIELD_TOKENS`] words each.
///
/// The per-field word bound is the tiebreaker against ordinary captions:
/// `"a man wearing a hat, smiling"` has a comma but its first field is five
/// words long, so it is treated as raw text and routed to the parser.
pub fn is_graph_format(text: &str) -> bool {
    let mut segments = 0;

    for segment in text.split(TUPLE_DELIMITER) {
        if segment.trim().is_empty() {
            continue;
        }
        segments += 1;

        let fields: Vec<&str> = segment.split(FIELD_DELIMITER).map(str::trim).collect();

        if fields.len() != ATTRIBUTE_ARITY && fields.len() != RELATION_ARITY {
            return false;
        }

        let well_formed = fields
            .iter()
            .all(|field| !field.is_empty() && field.split_whitespace().count() <= MAX_FIELD_TOKENS);

        if !well_formed {
            return false;
        }
    }

    segments > 0
}

/// Surrounds every grammar delimiter with single spaces and collapses runs of
/// whitespace, so downstream whitespace tokenizers see delimiters as
/// standalone tokens.
///
/// Idempotent: applying it twice equals applying it once.
pub fn space_out_symbols(graph: &str) -> String {
    let mut spaced = String::with_capacity(graph.len() + 8);

    for ch in graph.chars() {
        if ch == TUPLE_DELIMITER || ch == FIELD_DELIMITER {
            spaced.push(' ');
            spaced.push(ch);
            spaced.push(' ');
        } else {
            spaced.push(ch);
        }
    }

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrites a graph string in canonical form: malformed tuples dropped,
/// duplicates collapsed, tuples sorted, fields normalized.
///
/// The output always satisfies [`is_graph_format`] unless no valid tuple
/// survived (then it is empty).
pub fn clean_graph_string(graph: &str) -> String {
    render_graph(&extract_tuples(graph).tuples)
}

/// Token-wise lemma lookup. Pure and deterministic.
pub trait Lemmatizer {
    /// Maps a single token to its lemma (or returns it unchanged).
    fn lemmatize(&self, token: &str) -> String;
}

/// Applies a lemmatizer to every whitespace-delimited token of a graph
/// string.
///
/// Run [`space_out_symbols`] first so delimiters are standalone tokens and
/// never glued to the words being looked up.
pub fn lemmatize_graph(graph: &str, lemmatizer: &dyn Lemmatizer) -> String {
    graph
        .split_whitespace()
        .map(|token| lemmatizer.lemmatize(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dictionary-backed [`Lemmatizer`]: known tokens map to their lemma,
/// unknown tokens pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct DictLemmatizer {
    entries: HashMap<String, String>,
}

impl DictLemmatizer {
    /// Builds a lemmatizer from `(surface, lemma)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(surface, lemma)| (surface.into(), lemma.into()))
                .collect(),
        }
    }

    /// Loads a lemma dictionary from a JSON object file
    /// (`{"wearing": "wear", ...}`).
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LemmaDictError> {
        let file = File::open(path.as_ref()).map_err(|source| LemmaDictError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        let entries: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| LemmaDictError::Parse {
                path: path.as_ref().to_path_buf(),
                source,
            })?;

        Ok(Self { entries })
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lemmatizer for DictLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        self.entries
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}
