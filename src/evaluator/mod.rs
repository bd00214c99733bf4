//! The evaluator: input normalization plus scorer dispatch.
//!
//! [`Evaluator`] is the crate's front door. It accepts candidates (one graph
//! string or caption per item) and references (one list per item), resolves
//! everything to canonical graph strings (invoking the configured
//! [`SceneGraphParser`] for exactly the items that need it) and routes the
//! aligned batch to the scorer selected by [`Method`]. Scores come back
//! scaled to `[0, 100]`.
//!
//! Collaborators are fixed at construction and read-only afterwards; a bare
//! `Evaluator::new()` scores pre-parsed graph strings with the two exact
//! metrics and needs neither parser nor encoder.

pub mod error;
pub mod nesting;


pub use error::{EvalError, EvalResult};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::constants::{DEFAULT_BATCH_SIZE, SCORE_SCALE};
use crate::embedding::PhraseEncoder;
use crate::normalize::{Lemmatizer, is_graph_format, lemmatize_graph, space_out_symbols};
use crate::parser::{ParseError, SceneGraphParser};
use crate::scoring::{Method, set_match_score, soft_spice_scores, spice_score};

/// Per-call evaluation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOptions {
    /// Scoring method to dispatch to.
    pub method: Method,
    /// Chunk size for the parser and encoder seams.
    pub batch_size: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            method: Method::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EvalOptions {
    /// Options for a method with the default batch size.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Sets the seam batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// One evaluation's scores plus the graph strings they were computed from.
///
/// The resolved graphs are the canonical forms actually scored: parsed where
/// the input was a caption, symbol-spaced, and lemmatized when a lemmatizer
/// is configured. Useful for inspecting what the parser produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// One score in `[0, 100]` per candidate.
    pub scores: Vec<f64>,
    /// Resolved candidate graph strings, aligned with `scores`.
    pub candidates: Vec<String>,
    /// Resolved reference graph strings, original nesting preserved.
    pub references: Vec<Vec<String>>,
}

/// Scores candidate scene graphs against reference scene graphs.
///
/// Construction wires in the collaborators once:
///
/// ```
/// use sgeval::{EvalOptions, Evaluator, Method};
///
/// let evaluator = Evaluator::new();
/// let candidates = vec!["man, tall ; man, wear, hat".to_string()];
/// let references = vec![vec!["man, tall ; man, wear, hat".to_string()]];
///
/// let scores = evaluator
///     .evaluate(&candidates, &references, &EvalOptions::new(Method::Spice))
///     .unwrap();
/// assert_eq!(scores, vec![100.0]);
/// ```
#[derive(Default)]
pub struct Evaluator {
    parser: Option<Box<dyn SceneGraphParser>>,
    encoder: Option<Box<dyn PhraseEncoder>>,
    lemmatizer: Option<Box<dyn Lemmatizer>>,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("parser", &self.parser.is_some())
            .field("encoder", &self.encoder.is_some())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .finish()
    }
}

impl Evaluator {
    /// An evaluator with no collaborators: scores pre-parsed graph strings
    /// with the exact metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires in the parser used for raw caption inputs.
    pub fn with_parser(mut self, parser: impl SceneGraphParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Wires in the phrase encoder required by [`Method::SoftSpice`].
    pub fn with_encoder(mut self, encoder: impl PhraseEncoder + 'static) -> Self {
        self.encoder = Some(Box::new(encoder));
        self
    }

    /// Wires in a lemmatizer applied token-wise to every resolved graph.
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Box::new(lemmatizer));
        self
    }

    /// Returns `true` if a parser is configured.
    pub fn has_parser(&self) -> bool {
        self.parser.is_some()
    }

    /// Returns `true` if a phrase encoder is configured.
    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    /// Returns `true` if a lemmatizer is configured.
    pub fn has_lemmatizer(&self) -> bool {
        self.lemmatizer.is_some()
    }

    /// Scores each candidate against its reference list, returning one value
    /// in `[0, 100]` per candidate.
    ///
    /// `candidates[i]` is scored against `references[i]`; the two slices must
    /// be the same length ([`EvalError::ShapeMismatch`] otherwise, before any
    /// work is done). Inputs may be graph strings, captions, or a mix;
    /// captions require a configured parser ([`EvalError::ParserRequired`]).
    pub fn evaluate(
        &self,
        candidates: &[String],
        references: &[Vec<String>],
        options: &EvalOptions,
    ) -> EvalResult<Vec<f64>> {
        Ok(self
            .evaluate_detailed(candidates, references, options)?
            .scores)
    }

    /// Like [`evaluate`](Self::evaluate), but also returns the resolved graph
    /// strings the scores were computed from.
    #[instrument(skip_all, fields(items = candidates.len(), method = %options.method))]
    pub fn evaluate_detailed(
        &self,
        candidates: &[String],
        references: &[Vec<String>],
        options: &EvalOptions,
    ) -> EvalResult<Evaluation> {
        if candidates.len() != references.len() {
            return Err(EvalError::ShapeMismatch {
                candidates: candidates.len(),
                references: references.len(),
            });
        }

        info!("Starting evaluation");

        let candidates = self.resolve_flat(candidates, options.batch_size)?;
        let references = self.resolve_nested(references, options.batch_size)?;

        let raw = self.dispatch(&candidates, &references, options)?;
        let scores = raw.into_iter().map(|score| score * SCORE_SCALE).collect();

        info!("Evaluation completed");

        Ok(Evaluation {
            scores,
            candidates,
            references,
        })
    }

    /// Resolves a flat collection to canonical graph strings: parses the
    /// items that are not graph format, then normalizes everything.
    fn resolve_flat(&self, items: &[String], batch_size: usize) -> EvalResult<Vec<String>> {
        let items = self.parse_where_needed(items, batch_size)?;
        Ok(items.iter().map(|graph| self.canonicalize(graph)).collect())
    }

    /// Resolves a nested collection through the flat path, preserving the
    /// sublist structure.
    fn resolve_nested(
        &self,
        items: &[Vec<String>],
        batch_size: usize,
    ) -> EvalResult<Vec<Vec<String>>> {
        let (flat, lengths) = nesting::flatten(items);
        let resolved = self.resolve_flat(&flat, batch_size)?;
        Ok(nesting::restore(resolved, &lengths))
    }

    /// Sends exactly the non-graph items through the parser and splices the
    /// parsed graphs back at their original positions.
    ///
    /// If every item is already graph format the parser is never invoked, so
    /// graph-only workloads need no parser at all.
    fn parse_where_needed(&self, items: &[String], batch_size: usize) -> EvalResult<Vec<String>> {
        let needs_parsing: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !is_graph_format(item))
            .map(|(index, _)| index)
            .collect();

        if needs_parsing.is_empty() {
            return Ok(items.to_vec());
        }

        let parser = self.parser.as_deref().ok_or(EvalError::ParserRequired)?;

        debug!(
            total = items.len(),
            to_parse = needs_parsing.len(),
            "Parsing non-graph inputs"
        );

        let texts: Vec<String> = needs_parsing
            .iter()
            .map(|&index| items[index].clone())
            .collect();

        let parsed = parser.parse(&texts, batch_size)?;
        if parsed.len() != texts.len() {
            return Err(ParseError::OutputLengthMismatch {
                expected: texts.len(),
                actual: parsed.len(),
            }
            .into());
        }

        let mut resolved = items.to_vec();
        for (&index, graph) in needs_parsing.iter().zip(parsed) {
            resolved[index] = graph;
        }

        Ok(resolved)
    }

    /// Canonicalizes one graph string: symbol spacing first (so delimiters
    /// become standalone tokens), then token-wise lemmatization if
    /// configured. Parsed and pre-parsed inputs both pass through here, so
    /// they reach the scorers in an identical surface form.
    fn canonicalize(&self, graph: &str) -> String {
        let spaced = space_out_symbols(graph);

        match &self.lemmatizer {
            Some(lemmatizer) => lemmatize_graph(&spaced, lemmatizer.as_ref()),
            None => spaced,
        }
    }

    /// Routes the resolved batch to the selected scorer; outputs are raw
    /// `[0, 1]` values.
    fn dispatch(
        &self,
        candidates: &[String],
        references: &[Vec<String>],
        options: &EvalOptions,
    ) -> EvalResult<Vec<f64>> {
        debug!(method = %options.method, "Dispatching to scorer");

        match options.method {
            Method::SetMatch => Ok(candidates
                .iter()
                .zip(references)
                .map(|(candidate, refs)| set_match_score(candidate, refs))
                .collect()),
            Method::Spice => Ok(candidates
                .iter()
                .zip(references)
                .map(|(candidate, refs)| spice_score(candidate, refs))
                .collect()),
            Method::SoftSpice => {
                let encoder = self.encoder.as_deref().ok_or(EvalError::EncoderRequired)?;
                Ok(soft_spice_scores(
                    encoder,
                    candidates,
                    references,
                    options.batch_size,
                )?)
            }
        }
    }
}
