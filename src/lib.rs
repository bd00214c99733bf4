//! Scene-graph evaluation metrics for image captioning.
//!
//! `sgeval` scores how well a candidate scene graph (or a caption parsed into
//! one) matches one or more reference scene graphs. Three interchangeable
//! metrics are served through one entry point:
//!
//! - **set_match**: fuzzy tuple matching with partial token-overlap credit,
//!   best reference wins.
//! - **spice**: exact tuple-set precision/recall/F1 against the union of all
//!   references.
//! - **soft_spice**: phrase embeddings matched by cosine similarity.
//!
//! # Public API Surface
//!
//! ## Entry Point
//! - [`Evaluator`], [`EvalOptions`], [`Method`] - Normalization + dispatch
//! - [`Evaluation`], [`EvalError`] - Detailed results and call errors
//!
//! ## Graph Model
//! - [`Tuple`], [`Extraction`], [`extract_tuples`], [`render_graph`] - The
//!   frozen graph-string grammar and its tuple sets
//! - [`is_graph_format`], [`space_out_symbols`], [`clean_graph_string`] -
//!   Pure predicates/transforms over graph strings
//!
//! ## Scorers
//! - [`set_match_score`], [`spice_score`], [`spice_breakdown`],
//!   [`soft_spice_scores`] - The metrics behind [`Method`], callable directly
//!
//! ## Collaborator Seams
//! - [`SceneGraphParser`] - Caption text to graph strings
//! - [`PhraseEncoder`], [`SentenceBertEncoder`] - Phrase embeddings for
//!   soft-SPICE
//! - [`Lemmatizer`], [`DictLemmatizer`] - Token-wise surface normalization
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature =
//! "mock"))]`.

pub mod constants;
pub mod embedding;
pub mod evaluator;
pub mod graph;
pub mod normalize;
pub mod parser;
pub mod scoring;

pub use evaluator::{EvalError, EvalOptions, EvalResult, Evaluation, Evaluator};

pub use graph::{Extraction, Tuple, extract_tuples, render_graph};
pub use normalize::{
    DictLemmatizer, LemmaDictError, Lemmatizer, clean_graph_string, is_graph_format,
    lemmatize_graph, space_out_symbols,
};

pub use scoring::{
    Method, ScoreError, SpiceBreakdown, UnknownMethodError, set_match_score, soft_spice_scores,
    spice_breakdown, spice_score,
};

pub use embedding::{
    BERT_EMBEDDING_DIM, BERT_MAX_SEQ_LEN, BertEncoderConfig, EncoderError, PhraseEncoder,
    SentenceBertEncoder,
};
pub use parser::{ParseError, SceneGraphParser};

#[cfg(any(test, feature = "mock"))]
pub use parser::MockParser;
