//! Cross-cutting, shared constants.
//!
//! The graph-string grammar constants are a compatibility contract: anyone
//! producing or consuming serialized scene graphs must agree on them. Prefer
//! deriving secondary values from the primary ones to avoid drift.

/// Separator between tuples in a serialized scene graph.
pub const TUPLE_DELIMITER: char = ';';

/// Separator between fields within a tuple.
pub const FIELD_DELIMITER: char = ',';

/// Maximum whitespace-token length of a single tuple field.
///
/// Scene-graph objects, attributes, and relations are short noun/verb phrases
/// ("man", "dark brown", "parked on"). The bound is what lets
/// [`is_graph_format`](crate::normalize::is_graph_format) tell a graph string
/// apart from an ordinary caption that happens to contain commas.
pub const MAX_FIELD_TOKENS: usize = 3;

/// Number of fields in an attribute tuple.
pub const ATTRIBUTE_ARITY: usize = 2;

/// Number of fields in a relation tuple.
pub const RELATION_ARITY: usize = 3;

/// Default chunk size for embedding-model calls.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Scores are computed in [0, 1] and reported in [0, SCORE_SCALE].
pub const SCORE_SCALE: f64 = 100.0;

/// Default sentence-embedding dimension (MiniLM-class checkpoints).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default max token count per encoded phrase.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;
