use std::collections::HashMap;

use super::{ParseError, SceneGraphParser};

/// Table-driven parser for tests: known captions map to fixed graph strings,
/// unknown captions fall back to a configurable default.
#[derive(Debug, Default)]
pub struct MockParser {
    table: HashMap<String, String>,
    fallback: String,
    fail: bool,
}

impl MockParser {
    /// Creates an empty mock (every caption yields the empty graph).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock from `(caption, graph)` pairs.
    pub fn with_table<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(caption, graph)| (caption.into(), graph.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Sets the graph returned for captions missing from the table.
    pub fn with_fallback<S: Into<String>>(mut self, fallback: S) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Creates a mock whose `parse` always fails, for exercising error
    /// propagation.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl SceneGraphParser for MockParser {
    fn parse(&self, texts: &[String], _batch_size: usize) -> Result<Vec<String>, ParseError> {
        if self.fail {
            return Err(ParseError::Failed {
                reason: "mock parser configured to fail".to_string(),
            });
        }

        Ok(texts
            .iter()
            .map(|text| {
                self.table
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect())
    }
}
