//! The three scene-graph scoring metrics.
//!
//! Each metric reduces one candidate graph plus its reference graphs to a
//! similarity in `[0, 1]`:
//!
//! - [`set_match_score`]: fuzzy tuple matching with partial token-overlap
//!   credit, best reference wins.
//! - [`spice_score`]: exact-tuple precision/recall/F1 against the union of
//!   all references.
//! - [`soft_spice_scores`]: phrase embeddings matched by cosine similarity,
//!   batched through a [`PhraseEncoder`](crate::embedding::PhraseEncoder).
//!
//! [`Method`] selects between them; the string names accepted by
//! [`Method::from_str`] are the crate's only stringly-typed surface.

pub mod error;
pub mod set_match;
pub mod soft_spice;
pub mod spice;


pub use error::ScoreError;
pub use set_match::set_match_score;
pub use soft_spice::soft_spice_scores;
pub use spice::{SpiceBreakdown, spice_breakdown, spice_score};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Scoring method selector. Adding a metric means adding a variant and its
/// match arms; there is no open-ended registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Fuzzy tuple-set similarity, max over references.
    SetMatch,
    /// Exact tuple-set F-score over the reference union.
    #[default]
    Spice,
    /// Embedding-based phrase matching.
    SoftSpice,
}

impl Method {
    /// Every supported method, in display order.
    pub const ALL: [Method; 3] = [Method::SetMatch, Method::Spice, Method::SoftSpice];

    /// The method's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::SetMatch => "set_match",
            Method::Spice => "spice",
            Method::SoftSpice => "soft_spice",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown evaluation method: {name} (expected set_match, spice, or soft_spice)")]
pub struct UnknownMethodError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for Method {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set_match" => Ok(Method::SetMatch),
            "spice" => Ok(Method::Spice),
            "soft_spice" => Ok(Method::SoftSpice),
            other => Err(UnknownMethodError {
                name: other.to_string(),
            }),
        }
    }
}
