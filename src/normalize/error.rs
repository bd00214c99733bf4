use std::path::PathBuf;
use thiserror::Error;

/// Errors loading a lemma dictionary file.
#[derive(Debug, Error)]
pub enum LemmaDictError {
    /// The dictionary file could not be read.
    #[error("failed to read lemma dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dictionary file is not a JSON object of string-to-string entries.
    #[error("failed to parse lemma dictionary {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
