//! Error types for file-level operations
//!
//! Scanning itself never fails: missing names, bodiless lemmas and truncated
//! input are ordinary return values. These errors cover reading and writing
//! files, the erasure cache, and CLI name patterns.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LemmaScanError {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lemma `{name}` not found in {}", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("invalid name pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("corrupt cache entry {}", path.display())]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LemmaScanError>;

impl LemmaScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LemmaScanError::Io {
            path: path.into(),
            source,
        }
    }
}
