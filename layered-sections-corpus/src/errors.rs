//! Error types for corpus processing.

use layered_sections::SectionError;
use thiserror::Error;

/// Errors that can occur while reading or processing corpus files.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A fact or sect line that could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A file that could not be read or written.
    #[error("failed to access {path}: {message}")]
    Load { path: String, message: String },

    /// Hierarchy building rejected the document.
    #[error(transparent)]
    Section(#[from] SectionError),
}

impl CorpusError {
    pub(crate) fn load(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        CorpusError::Load {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
