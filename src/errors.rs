//! Error and warning types for hierarchy building.
//!
//! Fatal problems abort the single document being processed and surface as
//! [`SectionError`]. Findings that do not stop processing are collected as
//! [`StructuralWarning`]s on a [`ProcessResult`].

use std::fmt;

use thiserror::Error;

/// Errors that abort building the hierarchy for one document.
#[derive(Debug, Error)]
pub enum SectionError {
    /// Input that no builder can handle, such as an unknown source format.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A tag range that is inverted or runs past the end of the document.
    #[error("invalid span for tag '{name}' ({start}-{end}): {reason}")]
    InvalidSpan {
        name: String,
        start: usize,
        end: usize,
        reason: String,
    },

    /// Partially overlapping tags rejected by a strict tree build.
    #[error("tag '{name}' ({start}-{end}) overlaps '{other}' ({other_start}-{other_end}) without nesting")]
    OverlappingTags {
        name: String,
        start: usize,
        end: usize,
        other: String,
        other_start: usize,
        other_end: usize,
    },

    /// More tags than the configured maximum.
    #[error("document has {count} tags, more than the configured maximum of {max}")]
    TooManyTags { count: usize, max: usize },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for section operations.
pub type SectionResult<T> = Result<T, SectionError>;

/// Non-fatal findings reported while building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralWarning {
    /// A tag overlapped an existing node without nesting and was appended as a sibling.
    PartialOverlap {
        name: String,
        start: usize,
        end: usize,
        sibling: String,
        sibling_start: usize,
        sibling_end: usize,
    },
    /// A claim refers to a claim number that is not an earlier claim.
    UnresolvedClaimReference { claim_number: u32, referenced: u32 },
    /// A claim refers to a number too large to be a claim number.
    OversizedClaimReference { claim_number: u32, reference: String },
    /// The document had nothing to structure.
    EmptyDocument,
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::PartialOverlap {
                name,
                start,
                end,
                sibling,
                sibling_start,
                sibling_end,
            } => write!(
                f,
                "tag '{}' ({}-{}) overlaps '{}' ({}-{}); appended as sibling",
                name, start, end, sibling, sibling_start, sibling_end
            ),
            StructuralWarning::UnresolvedClaimReference {
                claim_number,
                referenced,
            } => write!(
                f,
                "claim {} refers to claim {}, which is not an earlier claim",
                claim_number, referenced
            ),
            StructuralWarning::OversizedClaimReference {
                claim_number,
                reference,
            } => write!(
                f,
                "claim {} refers to claim {}, which is not a valid claim number",
                claim_number, reference
            ),
            StructuralWarning::EmptyDocument => f.write_str("document has no tags to structure"),
        }
    }
}

/// Result wrapper that collects warnings without halting processing.
#[derive(Debug)]
pub struct ProcessResult<T> {
    pub value: T,
    pub warnings: Vec<StructuralWarning>,
}

impl<T> ProcessResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<StructuralWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Record a warning, logging it as it is collected.
    pub fn add_warning(&mut self, warning: StructuralWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Transform the value, keeping the collected warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProcessResult<U> {
        ProcessResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_result_collects_warnings() {
        let mut result = ProcessResult::ok(3);
        assert!(!result.has_warnings());

        result.add_warning(StructuralWarning::EmptyDocument);
        let mapped = result.map(|v| v * 2);
        assert_eq!(mapped.value, 6);
        assert_eq!(mapped.warnings, vec![StructuralWarning::EmptyDocument]);
    }

    #[test]
    fn test_error_messages() {
        let err = SectionError::TooManyTags { count: 12, max: 10 };
        assert_eq!(
            err.to_string(),
            "document has 12 tags, more than the configured maximum of 10"
        );

        let warning = StructuralWarning::UnresolvedClaimReference {
            claim_number: 2,
            referenced: 7,
        };
        assert_eq!(
            warning.to_string(),
            "claim 2 refers to claim 7, which is not an earlier claim"
        );
    }
}
