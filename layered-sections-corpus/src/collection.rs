use std::fmt;
use std::str::FromStr;

use layered_sections::{SectionError, SourceFormat};

/// Source collection a document was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Biomedical articles. Flat title/sec annotations.
    Pubmed,
    /// English patents.
    LexisNexis,
    /// Chinese patents and articles.
    Cnki,
}

impl Collection {
    /// Hierarchy strategy for documents of this collection.
    pub fn format(self) -> SourceFormat {
        match self {
            Collection::Pubmed => SourceFormat::Flat,
            Collection::LexisNexis | Collection::Cnki => SourceFormat::Nested,
        }
    }
}

impl FromStr for Collection {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PUBMED" => Ok(Collection::Pubmed),
            "LEXISNEXIS" => Ok(Collection::LexisNexis),
            "CNKI" => Ok(Collection::Cnki),
            other => Err(SectionError::MalformedInput(format!(
                "no section builder registered for collection '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Pubmed => f.write_str("PUBMED"),
            Collection::LexisNexis => f.write_str("LEXISNEXIS"),
            Collection::Cnki => f.write_str("CNKI"),
        }
    }
}
