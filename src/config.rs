//! Builder configuration.
//!
//! Every knob has a default matching the patent/biomedical setup, so an empty
//! TOML file (or no file at all) yields [`SectionConfig::default`].
//!
//! ```toml
//! strictness = "strict"
//! max_tags = 500
//! header_max_chars = 60
//!
//! [inherent_types]
//! claim = ["Claim"]
//!
//! [[rules]]
//! label = "Background"
//! include = ["background"]
//! exclude = []
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::RuleTable;
use crate::errors::{SectionError, SectionResult};

/// How the tree builder treats tags that overlap without nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Append the tag as a sibling and report a warning.
    Lenient,
    /// Reject the document.
    Strict,
}

impl Default for Strictness {
    fn default() -> Self {
        Strictness::Lenient
    }
}

/// Paragraphs that are short and contain one of these are treated as headings.
const HEADER_PARAGRAPHS: &[&str] = &[
    "summary",
    "summary of invention",
    "summary of the invention",
    "background",
    "background of invention",
    "background of the invention",
    "background art",
    "description of prior art",
    "description of related art",
    "field",
    "field of invention",
    "field of the invention",
];

/// Structural tag names and the section types they carry by themselves.
const INHERENT_TYPES: &[(&str, &str)] = &[
    ("date", "Meta-Date"),
    ("invention-title", "Meta-Title"),
    ("abstract", "Abstract"),
    ("description", "Description"),
    ("related-apps", "Related_Applications"),
    ("summary", "Summary"),
    ("heading", "Header"),
    ("claims", "Claims"),
    ("claim", "Claim"),
];

/// Configuration for building section hierarchies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Treatment of overlapping-but-not-nested tags in the tree builder.
    pub strictness: Strictness,
    /// Reject documents with more tags than this. `None` disables the check.
    pub max_tags: Option<usize>,
    /// Paragraphs at or above this many characters are never headings.
    pub header_max_chars: usize,
    /// Substrings that mark a short paragraph as a heading.
    pub header_phrases: Vec<String>,
    /// Tag names eligible for heading detection.
    pub paragraph_names: Vec<String>,
    /// Tag name to inherent section types.
    pub inherent_types: BTreeMap<String, Vec<String>>,
    /// Header classification rules.
    pub rules: RuleTable,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            max_tags: Some(10_000),
            header_max_chars: 50,
            header_phrases: HEADER_PARAGRAPHS.iter().map(|s| s.to_string()).collect(),
            paragraph_names: vec!["p".to_string(), "paragraph".to_string()],
            inherent_types: INHERENT_TYPES
                .iter()
                .map(|(name, label)| (name.to_string(), vec![label.to_string()]))
                .collect(),
            rules: RuleTable::standard(),
        }
    }
}

impl SectionConfig {
    /// Load from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> SectionResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SectionError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
            .map_err(|e| SectionError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> SectionResult<Self> {
        toml::from_str(content).map_err(|e| SectionError::Config(e.to_string()))
    }

    pub fn strict(mut self) -> Self {
        self.strictness = Strictness::Strict;
        self
    }

    /// Types a tag name contributes on its own.
    pub fn inherent_types_for(&self, name: &str) -> &[String] {
        self.inherent_types
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_paragraph(&self, name: &str) -> bool {
        self.paragraph_names.iter().any(|p| p == name)
    }

    /// Whether a paragraph's text reads as a heading.
    ///
    /// The text is trimmed, lowercased and whitespace-collapsed before the
    /// length check and the phrase lookup.
    pub fn text_is_header(&self, text: &str) -> bool {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        normalized.chars().count() < self.header_max_chars
            && self
                .header_phrases
                .iter()
                .any(|phrase| normalized.contains(phrase.as_str()))
    }
}
