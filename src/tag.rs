//! Stand-off span annotations.
//!
//! A [`Tag`] is the raw structural signal produced upstream: a name, a
//! character range into the document text and a bag of attributes. Tags are
//! immutable once built; the hierarchy builders only ever read them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::text::DocumentText;

/// Attribute key holding the language of a tagged span.
pub const LANGUAGE_ATTR: &str = "lang";

/// Attribute key holding the header text that belongs to a tagged span.
pub const TITLE_ATTR: &str = "title";

/// A named character range with attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    /// Start offset in characters (inclusive).
    pub start: usize,
    /// End offset in characters (exclusive).
    pub end: usize,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Tag {
    /// Create a tag, rejecting inverted ranges.
    pub fn new(name: impl Into<String>, start: usize, end: usize) -> SectionResult<Self> {
        let name = name.into();
        if start > end {
            return Err(SectionError::InvalidSpan {
                name,
                start,
                end,
                reason: "start offset is after end offset".into(),
            });
        }
        Ok(Self {
            name,
            start,
            end,
            attributes: BTreeMap::new(),
        })
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Non-strict range inclusion: `other` lies within `self`.
    pub fn contains(&self, other: &Tag) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// True when the two ranges share at least one character.
    pub fn overlaps(&self, other: &Tag) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_contained_in(&self, start: usize, end: usize) -> bool {
        start <= self.start && end >= self.end
    }

    /// The tagged text.
    pub fn text<'a>(&self, doc: &DocumentText<'a>) -> &'a str {
        doc.slice(self.start, self.end)
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.start, self.end)
            .cmp(&(other.start, other.end))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.attributes.cmp(&other.attributes))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}-{}>", self.name, self.start, self.end)
    }
}

/// Strategy used to build the hierarchy for a document.
///
/// `Nested` sources already express structure through properly nested tags;
/// `Flat` sources carry a shallow, possibly overlapping tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Nested,
    Flat,
}

impl FromStr for SourceFormat {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NESTED" => Ok(SourceFormat::Nested),
            "FLAT" => Ok(SourceFormat::Flat),
            other => Err(SectionError::MalformedInput(format!(
                "no section builder registered for source format '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Nested => f.write_str("NESTED"),
            SourceFormat::Flat => f.write_str("FLAT"),
        }
    }
}
