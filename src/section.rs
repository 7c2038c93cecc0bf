//! Typed sections, the output unit of hierarchy building.

use std::fmt;

use crate::tag::{Tag, LANGUAGE_ATTR, TITLE_ATTR};
use crate::text::DocumentText;

/// Structural name of heading paragraphs.
pub const HEADING: &str = "heading";
/// Structural name of a single claim.
pub const CLAIM: &str = "claim";
/// Structural name of the block holding all claims.
pub const CLAIMS: &str = "claims";
/// Type of synthesized sections covering untagged text.
pub const UNLABELED_TYPE: &str = "Unlabeled";

/// Per-document section identifier.
pub type SectionId = u32;

/// Hands out section ids for one document, starting at 1.
///
/// Each build owns its own generator, so ids never leak across documents.
#[derive(Debug, Clone)]
pub struct SectionIds {
    next: SectionId,
}

impl SectionIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> SectionId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for SectionIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered set of type labels.
///
/// Keeps insertion order, which matters for header propagation, and never
/// stores the same label twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeSet {
    labels: Vec<String>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label. Returns false if it was already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// A new set holding `self` followed by `more`.
    pub fn extended<I, S>(&self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = self.clone();
        for label in more {
            set.insert(label);
        }
        set
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// The most recently appended label.
    pub fn last(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_superset(&self, other: &TypeSet) -> bool {
        other.iter().all(|label| self.contains(label))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl<S: Into<String>> FromIterator<S> for TypeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TypeSet::new().extended(iter)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("|"))
    }
}

/// Claim numbering attached to claim sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimInfo {
    /// Position of the claim in document order, starting at 1.
    pub claim_number: u32,
    /// Claim numbers referenced in the claim text, in order of appearance.
    pub parent_claims: Vec<u32>,
}

/// A typed, positioned and optionally parented stretch of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub parent_id: Option<SectionId>,
    /// Structural name taken from the originating tag. `None` for gap sections.
    pub name: Option<String>,
    pub types: TypeSet,
    pub header: Option<String>,
    pub start: usize,
    pub end: usize,
    /// The originating tag. `None` for gap sections.
    pub tag: Option<Tag>,
    pub claim: Option<ClaimInfo>,
}

impl Section {
    /// A section materialized from a tag.
    ///
    /// A `title` attribute on the tag becomes the section header.
    pub fn from_tag(id: SectionId, tag: &Tag) -> Self {
        Self {
            id,
            parent_id: None,
            name: Some(tag.name.clone()),
            types: TypeSet::new(),
            header: tag.attr(TITLE_ATTR).map(str::to_string),
            start: tag.start,
            end: tag.end,
            tag: Some(tag.clone()),
            claim: None,
        }
    }

    /// A synthesized section covering untagged text.
    pub fn unlabeled(id: SectionId, start: usize, end: usize) -> Self {
        Self {
            id,
            parent_id: None,
            name: None,
            types: std::iter::once(UNLABELED_TYPE).collect(),
            header: None,
            start,
            end,
            tag: None,
            claim: None,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'a>(&self, doc: &DocumentText<'a>) -> &'a str {
        doc.slice(self.start, self.end)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn is_heading(&self) -> bool {
        self.is_named(HEADING)
    }

    pub fn is_claim(&self) -> bool {
        self.is_named(CLAIM)
    }

    pub fn language(&self) -> Option<&str> {
        self.tag.as_ref().and_then(|t| t.attr(LANGUAGE_ATTR))
    }

    /// True if `other` strictly subsumes `self`: it encloses the range and is longer.
    pub fn is_subsumed_by(&self, other: &Section) -> bool {
        other.start <= self.start && other.end >= self.end && other.len() > self.len()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pid = self
            .parent_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "<{} id={} pid={} start={} end={} types='{}'",
            self.name().unwrap_or("nil"),
            self.id,
            pid,
            self.start,
            self.end,
            self.types
        )?;
        if let Some(header) = &self.header {
            write!(f, " header='{}'", header)?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut ids = SectionIds::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(SectionIds::new().next_id(), 1);
    }

    #[test]
    fn test_type_set_keeps_order_without_duplicates() {
        let mut types: TypeSet = ["Description", "Background"].into_iter().collect();
        assert!(!types.insert("Description"));
        assert!(types.insert("Field"));
        assert_eq!(types.as_slice(), ["Description", "Background", "Field"]);
        assert_eq!(types.last(), Some("Field"));
        assert_eq!(types.to_string(), "Description|Background|Field");
    }

    #[test]
    fn test_type_set_extended_is_a_new_value() {
        let parent: TypeSet = ["Claims"].into_iter().collect();
        let child = parent.extended(["Claim"]);
        assert_eq!(parent.len(), 1);
        assert!(child.is_superset(&parent));
        assert_eq!(child.last(), Some("Claim"));
    }

    #[test]
    fn test_subsumption_is_strict() {
        let tag = Tag::new("sec", 0, 10).unwrap();
        let outer = Section::from_tag(1, &tag);
        let same = Section::from_tag(2, &tag);
        let inner = Section::unlabeled(3, 2, 5);
        assert!(inner.is_subsumed_by(&outer));
        assert!(!outer.is_subsumed_by(&inner));
        assert!(!same.is_subsumed_by(&outer));
    }

    #[test]
    fn test_title_attribute_becomes_header() {
        let tag = Tag::new("sec", 0, 10).unwrap().with_attr("title", "Results");
        let section = Section::from_tag(1, &tag);
        assert_eq!(section.header.as_deref(), Some("Results"));
        assert_eq!(section.to_string(), "<sec id=1 pid=None start=0 end=10 types='' header='Results'>");
    }
}
