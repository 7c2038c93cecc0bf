//! Building the typed section hierarchy for one document.
//!
//! [`build_hierarchy`] chooses between the two strategies by [`SourceFormat`]:
//!
//! - `Nested`: containment tree, heading detection, inherent types
//!   accumulated down the tree ([`build_nested`]).
//! - `Flat`: pairwise subsumption, gap filling, own inherent types only
//!   ([`build_flat`]).
//!
//! Both then copy header types forward and number the claims. Every call
//! starts its own id sequence at 1 and shares no state with other calls, so
//! documents can be built in parallel by the caller.

use crate::claims::extract_claims;
use crate::config::SectionConfig;
use crate::errors::{ProcessResult, SectionError, SectionResult, StructuralWarning};
use crate::percolate::percolate;
use crate::section::{Section, SectionId, SectionIds};
use crate::subsumption::{link_sections, section_gaps};
use crate::tag::{SourceFormat, Tag};
use crate::text::DocumentText;
use crate::tree::SectionTree;

/// The typed sections of one document, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHierarchy {
    pub format: SourceFormat,
    pub sections: Vec<Section>,
}

impl SectionHierarchy {
    pub fn empty(format: SourceFormat) -> Self {
        Self {
            format,
            sections: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn parent(&self, id: SectionId) -> Option<&Section> {
        self.get(id)?.parent_id.and_then(|pid| self.get(pid))
    }

    /// Sections without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.parent_id.is_none())
    }

    /// Direct children of a section, in document order.
    pub fn children(&self, id: SectionId) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(move |s| s.parent_id == Some(id))
    }

    /// Enclosing sections of `id`, nearest first.
    pub fn ancestors(&self, id: SectionId) -> Vec<&Section> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(section) = current {
            // A parent chain never revisits a section; the bound guards bad input.
            if ancestors.len() > self.sections.len() {
                break;
            }
            ancestors.push(section);
            current = self.parent(section.id);
        }
        ancestors
    }

    /// Claim sections, in claim number order.
    pub fn claims(&self) -> Vec<&Section> {
        let mut claims: Vec<&Section> = self.sections.iter().filter(|s| s.claim.is_some()).collect();
        claims.sort_by_key(|s| s.claim.as_ref().map(|c| c.claim_number));
        claims
    }

    /// Sections carrying the given type label.
    pub fn sections_of_type<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections.iter().filter(move |s| s.types.contains(label))
    }
}

/// Reject tag lists that no builder should process.
///
/// Checks the configured tag budget first so oversized inputs never reach the
/// quadratic comparison, then checks that every tag lies inside the document.
pub(crate) fn validate_tags(
    doc: &DocumentText<'_>,
    tags: &[Tag],
    config: &SectionConfig,
) -> SectionResult<()> {
    if let Some(max) = config.max_tags {
        if tags.len() > max {
            return Err(SectionError::TooManyTags {
                count: tags.len(),
                max,
            });
        }
    }

    for tag in tags {
        if tag.start > tag.end {
            return Err(SectionError::InvalidSpan {
                name: tag.name.clone(),
                start: tag.start,
                end: tag.end,
                reason: "start offset is after end offset".into(),
            });
        }
        if tag.end > doc.len() {
            return Err(SectionError::InvalidSpan {
                name: tag.name.clone(),
                start: tag.start,
                end: tag.end,
                reason: format!("document has only {} characters", doc.len()),
            });
        }
    }
    Ok(())
}

fn document_order(sections: &mut [Section]) {
    sections.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.id.cmp(&b.id))
    });
}

/// Build the hierarchy for one document with the chosen strategy.
pub fn build_hierarchy(
    text: &str,
    tags: &[Tag],
    format: SourceFormat,
    config: &SectionConfig,
) -> SectionResult<ProcessResult<SectionHierarchy>> {
    let doc = DocumentText::new(text);
    let mut result = match format {
        SourceFormat::Nested => build_nested(&doc, tags, config)?,
        SourceFormat::Flat => build_flat(&doc, tags, config)?,
    };
    if tags.is_empty() {
        result.add_warning(StructuralWarning::EmptyDocument);
    }

    let claims = extract_claims(&mut result.value.sections, &doc);
    for warning in claims.warnings {
        result.add_warning(warning);
    }

    tracing::debug!(
        format = %format,
        sections = result.value.len(),
        warnings = result.warnings.len(),
        "built section hierarchy"
    );
    Ok(result)
}

/// Tree strategy for tags that nest properly.
pub fn build_nested(
    doc: &DocumentText<'_>,
    tags: &[Tag],
    config: &SectionConfig,
) -> SectionResult<ProcessResult<SectionHierarchy>> {
    let built = SectionTree::build(doc, tags, config)?;
    let warnings = built.warnings;
    let mut tree = built.value;
    tree.find_headers(doc, config);

    let mut ids = SectionIds::new();
    let mut sections = percolate(tree.to_sections(&mut ids), doc, config, true);
    document_order(&mut sections);

    Ok(ProcessResult::with_warnings(
        SectionHierarchy {
            format: SourceFormat::Nested,
            sections,
        },
        warnings,
    ))
}

/// Subsumption strategy for flat, possibly overlapping tags.
pub fn build_flat(
    doc: &DocumentText<'_>,
    tags: &[Tag],
    config: &SectionConfig,
) -> SectionResult<ProcessResult<SectionHierarchy>> {
    validate_tags(doc, tags, config)?;

    let mut ids = SectionIds::new();
    let mut sections: Vec<Section> = tags
        .iter()
        .map(|tag| Section::from_tag(ids.next_id(), tag))
        .collect();
    let gaps = section_gaps(&sections, doc.len(), &mut ids);
    sections.extend(gaps);
    link_sections(&mut sections);
    document_order(&mut sections);

    let sections = percolate(sections, doc, config, false);
    Ok(ProcessResult::ok(SectionHierarchy {
        format: SourceFormat::Flat,
        sections,
    }))
}
