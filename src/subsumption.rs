//! Containment inference for flat tag lists.
//!
//! Flat sources (PubMed articles) come with a shallow list of possibly
//! overlapping tags. Instead of building a tree, every pair of sections is
//! compared and each section records which sections subsume it. Text that no
//! section covers is filled with synthesized `Unlabeled` sections.

use crate::section::{Section, SectionId, SectionIds};

/// Containment links of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLinks {
    /// Enclosing sections, nearest (smallest) first.
    pub subsumers: Vec<SectionId>,
    /// Sections this one encloses, in input order.
    pub subsumed: Vec<SectionId>,
}

impl SectionLinks {
    /// The immediately enclosing section.
    pub fn nearest(&self) -> Option<SectionId> {
        self.subsumers.first().copied()
    }

    /// The outermost enclosing section.
    pub fn outermost(&self) -> Option<SectionId> {
        self.subsumers.last().copied()
    }
}

/// Link every section to the sections that strictly subsume it.
///
/// Returns links aligned with `sections` and sets each section's `parent_id`
/// to its nearest subsumer. Compares all pairs, so callers bound the input
/// size through `SectionConfig::max_tags`.
pub fn link_sections(sections: &mut [Section]) -> Vec<SectionLinks> {
    let mut subsumers: Vec<Vec<usize>> = vec![Vec::new(); sections.len()];
    let mut links: Vec<SectionLinks> = vec![SectionLinks::default(); sections.len()];

    for (i, section) in sections.iter().enumerate() {
        for (j, other) in sections.iter().enumerate() {
            if section.is_subsumed_by(other) {
                subsumers[i].push(j);
                links[j].subsumed.push(section.id);
            }
        }
    }

    for (i, enclosing) in subsumers.iter_mut().enumerate() {
        enclosing.sort_by(|&a, &b| {
            sections[a]
                .len()
                .cmp(&sections[b].len())
                .then(sections[b].start.cmp(&sections[a].start))
        });
        links[i].subsumers = enclosing.iter().map(|&j| sections[j].id).collect();
        sections[i].parent_id = links[i].nearest();
    }

    links
}

/// Synthesize `Unlabeled` sections for text no section covers.
///
/// Walks the sections by start offset, tracking the furthest offset covered
/// so far; every stretch between that offset and the next section's start,
/// and any tail up to `doc_len`, becomes a gap section.
pub fn section_gaps(sections: &[Section], doc_len: usize, ids: &mut SectionIds) -> Vec<Section> {
    let mut sorted: Vec<&Section> = sections.iter().collect();
    sorted.sort_by_key(|s| s.start);

    let mut gaps = Vec::new();
    let mut covered = 0;
    for section in sorted {
        if section.start > covered {
            gaps.push(Section::unlabeled(ids.next_id(), covered, section.start));
        }
        covered = covered.max(section.end);
    }
    if doc_len > covered {
        gaps.push(Section::unlabeled(ids.next_id(), covered, doc_len));
    }
    gaps
}
