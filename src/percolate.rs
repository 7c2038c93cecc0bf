//! Type percolation.
//!
//! Two passes assign section types once the structure exists:
//!
//! 1. Inherent types come from tag names ("claim" carries `Claim`). In a tree
//!    they accumulate downwards, so a child always holds its ancestors' types.
//! 2. Header types come from classifying heading text. They are copied to the
//!    heading and to the sections that follow it in document order, up to the
//!    next heading or the start of the claims block.
//!
//! Both passes read the current types and return new [`TypeSet`]s instead of
//! editing sections in place.

use std::collections::HashMap;

use crate::config::SectionConfig;
use crate::section::{Section, SectionId, TypeSet, CLAIMS};
use crate::text::DocumentText;

/// Compute inherent types for sections listed parents-first.
///
/// With `inherit` set, each section starts from its parent's computed types
/// (tree strategy); otherwise only from its own current types (flat strategy).
/// The tag name's inherent types are appended in both cases.
pub fn inherent_types(sections: &[Section], config: &SectionConfig, inherit: bool) -> Vec<TypeSet> {
    let mut computed: HashMap<SectionId, TypeSet> = HashMap::with_capacity(sections.len());
    let mut result = Vec::with_capacity(sections.len());

    for section in sections {
        let base = match section.parent_id.and_then(|p| computed.get(&p)) {
            Some(parent_types) if inherit => parent_types.extended(section.types.iter()),
            _ => section.types.clone(),
        };
        let own = section
            .name()
            .map(|name| config.inherent_types_for(name))
            .unwrap_or(&[]);
        let types = base.extended(own.iter().map(String::as_str));

        computed.insert(section.id, types.clone());
        result.push(types);
    }

    result
}

/// Compute types after copying header-derived labels forward.
///
/// `sections` must be in document order. Each heading is classified; its
/// labels go to the heading itself and to every following section until the
/// next heading or a section named `claims`.
pub fn header_types(sections: &[Section], doc: &DocumentText<'_>, config: &SectionConfig) -> Vec<TypeSet> {
    let mut types: Vec<TypeSet> = sections.iter().map(|s| s.types.clone()).collect();

    for (i, section) in sections.iter().enumerate() {
        if !section.is_heading() {
            continue;
        }
        let labels = config.rules.classify(section.text(doc));
        if labels.is_empty() {
            continue;
        }

        add_header_types(&mut types[i], &labels);
        for (j, next) in sections.iter().enumerate().skip(i + 1) {
            if next.is_heading() || next.is_named(CLAIMS) {
                break;
            }
            add_header_types(&mut types[j], &labels);
        }
    }

    types
}

/// Add labels from a heading unless a label repeats the closest type.
///
/// The closest type is the last label the section held before this heading's
/// labels were applied.
// TODO: decide whether back-to-back headings should merge their labels.
// Today the second heading resets them.
fn add_header_types(types: &mut TypeSet, labels: &[String]) {
    let closest = types.last().map(str::to_string);
    for label in labels {
        if closest.as_deref() != Some(label.as_str()) {
            types.insert(label.as_str());
        }
    }
}

/// Apply inherent then header percolation, returning sections with new types.
pub fn percolate(
    mut sections: Vec<Section>,
    doc: &DocumentText<'_>,
    config: &SectionConfig,
    inherit: bool,
) -> Vec<Section> {
    let inherent = inherent_types(&sections, config, inherit);
    for (section, types) in sections.iter_mut().zip(inherent) {
        section.types = types;
    }
    let with_headers = header_types(&sections, doc, config);
    for (section, types) in sections.iter_mut().zip(with_headers) {
        section.types = types;
    }
    sections
}
