//! Corpus-level statistics over section types.

use std::collections::HashMap;

use layered_sections::{Section, SectionHierarchy};

/// The `top_n` most frequent type labels across documents, most frequent
/// first. Ties are broken alphabetically.
pub fn most_common_types(documents: &[SectionHierarchy], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for section in documents.iter().flat_map(SectionHierarchy::iter) {
        for label in section.types.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(top_n);
    counts
}

/// Fraction of documents with at least one section of the given type.
pub fn type_frequency(label: &str, documents: &[SectionHierarchy]) -> f64 {
    if documents.is_empty() {
        return 0.0;
    }
    let with_type = documents
        .iter()
        .filter(|doc| doc.sections_of_type(label).next().is_some())
        .count();
    with_type as f64 / documents.len() as f64
}

fn subsumers<'a>(hierarchy: &'a SectionHierarchy, section: &'a Section) -> impl Iterator<Item = &'a Section> + 'a {
    hierarchy.iter().filter(move |other| section.is_subsumed_by(other))
}

/// Fraction of the corpus text that sits in sections of the given type.
///
/// The total is the length of all outermost sections. A section counts
/// toward the type only when no enclosing section already has it, so nested
/// sections are not counted twice.
pub fn type_weight(label: &str, documents: &[SectionHierarchy]) -> f64 {
    let mut type_length = 0;
    let mut total_length = 0;

    for hierarchy in documents {
        for section in hierarchy.iter() {
            let mut enclosing = subsumers(hierarchy, section).peekable();
            let outermost = enclosing.peek().is_none();
            let inherited = enclosing.any(|s| s.types.contains(label));
            if outermost {
                total_length += section.len();
            }
            if section.types.contains(label) && !inherited {
                type_length += section.len();
            }
        }
    }

    if total_length == 0 {
        0.0
    } else {
        type_length as f64 / total_length as f64
    }
}
