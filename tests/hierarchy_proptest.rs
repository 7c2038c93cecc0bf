//! Property-based tests for hierarchy building
//!
//! These cover the structural guarantees callers rely on:
//! - Nested builds keep children inside parents and siblings disjoint
//! - Flat builds pick the nearest subsumer and cover every character
//! - Types only grow from parent to child
//! - Claim numbering is contiguous and stable across reruns
//! - Header classification is deterministic

use layered_sections::{
    build_hierarchy, extract_claims, DocumentText, RuleTable, SectionConfig, SectionHierarchy, SourceFormat, Tag,
    UNLABELED_TYPE,
};
use proptest::prelude::*;

const DOC_LEN: usize = 120;

/// Tag names that never trigger heading detection.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("description".to_string()),
        Just("abstract".to_string()),
        Just("claims".to_string()),
        Just("claim".to_string()),
        Just("sec".to_string()),
    ]
}

fn tag_strategy() -> impl Strategy<Value = Tag> {
    (0..=DOC_LEN, 0..=DOC_LEN, name_strategy()).prop_map(|(a, b, name)| {
        Tag::new(name, a.min(b), a.max(b)).unwrap()
    })
}

fn tags_strategy() -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec(tag_strategy(), 0..24)
}

/// Drop every tag that partially overlaps one already kept.
fn laminar(tags: Vec<Tag>) -> Vec<Tag> {
    let mut kept: Vec<Tag> = Vec::new();
    for tag in tags {
        let nests = kept
            .iter()
            .all(|k| !k.overlaps(&tag) || k.contains(&tag) || tag.contains(k));
        if nests {
            kept.push(tag);
        }
    }
    kept
}

fn text() -> String {
    "x".repeat(DOC_LEN)
}

fn build(tags: &[Tag], format: SourceFormat) -> SectionHierarchy {
    build_hierarchy(&text(), tags, format, &SectionConfig::default())
        .unwrap()
        .value
}

fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_nested_children_inside_parents(tags in tags_strategy()) {
            let tags = laminar(tags);
            let result = build_hierarchy(&text(), &tags, SourceFormat::Nested, &SectionConfig::default().strict());
            prop_assert!(result.is_ok());
            let hierarchy = result.unwrap().value;
            prop_assert_eq!(hierarchy.len(), tags.len());

            for section in hierarchy.iter() {
                if let Some(parent) = hierarchy.parent(section.id) {
                    prop_assert!(parent.start <= section.start && section.end <= parent.end);
                }
            }
        }

        #[test]
        fn test_nested_siblings_are_ordered_and_disjoint(tags in tags_strategy()) {
            let hierarchy = build(&laminar(tags), SourceFormat::Nested);
            let mut parents: Vec<Option<u32>> = hierarchy.iter().map(|s| s.parent_id).collect();
            parents.dedup();

            for parent in parents {
                let siblings: Vec<_> = hierarchy.iter().filter(|s| s.parent_id == parent).collect();
                for pair in siblings.windows(2) {
                    prop_assert!(pair[0].start <= pair[1].start);
                    prop_assert!(!ranges_overlap((pair[0].start, pair[0].end), (pair[1].start, pair[1].end)));
                }
            }
        }

        #[test]
        fn test_flat_parent_is_nearest_subsumer(tags in tags_strategy()) {
            let hierarchy = build(&tags, SourceFormat::Flat);
            for section in hierarchy.iter() {
                let subsumers: Vec<_> = hierarchy.iter().filter(|o| section.is_subsumed_by(o)).collect();
                match hierarchy.parent(section.id) {
                    None => prop_assert!(subsumers.is_empty()),
                    Some(parent) => {
                        prop_assert!(section.is_subsumed_by(parent));
                        prop_assert!(subsumers.iter().all(|o| o.len() >= parent.len()));
                    }
                }
            }
        }

        #[test]
        fn test_flat_gaps_cover_untagged_text(tags in tags_strategy()) {
            let hierarchy = build(&tags, SourceFormat::Flat);
            for offset in 0..DOC_LEN {
                prop_assert!(hierarchy.iter().any(|s| s.start <= offset && offset < s.end));
            }
            for gap in hierarchy.sections_of_type(UNLABELED_TYPE) {
                prop_assert!(!gap.is_empty());
                prop_assert!(tags.iter().all(|t| !ranges_overlap((t.start, t.end), (gap.start, gap.end))));
            }
        }

        #[test]
        fn test_nested_types_only_grow_downwards(tags in tags_strategy()) {
            let hierarchy = build(&laminar(tags), SourceFormat::Nested);
            for section in hierarchy.iter() {
                if let Some(parent) = hierarchy.parent(section.id) {
                    prop_assert!(section.types.is_superset(&parent.types));
                }
            }
        }

        #[test]
        fn test_claim_numbers_contiguous_and_stable(tags in tags_strategy(), nested in any::<bool>()) {
            let format = if nested { SourceFormat::Nested } else { SourceFormat::Flat };
            let tags = if nested { laminar(tags) } else { tags };
            let mut hierarchy = build(&tags, format);

            let mut claims: Vec<_> = hierarchy.iter().filter(|s| s.is_claim()).collect();
            claims.sort_by_key(|s| s.start);
            let numbers: Vec<u32> = claims.iter().map(|s| s.claim.as_ref().unwrap().claim_number).collect();
            let expected: Vec<u32> = (1..=claims.len() as u32).collect();
            prop_assert_eq!(numbers, expected);

            let before = hierarchy.sections.clone();
            let text = text();
            extract_claims(&mut hierarchy.sections, &DocumentText::new(&text));
            prop_assert_eq!(hierarchy.sections, before);
        }

        #[test]
        fn test_classifier_is_deterministic(header in "[A-Za-z ,'-]{0,40}") {
            let rules = RuleTable::standard();
            let first = rules.classify(&header);
            prop_assert!(!first.is_empty());
            prop_assert_eq!(first, rules.classify(&header));
        }

        #[test]
        fn test_numbered_background_header_is_only_background(
            prefix in "[0-9.: ]{0,6}",
            upper in any::<bool>(),
        ) {
            let header = format!("{}Background of the Invention", prefix);
            let header = if upper { header.to_uppercase() } else { header };
            prop_assert_eq!(RuleTable::standard().classify(&header), vec!["Background".to_string()]);
        }
    }
}
