//! Article-shaped documents built with the flat strategy.

use crate::{build_hierarchy, SectionConfig, SectionHierarchy, SourceFormat, Tag, UNLABELED_TYPE};

fn flat(text: &str, tags: &[Tag]) -> SectionHierarchy {
    build_hierarchy(text, tags, SourceFormat::Flat, &SectionConfig::default())
        .unwrap()
        .value
}

#[test]
fn test_single_gap_between_disjoint_tags() {
    let text = "a".repeat(30);
    let tags = vec![Tag::new("sec", 0, 10).unwrap(), Tag::new("sec", 20, 30).unwrap()];
    let hierarchy = flat(&text, &tags);

    let unlabeled: Vec<_> = hierarchy.sections_of_type(UNLABELED_TYPE).collect();
    assert_eq!(unlabeled.len(), 1);
    assert_eq!((unlabeled[0].start, unlabeled[0].end), (10, 20));
    assert_eq!(unlabeled[0].id, 3);

    let order: Vec<_> = hierarchy.iter().map(|s| (s.id, s.start)).collect();
    assert_eq!(order, vec![(1, 0), (3, 10), (2, 20)]);
}

#[test]
fn test_titled_sections() {
    let text = "Methods\nWe measured widgets.\nResults\nWidgets grew.";
    let tags = vec![
        Tag::new("article", 0, 50).unwrap(),
        Tag::new("heading", 0, 7).unwrap(),
        Tag::new("sec", 8, 28).unwrap().with_attr("title", "Methods"),
        Tag::new("heading", 29, 36).unwrap(),
        Tag::new("sec", 37, 50).unwrap().with_attr("title", "Results"),
    ];
    let hierarchy = flat(text, &tags);

    // The article covers everything, so nothing is unlabeled.
    assert_eq!(hierarchy.sections_of_type(UNLABELED_TYPE).count(), 0);
    assert_eq!(hierarchy.len(), 5);
    assert!(hierarchy.iter().skip(1).all(|s| s.parent_id == Some(1)));

    let summary: Vec<(Option<&str>, Vec<&str>)> = hierarchy
        .iter()
        .map(|s| (s.header.as_deref(), s.types.iter().collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (None, vec![]),
            (None, vec!["Header", "Methods"]),
            (Some("Methods"), vec!["Methods"]),
            (None, vec!["Header", "Results"]),
            (Some("Results"), vec!["Results"]),
        ]
    );
}

#[test]
fn test_flat_sections_keep_only_own_inherent_types() {
    let text = "x".repeat(20);
    let tags = vec![Tag::new("abstract", 0, 20).unwrap(), Tag::new("p", 5, 10).unwrap()];
    let hierarchy = flat(&text, &tags);

    let inner = hierarchy.get(2).unwrap();
    assert_eq!(inner.parent_id, Some(1));
    assert!(inner.types.is_empty());
    assert_eq!(hierarchy.get(1).unwrap().types.as_slice(), ["Abstract"]);
}

#[test]
fn test_overlapping_tags_are_accepted() {
    let text = "x".repeat(40);
    let tags = vec![Tag::new("sec", 0, 25).unwrap(), Tag::new("sec", 15, 40).unwrap()];
    let result = build_hierarchy(&text, &tags, SourceFormat::Flat, &SectionConfig::default().strict()).unwrap();
    assert!(!result.has_warnings());
    assert!(result.value.iter().all(|s| s.parent_id.is_none()));
    assert_eq!(result.value.len(), 2);
}
