//! Normalizing collection-specific tags into structural tags.
//!
//! Builders only understand a small vocabulary of structural names
//! (`abstract`, `description`, `heading`, `p`, `claims`, `claim`, ...). Each
//! collection and fact flavor spells these differently, so the adapters here
//! rename what they recognize and drop everything else.

use std::fmt;
use std::str::FromStr;

use layered_sections::{DocumentText, SectionError, Tag, CLAIM, CLAIMS, HEADING, TITLE_ATTR};

use crate::collection::Collection;

const STRUCTURE: &str = "STRUCTURE";
const TYPE_ATTR: &str = "TYPE";

/// BAE structure types and the structural names they map to.
const BAE_STRUCTURES: &[(&str, &str)] = &[
    ("SECTITLE", HEADING),
    ("TEXT", "p"),
    ("ABSTRACT", "abstract"),
    ("SUMMARY", "summary"),
    ("RELATED_APPLICATIONS", "related-apps"),
    ("TEXT_CHUNK", "description"),
    ("CLAIMS", CLAIMS),
];

/// Basic standoff tag names and the structural names they map to. Names that
/// are already structural map to themselves.
const BASIC_NAMES: &[(&str, &str)] = &[
    ("fs:P", "p"),
    ("p", "p"),
    ("fs:AbstractBlock", "abstract"),
    ("abstract", "abstract"),
    ("heading", HEADING),
    ("summary", "summary"),
    ("related-apps", "related-apps"),
    ("description", "description"),
    ("claims", CLAIMS),
    ("claim", CLAIM),
    ("invention-title", "invention-title"),
    ("publication-reference", "publication-reference"),
];

/// Furthest a BAE title may end before the text it heads starts.
const MAX_TITLE_LEAD: usize = 30;
/// Furthest a BAE title may start after the text it heads starts.
const MAX_TITLE_FOLLOW: usize = 30;

/// Flavor of a fact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactKind {
    /// `STRUCTURE TYPE="..."` lines from the BAE wrapper.
    Bae,
    /// Tags named after the source XML elements.
    Basic,
}

impl FactKind {
    /// BAE output is recognized by its `STRUCTURE` tags.
    pub fn detect(tags: &[Tag]) -> Self {
        if tags.iter().any(|t| t.name == STRUCTURE) {
            FactKind::Bae
        } else {
            FactKind::Basic
        }
    }
}

impl FromStr for FactKind {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BAE" => Ok(FactKind::Bae),
            "BASIC" => Ok(FactKind::Basic),
            other => Err(SectionError::MalformedInput(format!("unknown fact type '{}'", other))),
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactKind::Bae => f.write_str("BAE"),
            FactKind::Basic => f.write_str("BASIC"),
        }
    }
}

fn renamed(tag: &Tag, name: &str) -> Tag {
    let mut tag = tag.clone();
    tag.name = name.to_string();
    tag
}

fn structure_type(tag: &Tag) -> Option<&str> {
    if tag.name == STRUCTURE {
        tag.attr(TYPE_ATTR)
    } else {
        None
    }
}

/// Rename BAE structures to structural names.
///
/// Text paragraphs inside the first claims block become `claim` tags.
pub fn bae_patent_tags(tags: &[Tag]) -> Vec<Tag> {
    let claims_block = tags
        .iter()
        .find(|t| structure_type(t) == Some("CLAIMS"))
        .map(|t| (t.start, t.end));

    tags.iter()
        .filter_map(|tag| {
            let kind = structure_type(tag)?;
            let (_, name) = BAE_STRUCTURES.iter().find(|(k, _)| *k == kind)?;
            let in_claims = claims_block.map_or(false, |(s, e)| tag.is_contained_in(s, e));
            if kind == "TEXT" && in_claims {
                Some(renamed(tag, CLAIM))
            } else {
                Some(renamed(tag, name))
            }
        })
        .collect()
}

/// Rename basic standoff tags to structural names.
///
/// `date` tags are kept only inside the publication reference.
pub fn basic_patent_tags(tags: &[Tag]) -> Vec<Tag> {
    let reference = tags
        .iter()
        .find(|t| t.name == "publication-reference")
        .map(|t| (t.start, t.end));

    tags.iter()
        .filter_map(|tag| {
            if tag.name == "date" {
                let (s, e) = reference?;
                return tag.is_contained_in(s, e).then(|| tag.clone());
            }
            BASIC_NAMES
                .iter()
                .find(|(source, _)| *source == tag.name)
                .map(|(_, name)| renamed(tag, name))
        })
        .collect()
}

fn titled(section: &Tag, title: &Tag, doc: &DocumentText<'_>) -> Tag {
    let mut section = renamed(section, "sec");
    section
        .attributes
        .insert(TITLE_ATTR.to_string(), title.text(doc).to_string());
    section
}

/// Pair PubMed `title` tags with the `sec` tags they head.
///
/// A title heads the section starting at the same offset. The title becomes
/// a `heading` tag and the section gets the title text as its `title`
/// attribute and starts after the title. Unpaired titles and sections are
/// dropped; `abstract` tags are kept.
pub fn pubmed_tags(tags: &[Tag], doc: &DocumentText<'_>) -> Vec<Tag> {
    let mut out = Vec::new();
    for title in tags.iter().filter(|t| t.name == "title") {
        let Some(section) = tags.iter().find(|t| t.name == "sec" && t.start == title.start) else {
            tracing::debug!("title {} heads no section", title);
            continue;
        };
        let mut section = titled(section, title, doc);
        section.start = title.end.saturating_add(1).min(section.end);
        out.push(renamed(title, HEADING));
        out.push(section);
    }
    out.extend(tags.iter().filter(|t| t.name == "abstract").cloned());
    out
}

/// Pair BAE `TITLE` structures with the text structure each one heads.
///
/// Candidates start close to the title; the smallest `TEXT_CHUNK` wins, or
/// else the largest `TEXT`.
pub fn bae_pubmed_tags(tags: &[Tag], doc: &DocumentText<'_>) -> Vec<Tag> {
    let texts: Vec<&Tag> = tags
        .iter()
        .filter(|t| structure_type(t).map_or(false, |k| k.starts_with("TEXT")))
        .collect();

    let mut out = Vec::new();
    for title in tags.iter().filter(|t| structure_type(t) == Some("TITLE")) {
        let candidates: Vec<&Tag> = texts
            .iter()
            .copied()
            .filter(|t| {
                title.start < t.start.saturating_add(MAX_TITLE_FOLLOW)
                    && t.start < title.end.saturating_add(MAX_TITLE_LEAD)
            })
            .collect();
        let chunk = candidates
            .iter()
            .filter(|t| structure_type(t) == Some("TEXT_CHUNK"))
            .min_by_key(|t| t.len());
        let best = chunk.or_else(|| {
            candidates
                .iter()
                .filter(|t| structure_type(t) == Some("TEXT"))
                .max_by_key(|t| t.len())
        });
        if let Some(best) = best {
            out.push(renamed(title, HEADING));
            out.push(titled(best, title, doc));
        }
    }
    out.extend(
        tags.iter()
            .filter(|t| structure_type(t) == Some("ABSTRACT"))
            .map(|t| renamed(t, "abstract")),
    );
    out
}

/// Normalize a document's tags for its collection.
pub fn adapt_tags(collection: Collection, kind: FactKind, tags: &[Tag], doc: &DocumentText<'_>) -> Vec<Tag> {
    let adapted = match (collection, kind) {
        (Collection::Pubmed, FactKind::Basic) => pubmed_tags(tags, doc),
        (Collection::Pubmed, FactKind::Bae) => bae_pubmed_tags(tags, doc),
        (_, FactKind::Bae) => bae_patent_tags(tags),
        (_, FactKind::Basic) => basic_patent_tags(tags),
    };
    tracing::debug!(
        collection = %collection,
        kind = %kind,
        "kept {} of {} tags",
        adapted.len(),
        tags.len()
    );
    adapted
}
