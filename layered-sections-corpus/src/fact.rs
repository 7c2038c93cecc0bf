//! Fact file reading.
//!
//! A fact file lists one annotation per line:
//!
//! ```text
//! DOCUMENT COLLECTION="LEXISNEXIS" LANGUAGE="ENGLISH"
//! STRUCTURE TYPE="ABSTRACT" START=0 END=412
//! fs:P standoff:offset=413 standoff:length=80
//! ```
//!
//! The first token is the tag name, the rest are `KEY=VALUE` pairs with
//! optionally double-quoted values. Offsets come either from `START`/`END` or
//! from `standoff:offset`/`standoff:length`. `DOCUMENT` lines carry document
//! metadata instead of a tag.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use layered_sections::Tag;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CorpusError, CorpusResult};

static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^\s=]+)=(?:"([^"]*)"|(\S*))"#).expect("Invalid attribute regex"));

const DOCUMENT: &str = "DOCUMENT";
const START: &str = "START";
const END: &str = "END";
const STANDOFF_OFFSET: &str = "standoff:offset";
const STANDOFF_LENGTH: &str = "standoff:length";

/// Document-level metadata from `DOCUMENT` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    pub collection: Option<String>,
    pub language: Option<String>,
}

/// A parsed fact file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactFile {
    pub meta: DocumentMeta,
    pub tags: Vec<Tag>,
}

/// Split a fact line into its name and attributes.
pub(crate) fn split_line(line: &str, line_no: usize) -> CorpusResult<(String, BTreeMap<String, String>)> {
    let parse_err = |message: String| CorpusError::Parse {
        line: line_no,
        message,
    };

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (line, ""),
    };
    if name.contains('=') {
        return Err(parse_err(format!("missing tag name before '{}'", name)));
    }

    let mut attributes = BTreeMap::new();
    let mut consumed = 0;
    for caps in ATTRIBUTE.captures_iter(rest) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        let skipped = &rest[consumed..whole.start];
        if !skipped.trim().is_empty() {
            return Err(parse_err(format!("unexpected text '{}'", skipped.trim())));
        }
        consumed = whole.end;

        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        attributes.insert(caps[1].to_string(), value.to_string());
    }
    let trailing = rest[consumed..].trim();
    if !trailing.is_empty() {
        return Err(parse_err(format!("unexpected text '{}'", trailing)));
    }

    Ok((name.to_string(), attributes))
}

fn take_offset(
    attributes: &mut BTreeMap<String, String>,
    key: &str,
    line_no: usize,
) -> CorpusResult<Option<usize>> {
    match attributes.remove(key) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| CorpusError::Parse {
            line: line_no,
            message: format!("{} is not an offset: '{}'", key, value),
        }),
    }
}

fn tag_from_line(
    name: String,
    mut attributes: BTreeMap<String, String>,
    line_no: usize,
) -> CorpusResult<Tag> {
    let start = take_offset(&mut attributes, START, line_no)?;
    let end = take_offset(&mut attributes, END, line_no)?;
    let offset = take_offset(&mut attributes, STANDOFF_OFFSET, line_no)?;
    let length = take_offset(&mut attributes, STANDOFF_LENGTH, line_no)?;

    let (start, end) = match (start, end, offset, length) {
        (Some(start), Some(end), _, _) => (start, end),
        (_, _, Some(offset), Some(length)) => match offset.checked_add(length) {
            Some(end) => (offset, end),
            None => {
                return Err(CorpusError::Parse {
                    line: line_no,
                    message: format!("tag '{}' ends past the largest offset", name),
                })
            }
        },
        _ => {
            return Err(CorpusError::Parse {
                line: line_no,
                message: format!("tag '{}' has no offsets", name),
            })
        }
    };

    let mut tag = Tag::new(name, start, end)?;
    tag.attributes = attributes;
    Ok(tag)
}

/// Parse the content of a fact file.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_facts(content: &str) -> CorpusResult<FactFile> {
    let mut facts = FactFile::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, mut attributes) = split_line(line, line_no)?;
        if name == DOCUMENT {
            if let Some(collection) = attributes.remove("COLLECTION") {
                facts.meta.collection = Some(collection);
            }
            if let Some(language) = attributes.remove("LANGUAGE") {
                facts.meta.language = Some(language);
            }
            continue;
        }
        facts.tags.push(tag_from_line(name, attributes, line_no)?);
    }

    tracing::debug!("read {} tags from fact data", facts.tags.len());
    Ok(facts)
}

/// Read and parse a fact file.
pub fn read_fact_file(path: &Path) -> CorpusResult<FactFile> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::load(path, e))?;
    parse_facts(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bae_and_basic_lines() {
        let content = r#"
# generated
DOCUMENT COLLECTION="LEXISNEXIS" LANGUAGE="ENGLISH"
STRUCTURE TYPE="ABSTRACT" START=0 END=412
fs:P standoff:offset=413 standoff:length=80 id=p1
"#;
        let facts = parse_facts(content).unwrap();
        assert_eq!(facts.meta.collection.as_deref(), Some("LEXISNEXIS"));
        assert_eq!(facts.meta.language.as_deref(), Some("ENGLISH"));
        assert_eq!(facts.tags.len(), 2);

        let structure = &facts.tags[0];
        assert_eq!((structure.name.as_str(), structure.start, structure.end), ("STRUCTURE", 0, 412));
        assert_eq!(structure.attr("TYPE"), Some("ABSTRACT"));
        assert_eq!(structure.attr("START"), None);

        let paragraph = &facts.tags[1];
        assert_eq!((paragraph.start, paragraph.end), (413, 493));
        assert_eq!(paragraph.attr("id"), Some("p1"));
    }

    #[test]
    fn test_quoted_values_keep_spaces() {
        let facts = parse_facts(r#"sec START=0 END=9 title="Materials and Methods""#).unwrap();
        assert_eq!(facts.tags[0].attr("title"), Some("Materials and Methods"));
    }

    #[test]
    fn test_missing_offsets() {
        let err = parse_facts("DOCUMENT COLLECTION=\"PUBMED\"\nsec TYPE=\"x\"").unwrap_err();
        assert!(matches!(err, CorpusError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_offset_and_stray_text() {
        assert!(matches!(
            parse_facts("p START=a END=3").unwrap_err(),
            CorpusError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            parse_facts("p START=1 junk END=3").unwrap_err(),
            CorpusError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_standoff_end_overflow() {
        let content = format!("p standoff:offset={} standoff:length=1", usize::MAX);
        assert!(matches!(
            parse_facts(&content).unwrap_err(),
            CorpusError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_inverted_span_is_a_section_error() {
        let err = parse_facts("p START=5 END=3").unwrap_err();
        assert!(matches!(err, CorpusError::Section(_)));
    }
}
