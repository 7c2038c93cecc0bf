//! Line-oriented section output.
//!
//! Each non-empty section becomes one line:
//!
//! ```text
//! SECTION ID=3 PARENT_ID=1 STRUCT="claim" TYPE="CLAIMS|CLAIM" START=120 END=180 CLAIM_NUMBER=2 PARENT_CLAIMS=1
//! ```
//!
//! Fields in brackets of the grammar are written only when present:
//! `PARENT_ID`, `STRUCT`, `TYPE`, `LANGUAGE`, `TITLE`, `CLAIM_NUMBER`,
//! `PARENT_CLAIMS`. Sections whose text is only whitespace are skipped.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::hierarchy::SectionHierarchy;
use crate::section::Section;
use crate::text::DocumentText;

/// Longest text written in verbose mode before the middle is elided.
const VERBOSE_MAX_CHARS: usize = 2000;
/// Characters kept from each end of an elided text.
const VERBOSE_KEEP_CHARS: usize = 900;

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize one section, or `None` when its text is blank.
pub fn section_line(section: &Section, doc: &DocumentText<'_>) -> Option<String> {
    if section.text(doc).trim().is_empty() {
        return None;
    }

    let mut line = format!("SECTION ID={}", section.id);
    if let Some(parent_id) = section.parent_id {
        let _ = write!(line, " PARENT_ID={}", parent_id);
    }
    if let Some(name) = section.name() {
        let _ = write!(line, " STRUCT=\"{}\"", name);
    }
    if !section.types.is_empty() {
        let _ = write!(line, " TYPE=\"{}\"", section.types.to_string().to_uppercase());
    }
    if let Some(language) = section.language() {
        let _ = write!(line, " LANGUAGE=\"{}\"", language);
    }
    if let Some(header) = section.header.as_deref().map(normalize_whitespace) {
        if !header.is_empty() {
            let _ = write!(line, " TITLE=\"{}\"", header);
        }
    }
    let _ = write!(line, " START={} END={}", section.start, section.end);
    if let Some(claim) = &section.claim {
        let _ = write!(line, " CLAIM_NUMBER={}", claim.claim_number);
        if !claim.parent_claims.is_empty() {
            let _ = write!(line, " PARENT_CLAIMS={}", join_numbers(&claim.parent_claims));
        }
    }
    Some(line)
}

/// Writes section lines for a whole hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionWriter {
    /// Follow each line with the section text, long texts elided in the middle.
    pub verbose: bool,
}

impl SectionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Write one line per non-blank section, in document order.
    ///
    /// Returns the number of sections written.
    pub fn write<W: Write>(
        &self,
        hierarchy: &SectionHierarchy,
        doc: &DocumentText<'_>,
        mut writer: W,
    ) -> io::Result<usize> {
        let mut written = 0;
        for section in hierarchy.iter() {
            let Some(line) = section_line(section, doc) else {
                continue;
            };
            writeln!(writer, "{}", line)?;
            if self.verbose {
                writeln!(writer, "{}", verbose_text(section.text(doc)))?;
            }
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}

fn verbose_text(text: &str) -> String {
    let count = text.chars().count();
    if count < VERBOSE_MAX_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(VERBOSE_KEEP_CHARS).collect();
    let tail: String = text.chars().skip(count - VERBOSE_KEEP_CHARS).collect();
    format!("{}  [...]  {}", head, tail)
}

/// Write one line per non-blank section, in document order.
pub fn write_sections<W: Write>(
    hierarchy: &SectionHierarchy,
    doc: &DocumentText<'_>,
    writer: W,
) -> io::Result<usize> {
    SectionWriter::new().write(hierarchy, doc, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{ClaimInfo, TypeSet};
    use crate::tag::Tag;

    #[test]
    fn test_full_line() {
        let text = "1. A method.2. The method of claim 1.";
        let doc = DocumentText::new(text);
        let tag = Tag::new("claim", 12, 37)
            .unwrap()
            .with_attr("lang", "en")
            .with_attr("title", "  Second\n claim ");
        let mut section = Section::from_tag(3, &tag);
        section.parent_id = Some(1);
        section.types = ["Claims", "Claim"].into_iter().collect::<TypeSet>();
        section.claim = Some(ClaimInfo {
            claim_number: 2,
            parent_claims: vec![1],
        });

        insta::assert_snapshot!(section_line(&section, &doc).unwrap(), @r###"SECTION ID=3 PARENT_ID=1 STRUCT="claim" TYPE="CLAIMS|CLAIM" LANGUAGE="en" TITLE="Second claim" START=12 END=37 CLAIM_NUMBER=2 PARENT_CLAIMS=1"###);
    }

    #[test]
    fn test_gap_line_has_no_struct() {
        let doc = DocumentText::new("untagged text");
        let section = Section::unlabeled(4, 0, 13);
        insta::assert_snapshot!(section_line(&section, &doc).unwrap(), @r###"SECTION ID=4 TYPE="UNLABELED" START=0 END=13"###);
    }

    #[test]
    fn test_blank_sections_are_skipped() {
        let doc = DocumentText::new("a  \n b");
        assert!(section_line(&Section::unlabeled(1, 1, 4), &doc).is_none());
        assert!(section_line(&Section::unlabeled(1, 2, 2), &doc).is_none());
    }

    #[test]
    fn test_claim_without_references() {
        let doc = DocumentText::new("1. A method.");
        let mut section = Section::from_tag(1, &Tag::new("claim", 0, 12).unwrap());
        section.claim = Some(ClaimInfo {
            claim_number: 1,
            parent_claims: Vec::new(),
        });
        let line = section_line(&section, &doc).unwrap();
        assert!(line.ends_with("START=0 END=12 CLAIM_NUMBER=1"));
    }

    #[test]
    fn test_verbose_text_elides_long_sections() {
        let long = "a".repeat(1000) + &"b".repeat(1500);
        let out = verbose_text(&long);
        assert!(out.starts_with(&"a".repeat(900)));
        assert!(out.contains("  [...]  "));
        assert!(out.ends_with(&"b".repeat(900)));
        assert_eq!(verbose_text("short"), "short");
    }
}
