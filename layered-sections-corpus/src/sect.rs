//! Reading section files back.
//!
//! A sect file is the line output of `layered_sections::write_sections`.
//! [`SectReader`] loads it next to the document text so callers can pull out
//! the text of every section with a given type or structural name.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use layered_sections::DocumentText;

use crate::errors::{CorpusError, CorpusResult};
use crate::fact::split_line;

const SECTION: &str = "SECTION";

/// One `SECTION` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRecord {
    pub id: u32,
    pub parent_id: Option<u32>,
    pub struct_name: Option<String>,
    /// Upper-cased type labels, as written.
    pub types: Vec<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub start: usize,
    pub end: usize,
    pub claim_number: Option<u32>,
    pub parent_claims: Vec<u32>,
}

impl SectionRecord {
    pub fn has_type(&self, section_type: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(section_type))
    }

    pub fn text<'a>(&self, doc: &DocumentText<'a>) -> &'a str {
        doc.slice(self.start, self.end)
    }
}

fn number<T: std::str::FromStr>(key: &str, value: &str, line: usize) -> CorpusResult<T> {
    value.parse().map_err(|_| CorpusError::Parse {
        line,
        message: format!("{} is not a number: '{}'", key, value),
    })
}

/// Parse one `SECTION` line.
pub fn parse_section_line(line: &str, line_no: usize) -> CorpusResult<SectionRecord> {
    let (name, attributes) = split_line(line.trim(), line_no)?;
    if name != SECTION {
        return Err(CorpusError::Parse {
            line: line_no,
            message: format!("expected SECTION, found '{}'", name),
        });
    }

    let mut record = SectionRecord::default();
    for (key, value) in attributes {
        match key.as_str() {
            "ID" => record.id = number(&key, &value, line_no)?,
            "PARENT_ID" => record.parent_id = Some(number(&key, &value, line_no)?),
            "STRUCT" => record.struct_name = Some(value),
            "TYPE" => record.types = value.split('|').map(str::to_string).collect(),
            "LANGUAGE" => record.language = Some(value),
            "TITLE" => record.title = Some(value),
            "START" => record.start = number(&key, &value, line_no)?,
            "END" => record.end = number(&key, &value, line_no)?,
            "CLAIM_NUMBER" => record.claim_number = Some(number(&key, &value, line_no)?),
            "PARENT_CLAIMS" => {
                record.parent_claims = value
                    .split(',')
                    .map(|c| number(&key, c, line_no))
                    .collect::<CorpusResult<_>>()?
            }
            _ => tracing::warn!("line {}: unknown section field {}={}", line_no, key, value),
        }
    }
    Ok(record)
}

/// Parse a sect file, skipping lines that are not `SECTION` lines.
///
/// Verbose output interleaves section text with the section lines; that text
/// is ignored.
pub fn parse_sections(content: &str) -> CorpusResult<Vec<SectionRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.starts_with("SECTION "))
        .map(|(idx, line)| parse_section_line(line, idx + 1))
        .collect()
}

/// A document's text together with its section records.
#[derive(Debug, Clone)]
pub struct SectReader {
    text: String,
    records: Vec<SectionRecord>,
}

impl SectReader {
    pub fn new(text: String, records: Vec<SectionRecord>) -> Self {
        Self { text, records }
    }

    /// Load a text file and its sect file.
    pub fn open(text_file: &Path, sect_file: &Path) -> CorpusResult<Self> {
        let text = fs::read_to_string(text_file).map_err(|e| CorpusError::load(text_file, e))?;
        let sect = fs::read_to_string(sect_file).map_err(|e| CorpusError::load(sect_file, e))?;
        Ok(Self::new(text, parse_sections(&sect)?))
    }

    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    pub fn doc(&self) -> DocumentText<'_> {
        DocumentText::new(&self.text)
    }

    /// Sections matching a type and/or a structural name.
    ///
    /// With both filters the result is their intersection; with neither it is
    /// empty.
    pub fn select(&self, section_type: Option<&str>, struct_name: Option<&str>) -> Vec<&SectionRecord> {
        if section_type.is_none() && struct_name.is_none() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| section_type.map_or(true, |t| r.has_type(t)))
            .filter(|r| struct_name.map_or(true, |s| r.struct_name.as_deref() == Some(s)))
            .collect()
    }

    /// All section types in the document, sorted.
    pub fn section_types(&self) -> Vec<&str> {
        let types: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.types.iter().map(String::as_str))
            .collect();
        types.into_iter().collect()
    }

    /// All structural names in the document, sorted.
    pub fn section_structs(&self) -> Vec<&str> {
        let structs: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.struct_name.as_deref())
            .collect();
        structs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECT: &str = r#"SECTION ID=1 STRUCT="abstract" TYPE="ABSTRACT" LANGUAGE="en" TITLE="Short summary" START=0 END=30
SECTION ID=2 STRUCT="claims" TYPE="CLAIMS" START=31 END=91
SECTION ID=3 PARENT_ID=2 STRUCT="claim" TYPE="CLAIMS|CLAIM" START=38 END=55 CLAIM_NUMBER=1
SECTION ID=4 PARENT_ID=2 STRUCT="claim" TYPE="CLAIMS|CLAIM" START=56 END=91 CLAIM_NUMBER=2 PARENT_CLAIMS=1,1
"#;

    #[test]
    fn test_parse_records() {
        let records = parse_sections(SECT).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].title.as_deref(), Some("Short summary"));
        assert_eq!(records[0].language.as_deref(), Some("en"));
        assert_eq!(records[3].parent_id, Some(2));
        assert_eq!(records[3].claim_number, Some(2));
        assert_eq!(records[3].parent_claims, vec![1, 1]);
        assert_eq!(records[3].types, vec!["CLAIMS", "CLAIM"]);
    }

    #[test]
    fn test_select_by_type_and_struct() {
        let text = "ABSTRACT\nThis is the abstract. CLAIMS\n1. A method of X.\n2. The method of claim 1 wherein Y.";
        let reader = SectReader::new(text.to_string(), parse_sections(SECT).unwrap());

        let claims = reader.select(Some("claim"), None);
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].text(&reader.doc()), "1. A method of X.");

        assert_eq!(reader.select(Some("CLAIMS"), Some("claims")).len(), 1);
        assert_eq!(reader.select(None, Some("claim")).len(), 2);
        assert!(reader.select(None, None).is_empty());
        assert_eq!(reader.section_types(), vec!["ABSTRACT", "CLAIM", "CLAIMS"]);
        assert_eq!(reader.section_structs(), vec!["abstract", "claim", "claims"]);
    }

    #[test]
    fn test_bad_number() {
        let err = parse_section_line("SECTION ID=x START=0 END=1", 7).unwrap_err();
        assert!(matches!(err, CorpusError::Parse { line: 7, .. }));
    }
}
