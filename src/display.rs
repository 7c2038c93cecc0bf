//! Human-readable tree view of a section hierarchy.
//!
//! Used for debugging builds: each section is printed under its parent with
//! its offsets, types and the start of its text.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::hierarchy::SectionHierarchy;
use crate::section::Section;
use crate::text::DocumentText;

const INDENT: usize = 3;
const DEFAULT_SNIPPET_WIDTH: usize = 60;

/// Cut `text` to at most `max_width` display columns, never splitting a
/// grapheme cluster. Newlines are shown escaped.
fn snippet(text: &str, max_width: usize) -> String {
    let flat = text.replace('\n', "\\n");
    if UnicodeWidthStr::width(flat.as_str()) <= max_width {
        return flat;
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for grapheme in flat.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if width + w > budget {
            break;
        }
        width += w;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}

/// Indented tree view of a [`SectionHierarchy`].
///
/// ```text
/// <description id=1 start=0 end=57> [Description]
///    <heading id=2 start=0 end=27> [Description|Header|Background] "BACKGROUND OF THE INVENTION"
///    <p id=3 start=28 end=57> [Description|Background] "Widgets are known in the art."
/// ```
pub struct HierarchyDisplay<'a> {
    hierarchy: &'a SectionHierarchy,
    doc: DocumentText<'a>,
    snippet_width: usize,
}

impl<'a> HierarchyDisplay<'a> {
    pub fn new(hierarchy: &'a SectionHierarchy, text: &'a str) -> Self {
        Self {
            hierarchy,
            doc: DocumentText::new(text),
            snippet_width: DEFAULT_SNIPPET_WIDTH,
        }
    }

    /// Display width of text snippets; 0 hides them.
    pub fn snippet_width(mut self, width: usize) -> Self {
        self.snippet_width = width;
        self
    }

    fn write_section(&self, f: &mut fmt::Formatter<'_>, section: &Section, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}<{} id={} start={} end={}> [{}]",
            "",
            section.name().unwrap_or("-"),
            section.id,
            section.start,
            section.end,
            section.types,
            indent = depth * INDENT
        )?;
        if let Some(claim) = &section.claim {
            write!(f, " claim={}", claim.claim_number)?;
        }
        if self.snippet_width > 0 {
            let text = section.text(&self.doc).trim();
            if !text.is_empty() {
                write!(f, " \"{}\"", snippet(text, self.snippet_width))?;
            }
        }
        writeln!(f)?;

        for child in self.hierarchy.children(section.id) {
            // Depth is bounded by the section count; parent ids only point outwards.
            if depth < self.hierarchy.len() {
                self.write_section(f, child, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl<'a> fmt::Display for HierarchyDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in self.hierarchy.roots() {
            self.write_section(f, root, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionConfig;
    use crate::hierarchy::build_hierarchy;
    use crate::tag::{SourceFormat, Tag};

    #[test]
    fn test_snippet_respects_display_width() {
        assert_eq!(snippet("short", 10), "short");
        assert_eq!(snippet("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each.
        assert_eq!(snippet("日本語テキスト", 7), "日本語…");
        assert_eq!(snippet("a\nb", 10), "a\\nb");
    }

    #[test]
    fn test_tree_view() {
        let text = "BACKGROUND OF THE INVENTION\nWidgets are known in the art.";
        let tags = vec![
            Tag::new("description", 0, 57).unwrap(),
            Tag::new("p", 0, 27).unwrap(),
            Tag::new("p", 28, 57).unwrap(),
        ];
        let hierarchy = build_hierarchy(text, &tags, SourceFormat::Nested, &SectionConfig::default())
            .unwrap()
            .value;
        let display = HierarchyDisplay::new(&hierarchy, text).snippet_width(20);

        insta::assert_snapshot!(display, @r###"
        <description id=1 start=0 end=57> [Description] "BACKGROUND OF THE I…"
           <heading id=2 start=0 end=27> [Description|Header|Background] "BACKGROUND OF THE I…"
           <p id=3 start=28 end=57> [Description|Background] "Widgets are known i…"
        "###);
    }
}
