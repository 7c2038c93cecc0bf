//! Containment tree for properly nested tags.
//!
//! In a [`SectionTree`] every child's range is (i) embedded in the range of
//! its parent, (ii) precedes the range of its right sibling and (iii) follows
//! the range of its left sibling. Sources whose markup already expresses the
//! document structure (patents, CNKI articles) are built this way.

use crate::config::{SectionConfig, Strictness};
use crate::errors::{ProcessResult, SectionError, SectionResult, StructuralWarning};
use crate::hierarchy::validate_tags;
use crate::section::{Section, SectionIds, HEADING};
use crate::tag::Tag;
use crate::text::DocumentText;

const ROOT: &str = "root";

/// A node in the containment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Structural name, initially the tag name. Heading detection may rename it.
    pub name: String,
    pub start: usize,
    pub end: usize,
    /// The originating tag. `None` only for the synthetic root.
    pub tag: Option<Tag>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_tag(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            start: tag.start,
            end: tag.end,
            tag: Some(tag.clone()),
            children: Vec::new(),
        }
    }

    /// Non-strict containment of another node's range.
    pub fn contains(&self, other: &TreeNode) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    fn overlaps(&self, other: &TreeNode) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_heading(&self) -> bool {
        self.name == HEADING
    }

    pub fn text<'a>(&self, doc: &DocumentText<'a>) -> &'a str {
        doc.slice(self.start, self.end)
    }

    /// Insert a node that this node contains.
    ///
    /// The node goes to the first child that contains it; otherwise it becomes
    /// the last child. Children it overlaps without nesting are left where they
    /// are, so no reparenting ever happens.
    fn insert(
        &mut self,
        new_node: TreeNode,
        strictness: Strictness,
        warnings: &mut Vec<StructuralWarning>,
    ) -> SectionResult<()> {
        if let Some(child) = self.children.iter_mut().find(|c| c.contains(&new_node)) {
            return child.insert(new_node, strictness, warnings);
        }

        if let Some(sibling) = self.children.iter().find(|c| c.overlaps(&new_node)) {
            match strictness {
                Strictness::Strict => {
                    return Err(SectionError::OverlappingTags {
                        name: new_node.name.clone(),
                        start: new_node.start,
                        end: new_node.end,
                        other: sibling.name.clone(),
                        other_start: sibling.start,
                        other_end: sibling.end,
                    })
                }
                Strictness::Lenient => warnings.push(StructuralWarning::PartialOverlap {
                    name: new_node.name.clone(),
                    start: new_node.start,
                    end: new_node.end,
                    sibling: sibling.name.clone(),
                    sibling_start: sibling.start,
                    sibling_end: sibling.end,
                }),
            }
        }

        self.children.push(new_node);
        Ok(())
    }

    fn sort(&mut self) {
        self.children.sort_by_key(|c| c.start);
        for child in &mut self.children {
            child.sort();
        }
    }

    fn find_headers(&mut self, doc: &DocumentText<'_>, config: &SectionConfig) {
        for child in &mut self.children {
            if config.is_paragraph(&child.name) && config.text_is_header(child.text(doc)) {
                child.name = HEADING.to_string();
            }
            child.find_headers(doc, config);
        }
    }

    fn collect<'a>(&'a self, nodes: &mut Vec<&'a TreeNode>) {
        for child in &self.children {
            nodes.push(child);
            child.collect(nodes);
        }
    }

    fn collect_sections(
        &self,
        parent_id: Option<u32>,
        ids: &mut SectionIds,
        sections: &mut Vec<Section>,
    ) {
        for child in &self.children {
            let Some(tag) = &child.tag else { continue };
            let mut section = Section::from_tag(ids.next_id(), tag);
            section.name = Some(child.name.clone());
            section.parent_id = parent_id;
            let id = section.id;
            sections.push(section);
            child.collect_sections(Some(id), ids, sections);
        }
    }
}

/// Containment tree over a document's tags.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTree {
    pub root: TreeNode,
}

impl SectionTree {
    /// Build the tree from tags that are expected to nest.
    ///
    /// Tags are inserted by ascending start offset, longer tags first when two
    /// start at the same offset, so an enclosing tag is always in place before
    /// the tags it encloses.
    pub fn build(
        doc: &DocumentText<'_>,
        tags: &[Tag],
        config: &SectionConfig,
    ) -> SectionResult<ProcessResult<SectionTree>> {
        validate_tags(doc, tags, config)?;

        let mut sorted: Vec<&Tag> = tags.iter().collect();
        sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut root = TreeNode {
            name: ROOT.to_string(),
            start: 0,
            end: doc.len(),
            tag: None,
            children: Vec::new(),
        };
        let mut warnings = Vec::new();
        for tag in sorted {
            root.insert(TreeNode::from_tag(tag), config.strictness, &mut warnings)?;
        }
        root.sort();

        let mut result = ProcessResult::ok(SectionTree { root });
        for warning in warnings {
            result.add_warning(warning);
        }
        Ok(result)
    }

    /// Rename short header-like paragraphs to `heading`.
    pub fn find_headers(&mut self, doc: &DocumentText<'_>, config: &SectionConfig) {
        self.root.find_headers(doc, config);
    }

    /// All nodes except the root, in document (pre-)order.
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut nodes = Vec::new();
        self.root.collect(&mut nodes);
        nodes
    }

    /// Materialize one section per node, in pre-order, with ids from `ids`.
    ///
    /// Children of the root get no parent id. Types are left empty.
    pub fn to_sections(&self, ids: &mut SectionIds) -> Vec<Section> {
        let mut sections = Vec::new();
        self.root.collect_sections(None, ids, &mut sections);
        sections
    }
}
