//! Typed section hierarchies over stand-off annotated documents.
//!
//! Upstream extraction produces a document's plain text plus a list of named
//! character ranges ([`Tag`]s). This crate turns those ranges into
//! [`Section`]s that know their parent, carry semantic types (`Abstract`,
//! `Background`, `Claim`, ...) and, for patent claims, their claim number and
//! the earlier claims they refer to.
//!
//! ## Strategies
//!
//! - [`SourceFormat::Nested`] builds a containment tree ([`SectionTree`]).
//!   Used for sources whose markup nests properly.
//! - [`SourceFormat::Flat`] compares every pair of tags for subsumption and
//!   fills untagged text with `Unlabeled` sections.
//!
//! ## Example
//!
//! ```
//! use layered_sections::{build_hierarchy, SectionConfig, SourceFormat, Tag};
//!
//! let text = "ABSTRACT\nThis is the abstract. CLAIMS\n1. A method of X.\n2. The method of claim 1 wherein Y.";
//! let tags = vec![
//!     Tag::new("abstract", 0, 30).unwrap(),
//!     Tag::new("claims", 31, 91).unwrap(),
//!     Tag::new("claim", 38, 55).unwrap(),
//!     Tag::new("claim", 56, 91).unwrap(),
//! ];
//!
//! let result = build_hierarchy(text, &tags, SourceFormat::Nested, &SectionConfig::default()).unwrap();
//! let claims = result.value.claims();
//! assert_eq!(claims.len(), 2);
//! assert_eq!(claims[1].claim.as_ref().unwrap().parent_claims, vec![1]);
//! ```

mod claims;
mod classify;
mod config;
mod display;
mod errors;
mod hierarchy;
mod percolate;
mod section;
mod serialize;
mod subsumption;
mod tag;
mod text;
mod tree;

#[cfg(test)]
mod tests {
    mod patent;
    mod pubmed;
    mod sect_output;
}

// Input model
pub use tag::{SourceFormat, Tag, LANGUAGE_ATTR, TITLE_ATTR};
pub use text::DocumentText;

// Errors and warnings
pub use errors::{ProcessResult, SectionError, SectionResult, StructuralWarning};

// Configuration and classification
pub use classify::{normalize_header, RuleTable, TypeRule, OTHER_TYPE};
pub use config::{SectionConfig, Strictness};

// Sections and hierarchy building
pub use hierarchy::{build_flat, build_hierarchy, build_nested, SectionHierarchy};
pub use section::{
    ClaimInfo, Section, SectionId, SectionIds, TypeSet, CLAIM, CLAIMS, HEADING, UNLABELED_TYPE,
};
pub use subsumption::{link_sections, section_gaps, SectionLinks};
pub use tree::{SectionTree, TreeNode};

// Passes
pub use claims::{claim_references, extract_claims};
pub use percolate::{header_types, inherent_types, percolate};

// Output
pub use display::HierarchyDisplay;
pub use serialize::{section_line, write_sections, SectionWriter};
