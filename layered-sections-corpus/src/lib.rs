//! Corpus tooling for layered-sections.
//!
//! Reads the text and fact files produced by upstream extraction, normalizes
//! collection-specific tags, builds section hierarchies and writes `.sect`
//! files. Also reads `.sect` files back and computes corpus statistics.
//!
//! ## Example
//!
//! ```
//! use layered_sections::{build_hierarchy, DocumentText};
//! use layered_sections_corpus::{adapt_tags, parse_facts, Collection, FactKind};
//!
//! let text = "Methods\nWe measured widgets.";
//! let facts = parse_facts("DOCUMENT COLLECTION=\"PUBMED\"\nsec START=0 END=28\ntitle START=0 END=7\n").unwrap();
//! let collection: Collection = facts.meta.collection.as_deref().unwrap().parse().unwrap();
//!
//! let tags = adapt_tags(collection, FactKind::detect(&facts.tags), &facts.tags, &DocumentText::new(text));
//! let result = build_hierarchy(text, &tags, collection.format(), &Default::default()).unwrap();
//! let methods: Vec<_> = result.value.sections_of_type("Methods").map(|s| (s.start, s.end)).collect();
//! assert!(methods.contains(&(8, 28)));
//! ```

mod adapters;
mod analytics;
mod batch;
mod collection;
mod errors;
mod fact;
mod sect;

pub use adapters::{adapt_tags, bae_patent_tags, bae_pubmed_tags, basic_patent_tags, pubmed_tags, FactKind};
pub use analytics::{most_common_types, type_frequency, type_weight};
pub use batch::{
    build_document, jobs_from_inputs, jobs_from_list, jobs_in_directory, process_document, process_jobs,
    BatchOptions, BatchReport, BuiltDocument, DocumentJob, DocumentOutcome,
};
pub use collection::Collection;
pub use errors::{CorpusError, CorpusResult};
pub use fact::{parse_facts, read_fact_file, DocumentMeta, FactFile};
pub use sect::{parse_section_line, parse_sections, SectReader, SectionRecord};
