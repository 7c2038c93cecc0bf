//! Processing text and fact file pairs into sect files.
//!
//! Every document is built on its own. A document that fails is logged,
//! recorded in the [`BatchReport`] and gets an empty `.sect` file so that
//! downstream tools still find one output per input; the batch moves on.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use layered_sections::{
    build_hierarchy, DocumentText, ProcessResult, SectionConfig, SectionError, SectionHierarchy, SectionWriter,
    LANGUAGE_ATTR,
};

use crate::adapters::{adapt_tags, FactKind};
use crate::collection::Collection;
use crate::errors::{CorpusError, CorpusResult};
use crate::fact::read_fact_file;

/// Settings shared by all documents of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Overrides the collection named in each fact file.
    pub collection: Option<Collection>,
    /// Overrides the language named in each fact file.
    pub language: Option<String>,
    /// Overrides fact flavor detection.
    pub fact_kind: Option<FactKind>,
    /// Write section text after each section line.
    pub verbose: bool,
    pub config: SectionConfig,
}

/// Input and output paths for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentJob {
    pub text_file: PathBuf,
    pub fact_file: PathBuf,
    pub sect_file: PathBuf,
}

impl DocumentJob {
    pub fn new(text_file: impl Into<PathBuf>, fact_file: impl Into<PathBuf>, sect_file: impl Into<PathBuf>) -> Self {
        Self {
            text_file: text_file.into(),
            fact_file: fact_file.into(),
            sect_file: sect_file.into(),
        }
    }
}

/// Result of one successfully processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub sections: usize,
    pub warnings: usize,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: usize,
    pub warnings: usize,
    /// Failed documents and why they failed.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A document's text together with its built hierarchy.
#[derive(Debug)]
pub struct BuiltDocument {
    pub text: String,
    pub result: ProcessResult<SectionHierarchy>,
}

/// Read, adapt and build one document without writing anything.
pub fn build_document(job: &DocumentJob, options: &BatchOptions) -> CorpusResult<BuiltDocument> {
    let text = fs::read_to_string(&job.text_file).map_err(|e| CorpusError::load(&job.text_file, e))?;
    let facts = read_fact_file(&job.fact_file)?;

    let collection = match (options.collection, facts.meta.collection.as_deref()) {
        (Some(collection), _) => collection,
        (None, Some(name)) => name.parse()?,
        (None, None) => {
            return Err(SectionError::MalformedInput(format!(
                "no collection given for {}",
                job.fact_file.display()
            ))
            .into())
        }
    };
    let kind = options.fact_kind.unwrap_or_else(|| FactKind::detect(&facts.tags));
    let language = options.language.as_deref().or(facts.meta.language.as_deref());

    let mut tags = adapt_tags(collection, kind, &facts.tags, &DocumentText::new(&text));
    if let Some(language) = language {
        for tag in tags.iter_mut() {
            tag.attributes
                .entry(LANGUAGE_ATTR.to_string())
                .or_insert_with(|| language.to_string());
        }
    }

    let result = build_hierarchy(&text, &tags, collection.format(), &options.config)?;
    Ok(BuiltDocument { text, result })
}

/// Build and write the sections of one document.
pub fn process_document(job: &DocumentJob, options: &BatchOptions) -> CorpusResult<DocumentOutcome> {
    let built = build_document(job, options)?;
    let doc = DocumentText::new(&built.text);

    let file = File::create(&job.sect_file).map_err(|e| CorpusError::load(&job.sect_file, e))?;
    let sections = SectionWriter::new()
        .verbose(options.verbose)
        .write(&built.result.value, &doc, BufWriter::new(file))
        .map_err(|e| CorpusError::load(&job.sect_file, e))?;

    Ok(DocumentOutcome {
        sections,
        warnings: built.result.warnings.len(),
    })
}

/// Process every job, isolating failures per document.
pub fn process_jobs(jobs: &[DocumentJob], options: &BatchOptions) -> BatchReport {
    let mut report = BatchReport::default();
    tracing::info!("processing {} documents", jobs.len());

    for (idx, job) in jobs.iter().enumerate() {
        tracing::info!("processing {} of {}: {}", idx + 1, jobs.len(), job.text_file.display());
        match process_document(job, options) {
            Ok(outcome) => {
                report.processed += 1;
                report.warnings += outcome.warnings;
            }
            Err(e) => {
                tracing::error!("{}: {}", job.text_file.display(), e);
                if let Err(write_err) = fs::write(&job.sect_file, "") {
                    tracing::error!(
                        "could not write placeholder {}: {}",
                        job.sect_file.display(),
                        write_err
                    );
                }
                report.failed.push((job.text_file.clone(), e.to_string()));
            }
        }
    }
    report
}

/// Jobs for every `.txt` file in `dir` that has a sister `.fact` file.
///
/// Outputs go next to the inputs with a `.sect` extension. Jobs are sorted by
/// path so runs are reproducible.
pub fn jobs_in_directory(dir: &Path) -> CorpusResult<Vec<DocumentJob>> {
    let mut jobs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CorpusError::load(dir, e))? {
        let path = entry.map_err(|e| CorpusError::load(dir, e))?.path();
        if path.extension().map_or(false, |e| e == "txt") {
            let fact_file = path.with_extension("fact");
            if fact_file.is_file() {
                let sect_file = path.with_extension("sect");
                jobs.push(DocumentJob::new(path, fact_file, sect_file));
            } else {
                tracing::debug!("skipping {}: no fact file", path.display());
            }
        }
    }
    jobs.sort_by(|a, b| a.text_file.cmp(&b.text_file));
    Ok(jobs)
}

/// Jobs for command-line inputs.
///
/// Three paths name one document's text, fact and sect files. A single path
/// is a directory of document pairs or else a list file. Any other count is
/// a usage error.
pub fn jobs_from_inputs(inputs: &[PathBuf]) -> CorpusResult<Vec<DocumentJob>> {
    match inputs {
        [text, fact, sect] => Ok(vec![DocumentJob::new(text, fact, sect)]),
        [dir] if dir.is_dir() => jobs_in_directory(dir),
        [list] => jobs_from_list(list),
        other => Err(SectionError::MalformedInput(format!(
            "expected TEXT FACT SECT, a directory or a list file, got {} paths",
            other.len()
        ))
        .into()),
    }
}

/// Jobs from a list file with a text, fact and sect path on every line.
pub fn jobs_from_list(list_file: &Path) -> CorpusResult<Vec<DocumentJob>> {
    let content = fs::read_to_string(list_file).map_err(|e| CorpusError::load(list_file, e))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [text, fact, sect] => Ok(DocumentJob::new(*text, *fact, *sect)),
            fields => Err(CorpusError::Parse {
                line: idx + 1,
                message: format!("expected 3 paths, found {}", fields.len()),
            }),
        })
        .collect()
}
