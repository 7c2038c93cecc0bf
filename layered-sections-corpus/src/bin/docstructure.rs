//! Build `.sect` files from text and fact files.
//!
//! Usage:
//!   docstructure doc.txt doc.fact doc.sect   # one document
//!   docstructure corpus/                     # every .txt with a sister .fact
//!   docstructure files.txt                   # "text fact sect" per line
//!
//! Set `RUST_LOG=info` to see per-document progress.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use layered_sections::{HierarchyDisplay, SectionConfig};
use layered_sections_corpus::{
    build_document, jobs_from_inputs, process_jobs, BatchOptions, Collection, CorpusResult, DocumentJob, FactKind,
};

#[derive(Parser, Debug)]
#[command(name = "docstructure")]
#[command(about = "Build document section hierarchies from text and fact files")]
struct Args {
    /// A text file followed by its fact and sect files, a directory, or a list file
    #[arg(required = true, num_args = 1..=3)]
    inputs: Vec<PathBuf>,

    /// Collection of the documents (PUBMED, LEXISNEXIS, CNKI)
    #[arg(long, short = 'c')]
    collection: Option<Collection>,

    /// Language recorded on every section
    #[arg(long, short = 'l')]
    language: Option<String>,

    /// Fact file flavor (BAE or BASIC); detected when omitted
    #[arg(long)]
    fact_type: Option<FactKind>,

    /// TOML file with section name mappings and rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write each section's text after its line
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print the section tree of each document instead of writing sect files
    #[arg(long)]
    tree: bool,
}

fn print_trees(jobs: &[DocumentJob], options: &BatchOptions) -> bool {
    let mut clean = true;
    for job in jobs {
        match build_document(job, options) {
            Ok(built) => {
                println!("{}", job.text_file.display());
                print!("{}", HierarchyDisplay::new(&built.result.value, &built.text));
            }
            Err(e) => {
                tracing::error!("{}: {}", job.text_file.display(), e);
                clean = false;
            }
        }
    }
    clean
}

fn run(args: Args) -> CorpusResult<bool> {
    let config = match &args.config {
        Some(path) => SectionConfig::load(path)?,
        None => SectionConfig::default(),
    };
    let options = BatchOptions {
        collection: args.collection,
        language: args.language,
        fact_kind: args.fact_type,
        verbose: args.verbose,
        config,
    };

    let jobs = jobs_from_inputs(&args.inputs)?;
    if jobs.is_empty() {
        tracing::warn!("no documents to process");
        return Ok(true);
    }

    if args.tree {
        return Ok(print_trees(&jobs, &options));
    }

    let report = process_jobs(&jobs, &options);
    eprintln!(
        "{} of {} documents processed, {} warnings",
        report.processed,
        report.total(),
        report.warnings
    );
    for (path, reason) in &report.failed {
        eprintln!("  failed: {}: {}", path.display(), reason);
    }
    Ok(report.is_clean())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("docstructure: {}", e);
            ExitCode::from(2)
        }
    }
}
