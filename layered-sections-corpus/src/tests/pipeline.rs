//! Text and fact files in, sect files out, and back again.

use std::fs;

use tempfile::TempDir;

use crate::{process_document, BatchOptions, Collection, DocumentJob, SectReader};

fn run(text: &str, facts: &str, options: &BatchOptions) -> (TempDir, DocumentJob) {
    let dir = TempDir::new().unwrap();
    let job = DocumentJob::new(
        dir.path().join("doc.txt"),
        dir.path().join("doc.fact"),
        dir.path().join("doc.sect"),
    );
    fs::write(&job.text_file, text).unwrap();
    fs::write(&job.fact_file, facts).unwrap();
    process_document(&job, options).unwrap();
    (dir, job)
}

#[test]
fn test_bae_patent() {
    let text = "BACKGROUND OF THE INVENTION\nWidgets are known.\nWhat is claimed is:\n1. A widget.\n2. The widget of claim 1.";
    let facts = r#"DOCUMENT COLLECTION="LEXISNEXIS"
STRUCTURE TYPE="TEXT_CHUNK" START=0 END=46
STRUCTURE TYPE="SECTITLE" START=0 END=27
STRUCTURE TYPE="TEXT" START=28 END=46
STRUCTURE TYPE="TEXT" START=47 END=66
STRUCTURE TYPE="CLAIMS" START=67 END=105
STRUCTURE TYPE="TEXT" START=67 END=79
STRUCTURE TYPE="TEXT" START=80 END=105
"#;
    let (_dir, job) = run(text, facts, &BatchOptions::default());

    insta::assert_snapshot!(fs::read_to_string(&job.sect_file).unwrap(), @r###"
    SECTION ID=1 STRUCT="description" TYPE="DESCRIPTION" START=0 END=46
    SECTION ID=2 PARENT_ID=1 STRUCT="heading" TYPE="DESCRIPTION|HEADER|BACKGROUND" START=0 END=27
    SECTION ID=3 PARENT_ID=1 STRUCT="p" TYPE="DESCRIPTION|BACKGROUND" START=28 END=46
    SECTION ID=4 STRUCT="p" TYPE="BACKGROUND" START=47 END=66
    SECTION ID=5 STRUCT="claims" TYPE="CLAIMS" START=67 END=105
    SECTION ID=6 PARENT_ID=5 STRUCT="claim" TYPE="CLAIMS|CLAIM" START=67 END=79 CLAIM_NUMBER=1
    SECTION ID=7 PARENT_ID=5 STRUCT="claim" TYPE="CLAIMS|CLAIM" START=80 END=105 CLAIM_NUMBER=2 PARENT_CLAIMS=1
    "###);
}

#[test]
fn test_pubmed_round_trip_through_reader() {
    let text = "Methods\nWe measured widgets.\nResults\nWidgets grew.";
    let facts = r#"sec START=0 END=28
title START=0 END=7
sec START=29 END=50
title START=29 END=36
"#;
    let options = BatchOptions {
        collection: Some(Collection::Pubmed),
        ..BatchOptions::default()
    };
    let (_dir, job) = run(text, facts, &options);

    insta::assert_snapshot!(fs::read_to_string(&job.sect_file).unwrap(), @r###"
    SECTION ID=1 STRUCT="heading" TYPE="HEADER|METHODS" START=0 END=7
    SECTION ID=2 STRUCT="sec" TYPE="METHODS" TITLE="Methods" START=8 END=28
    SECTION ID=3 STRUCT="heading" TYPE="HEADER|RESULTS" START=29 END=36
    SECTION ID=4 STRUCT="sec" TYPE="RESULTS" TITLE="Results" START=37 END=50
    "###);

    let reader = SectReader::open(&job.text_file, &job.sect_file).unwrap();
    let doc = reader.doc();
    let results: Vec<&str> = reader
        .select(Some("RESULTS"), None)
        .into_iter()
        .map(|r| r.text(&doc))
        .collect();
    assert_eq!(results, vec!["Results", "Widgets grew."]);
    assert_eq!(reader.select(Some("METHODS"), Some("sec"))[0].title.as_deref(), Some("Methods"));
}
