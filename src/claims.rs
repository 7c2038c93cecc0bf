//! Claim numbering and claim back-references.
//!
//! Claims are numbered in document order. Dependent claims mention the claims
//! they refine ("The method of claim 9 wherein ..."); every such mention is
//! recorded as a parent claim, in the order it appears.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ProcessResult, StructuralWarning};
use crate::section::{ClaimInfo, Section};
use crate::text::DocumentText;

static CLAIM_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bclaim\s+(\d+)").expect("Invalid claim reference regex"));

/// Parsed claim numbers, and the digits of references too large for a claim number.
fn scan_references(text: &str) -> (Vec<u32>, Vec<String>) {
    let mut numbers = Vec::new();
    let mut oversized = Vec::new();
    for caps in CLAIM_REFERENCE.captures_iter(text) {
        match caps[1].parse::<u32>() {
            Ok(number) => numbers.push(number),
            Err(_) => oversized.push(caps[1].to_string()),
        }
    }
    (numbers, oversized)
}

/// Claim numbers mentioned in a claim's text, in order of appearance.
///
/// Duplicates are kept: a claim that mentions claim 1 twice yields `[1, 1]`.
/// Numbers too large for a claim number are left out; [`extract_claims`]
/// reports them.
pub fn claim_references(text: &str) -> Vec<u32> {
    scan_references(text).0
}

/// Number the claim sections and record their parent claims.
///
/// Claim sections (structural name `claim`) are taken by ascending start
/// offset and numbered from 1. Any previous claim information is replaced,
/// so running this twice gives the same result. References to a claim that
/// does not precede the referring claim are kept and reported as warnings, as
/// are references whose number does not fit a claim number.
pub fn extract_claims(sections: &mut [Section], doc: &DocumentText<'_>) -> ProcessResult<()> {
    let mut result = ProcessResult::ok(());

    let mut claim_indices: Vec<usize> = sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_claim())
        .map(|(i, _)| i)
        .collect();
    claim_indices.sort_by_key(|&i| sections[i].start);

    for (position, &i) in claim_indices.iter().enumerate() {
        let claim_number = position as u32 + 1;
        let (parent_claims, oversized) = scan_references(sections[i].text(doc));
        for reference in oversized {
            result.add_warning(StructuralWarning::OversizedClaimReference {
                claim_number,
                reference,
            });
        }
        for &referenced in &parent_claims {
            if referenced == 0 || referenced >= claim_number {
                result.add_warning(StructuralWarning::UnresolvedClaimReference {
                    claim_number,
                    referenced,
                });
            }
        }
        sections[i].claim = Some(ClaimInfo {
            claim_number,
            parent_claims,
        });
    }

    tracing::debug!("numbered {} claims", claim_indices.len());
    result
}
