//! Text and JSON rendering of detection results. No I/O.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::types::{DetectOutcome, Evidence, SimilarityResult};

/// Message emitted when nothing met the threshold.
pub const NO_PLAGIARISM: &str = "No plagiarism detected.";

const MISSING_EVIDENCE: &str = "evidence was not computed";

/// One block per flagged document, in result order:
///
/// ```text
/// Potential plagiarism detected in '<id>' with similarity ratio: 0.7500
/// Longest Common Substring: '<evidence>'
///
/// ```
///
/// A flagged document without usable evidence still gets its block, with
/// `<unavailable: reason>` in place of the quoted substring. An empty result
/// renders as [`NO_PLAGIARISM`].
pub fn render_report(result: &SimilarityResult, evidence: &BTreeMap<String, Evidence>) -> String {
    if result.is_empty() {
        return NO_PLAGIARISM.to_string();
    }

    let mut out = String::new();
    for (doc_id, ratio) in result.iter() {
        push_block(&mut out, doc_id, ratio, evidence.get(doc_id));
    }
    out
}

/// [`render_report`] followed by one `Skipped '<id>': <reason>` line per
/// document that could not be scored.
pub fn render_outcome(outcome: &DetectOutcome, evidence: &BTreeMap<String, Evidence>) -> String {
    let mut out = render_report(&outcome.result, evidence);
    if outcome.unscored.is_empty() {
        return out;
    }
    if outcome.result.is_empty() {
        out.push('\n');
    }
    for (doc_id, reason) in &outcome.unscored {
        let _ = writeln!(out, "Skipped '{doc_id}': {reason}");
    }
    out
}

fn push_block(out: &mut String, doc_id: &str, ratio: f64, evidence: Option<&Evidence>) {
    let _ = writeln!(
        out,
        "Potential plagiarism detected in '{doc_id}' with similarity ratio: {ratio:.4}"
    );
    match evidence {
        Some(evidence) => {
            let _ = writeln!(out, "Longest Common Substring: {evidence}");
        }
        None => {
            let _ = writeln!(out, "Longest Common Substring: <unavailable: {MISSING_EVIDENCE}>");
        }
    }
    out.push('\n');
}

/// A flagged document with its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedDocument {
    pub doc_id: String,
    pub ratio: f64,
    pub evidence: Evidence,
}

/// A document that could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub doc_id: String,
    pub reason: String,
}

/// Machine-readable report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub plagiarism_detected: bool,
    pub input_ngrams: usize,
    pub documents_scored: usize,
    pub flagged: Vec<FlaggedDocument>,
    pub skipped: Vec<SkippedDocument>,
}

impl Report {
    pub fn from_outcome(outcome: &DetectOutcome, evidence: &BTreeMap<String, Evidence>) -> Self {
        let flagged = outcome
            .result
            .iter()
            .map(|(doc_id, ratio)| FlaggedDocument {
                doc_id: doc_id.to_string(),
                ratio,
                evidence: evidence
                    .get(doc_id)
                    .cloned()
                    .unwrap_or_else(|| Evidence::unavailable(MISSING_EVIDENCE)),
            })
            .collect();
        let skipped = outcome
            .unscored
            .iter()
            .map(|(doc_id, reason)| SkippedDocument {
                doc_id: doc_id.clone(),
                reason: reason.clone(),
            })
            .collect();
        Self {
            plagiarism_detected: !outcome.result.is_empty(),
            input_ngrams: outcome.input_ngrams,
            documents_scored: outcome.documents_scored,
            flagged,
            skipped,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
