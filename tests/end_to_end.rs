//! Whole-pipeline scenarios: corpus on disk, detection, report, archive.

use std::fs;

use chrono::NaiveDate;
use plagscan::{
    Corpus, DetectConfig, Detector, Evidence, PlagscanConfig, detect, explain, load_corpus,
    load_detector, render_report, save_submission,
};
use tempfile::TempDir;

fn fox_corpus() -> Corpus {
    [("doc1", "the quick brown fox jumps over the lazy dog")]
        .into_iter()
        .collect()
}

#[test]
fn flags_fully_contained_submission() {
    let corpus = fox_corpus();
    let input = "the quick brown fox jumps";

    let result = detect(input, &corpus, 3, 0.5).expect("detect");
    assert_eq!(result.len(), 1);
    assert_eq!(result.get("doc1"), Some(1.0));

    let evidence = explain(input, &corpus, &result).expect("explain");
    assert_eq!(
        evidence["doc1"],
        Evidence::substring("the quick brown fox jumps")
    );

    assert_eq!(
        render_report(&result, &evidence),
        "Potential plagiarism detected in 'doc1' with similarity ratio: 1.0000\n\
         Longest Common Substring: 'the quick brown fox jumps'\n\n"
    );
}

#[test]
fn unrelated_submission_reports_nothing() {
    let corpus: Corpus = [("doc1", "the quick brown fox")].into_iter().collect();
    let input = "completely unrelated sentence here";

    let result = detect(input, &corpus, 3, 0.1).expect("detect");
    assert!(result.is_empty());

    let evidence = explain(input, &corpus, &result).expect("explain");
    assert_eq!(render_report(&result, &evidence), "No plagiarism detected.");
}

#[test]
fn empty_submission_is_not_an_error() {
    for threshold in [0.0, 0.5, 1.0] {
        let result = detect("", &fox_corpus(), 3, threshold).expect("detect");
        assert!(result.is_empty(), "threshold {threshold}");
    }
}

#[test]
fn corpus_directory_round_trip_with_archive() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("essay1.txt"),
        "Plagiarism is the representation of another author's language as one's own work.",
    )
    .unwrap();
    fs::write(
        dir.path().join("essay2.txt"),
        "Gardening in spring requires patience, compost and good weather.",
    )
    .unwrap();

    let mut cfg = PlagscanConfig::default();
    cfg.corpus.dir = dir.path().to_path_buf();
    cfg.archive.dir = dir.path().to_path_buf();
    cfg.detect = DetectConfig::with_params(3, 0.1);

    let submission = "In short, plagiarism is the representation of another author's language.";
    let detector = load_detector(&cfg).expect("detector");
    let report = detector.run(submission).expect("run");
    assert!(report.contains("Potential plagiarism detected in 'essay1.txt'"));
    assert!(!report.contains("essay2.txt"));
    assert!(report.contains("Longest Common Substring: 'lagiarism is the representation of another author's language'"));

    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let saved = save_submission(&cfg.archive.dir, submission, now).expect("archive");
    assert_eq!(
        saved.file_name().unwrap().to_str().unwrap(),
        "submitted_text_20240102_030405.txt"
    );

    // The archived submission becomes part of the next corpus.
    let corpus = load_corpus(dir.path(), "txt").expect("reload");
    assert_eq!(corpus.len(), 3);
    let detector = Detector::new(corpus, DetectConfig::with_params(3, 0.9)).expect("detector");
    let outcome = detector.detect(submission).expect("detect");
    assert_eq!(
        outcome.result.get("submitted_text_20240102_030405.txt"),
        Some(1.0)
    );
}

#[test]
fn json_report_carries_evidence_and_skips() {
    let mut corpus = fox_corpus();
    corpus.insert("doc2", "the quick brown fox jumps again and again");
    let detector = Detector::new(corpus, DetectConfig::with_params(3, 0.5)).expect("detector");

    let report = detector.report("the quick brown fox jumps").expect("report");
    assert!(report.plagiarism_detected);
    assert_eq!(report.flagged.len(), 2);
    assert_eq!(report.flagged[0].doc_id, "doc1");
    assert_eq!(report.flagged[1].doc_id, "doc2");

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["flagged"][1]["evidence"]["kind"], "substring");
    assert_eq!(json["flagged"][1]["evidence"]["text"], "the quick brown fox jumps");
}
