//! Restore behavior on documents that do not follow the framing exactly.

use super::test_utils::read_tree;
use std::fs;
use tempfile::TempDir;
use treedoc::document::SkipReason;
use treedoc::restore::{RestoreOptions, Restorer};

fn restore(document: &str) -> (TempDir, treedoc::restore::RestoreReport) {
    let temp_dir = TempDir::new().unwrap();
    let report = Restorer::new(temp_dir.path().join("out"), RestoreOptions::default())
        .restore_bytes(document.as_bytes())
        .unwrap();
    (temp_dir, report)
}

/// Test that a heading without a fence is skipped and later records still land
#[test]
fn test_missing_fence_does_not_stop_later_records() {
    let (temp_dir, report) = restore(
        "### first.txt\n```\n1\n```\n\n\
         ### broken.txt\nthis section lost its fence\n\n\
         ### last.txt\n```\n3\n```\n\n",
    );

    let out = temp_dir.path().join("out");
    let files = read_tree(&out);
    assert_eq!(files.len(), 2);
    assert_eq!(files["first.txt"], b"1");
    assert_eq!(files["last.txt"], b"3");
    assert!(!out.join("broken.txt").exists());

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].heading, "broken.txt");
    assert_eq!(report.skipped[0].reason, SkipReason::MissingFence);
}

/// Test a document cut off right after a heading
#[test]
fn test_truncated_document() {
    let (temp_dir, report) = restore("### a.txt\n```\nA\n```\n\n### b.t");
    let files = read_tree(&temp_dir.path().join("out"));
    assert_eq!(files.len(), 1);
    assert_eq!(files["a.txt"], b"A");
    assert_eq!(report.skipped.len(), 1);
}

/// Test that text before the first heading is ignored
#[test]
fn test_preamble_is_ignored() {
    let (temp_dir, report) = restore(
        "Project dump, generated for review.\n\n```\nnot a record\n```\n\n### a.txt\n```\nA\n```\n\n",
    );
    let files = read_tree(&temp_dir.path().join("out"));
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["a.txt"]);
    assert!(report.skipped.is_empty());
}

/// Test that a document with no headings creates only the target directory
#[test]
fn test_document_without_records() {
    let (temp_dir, report) = restore("nothing to see here\n");
    let out = temp_dir.path().join("out");
    assert!(out.is_dir());
    assert!(read_tree(&out).is_empty());
    assert!(report.files_written.is_empty());
}

/// Test that paths climbing out of the target are refused
#[test]
fn test_escaping_paths_are_refused() {
    let (temp_dir, report) = restore(
        "### ../../outside.txt\n```\nx\n```\n\n\
         ### /abs.txt\n```\ny\n```\n\n\
         ### ok/inside.txt\n```\nz\n```\n\n",
    );
    let files = read_tree(&temp_dir.path().join("out"));
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["ok/inside.txt"]);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::UnsafePath));
    assert!(!temp_dir.path().join("outside.txt").exists());
}

/// Test that restore writes over existing files but leaves others alone
#[test]
fn test_overlay_on_existing_target() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    fs::create_dir_all(out.join("dir")).unwrap();
    fs::write(out.join("dir").join("a.txt"), "stale").unwrap();
    fs::write(out.join("untouched.txt"), "keep").unwrap();

    Restorer::new(out.clone(), RestoreOptions::default())
        .restore_bytes(b"### dir/a.txt\n```\nfresh\n```\n\n")
        .unwrap();

    let files = read_tree(&out);
    assert_eq!(files["dir/a.txt"], b"fresh");
    assert_eq!(files["untouched.txt"], b"keep");
}
