//! Snapshot a tree, restore it elsewhere, and compare.

use super::test_utils::{read_tree, write_tree};
use std::fs;
use tempfile::TempDir;
use treedoc::ignore::IgnoreList;
use treedoc::restore::{RestoreOptions, Restorer};
use treedoc::snapshot::{collect_records, SnapshotOptions, Snapshotter};

/// Test that every file comes back with the same path and bytes
#[test]
fn test_round_trip_reproduces_tree() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    write_tree(
        &source,
        &[
            ("README.md", b"# Title\n\nSome text.\n"),
            ("src/main.rs", b"fn main() {\n    println!(\"hi\");\n}\n"),
            ("src/lib/util.rs", b"pub fn util() {}"),
            ("empty.txt", b""),
            ("no_newline.txt", b"last line"),
            ("double_newline.txt", b"a\n\n"),
            ("data/raw.bin", &[0, 1, 2, 254, 255, b'\n', 7]),
        ],
    );
    fs::create_dir_all(source.join("empty_dir").join("nested")).unwrap();

    let document = temp_dir.path().join("output.md");
    let snapshot = Snapshotter::new(source.clone(), SnapshotOptions::default())
        .write_document(&document)
        .unwrap();
    assert_eq!(snapshot.files_written, 7);

    let target = temp_dir.path().join("restored");
    let report = Restorer::new(target.clone(), RestoreOptions::default())
        .restore_file(&document)
        .unwrap();
    assert_eq!(report.files_written.len(), 7);
    assert!(report.skipped.is_empty());

    assert_eq!(read_tree(&target), read_tree(&source));
    assert!(!target.join("empty_dir").exists());
}

/// Test the two-file scenario with one ignored directory
#[test]
fn test_ignored_subdirectory_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("root");
    write_tree(&source, &[("a.txt", b"hello"), ("sub/b.txt", b"world")]);

    let document = temp_dir.path().join("output.md");
    let options = SnapshotOptions {
        ignore: IgnoreList::from_patterns(["sub"]),
        ..Default::default()
    };
    Snapshotter::new(source, options)
        .write_document(&document)
        .unwrap();

    let text = fs::read_to_string(&document).unwrap();
    assert_eq!(text.matches("### ").count(), 1);
    assert!(text.contains("### a.txt"));
    assert!(text.contains("hello"));
    assert!(!text.contains("world"));

    let out = temp_dir.path().join("out");
    Restorer::new(out.clone(), RestoreOptions::default())
        .restore_file(&document)
        .unwrap();
    assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "hello");
    assert!(!out.join("sub").exists());
}

/// Test that restoring the same document twice gives the same result
#[test]
fn test_restore_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    write_tree(&source, &[("a.txt", b"one"), ("dir/b.txt", b"two\n")]);

    let document = temp_dir.path().join("doc.md");
    Snapshotter::new(source, SnapshotOptions::default())
        .write_document(&document)
        .unwrap();

    let target = temp_dir.path().join("out");
    let restorer = Restorer::new(target.clone(), RestoreOptions::default());
    restorer.restore_file(&document).unwrap();
    let first = read_tree(&target);
    restorer.restore_file(&document).unwrap();
    let second = read_tree(&target);

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

/// Test that a snapshot is byte-for-byte stable across runs
#[test]
fn test_snapshot_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    write_tree(
        &source,
        &[("z.txt", b"z"), ("a/b/c.txt", b"c"), ("a/a.txt", b"a"), ("m.txt", b"m")],
    );

    let snapshotter = Snapshotter::new(source.clone(), SnapshotOptions::default());
    let mut first = Vec::new();
    let mut second = Vec::new();
    snapshotter.write_to(&mut first).unwrap();
    snapshotter.write_to(&mut second).unwrap();
    assert_eq!(first, second);

    let order: Vec<String> = collect_records(&source, SnapshotOptions::default())
        .unwrap()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(order, vec!["a/a.txt", "a/b/c.txt", "m.txt", "z.txt"]);
}

/// Test snapshot of a root that is a single file
#[test]
fn test_single_file_root_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("solo.txt");
    fs::write(&file, "just me").unwrap();

    let mut document = Vec::new();
    Snapshotter::new(file, SnapshotOptions::default())
        .write_to(&mut document)
        .unwrap();
    assert!(String::from_utf8_lossy(&document).starts_with("### solo.txt\n"));

    let out = temp_dir.path().join("out");
    Restorer::new(out.clone(), RestoreOptions::default())
        .restore_bytes(&document)
        .unwrap();
    assert_eq!(fs::read_to_string(out.join("solo.txt")).unwrap(), "just me");
}

/// Test that names the document cannot carry are reported, not renamed
#[test]
fn test_whitespace_names_are_skipped_not_renamed() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    write_tree(
        &source,
        &[(" lead.txt", b"l"), ("trail.txt ", b"t"), ("ok.txt", b"o")],
    );

    let document = temp_dir.path().join("output.md");
    let snapshot = Snapshotter::new(source, SnapshotOptions::default())
        .write_document(&document)
        .unwrap();
    assert_eq!(snapshot.files_written, 1);
    assert_eq!(snapshot.skipped.len(), 2);

    let target = temp_dir.path().join("out");
    Restorer::new(target.clone(), RestoreOptions::default())
        .restore_file(&document)
        .unwrap();
    let files = read_tree(&target);
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["ok.txt"]);
    assert!(!target.join("lead.txt").exists());
    assert!(!target.join("trail.txt").exists());
}
