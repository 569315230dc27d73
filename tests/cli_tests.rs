mod common;

use std::fs;

use common::{braidmap, BOUND_CONFLICT, CONFLICT, SAMPLE};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_creates_document() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");

    braidmap()
        .args(["init", "--title", "Geology"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.starts_with("# Geology\n%%map "));
}

#[test]
fn test_init_refuses_existing_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, "existing").unwrap();

    braidmap()
        .arg("init")
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "existing");
}

#[test]
fn test_init_flags_override_defaults() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");

    braidmap()
        .args(["init", "--separate-headings", "--no-crosslink"])
        .arg(&file)
        .assert()
        .success();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("%%map true;false;"));
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_sync_writes_note_tags() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap()
        .arg("sync")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Synchronized 4 notes"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("- Rocks: %%note rocks;false%%"));
    assert!(content.contains("\t- Igneous %%note rocks\\igneous;true;"));
}

#[test]
fn test_sync_is_idempotent() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap().arg("sync").arg(&file).assert().success();
    let first = fs::read_to_string(&file).unwrap();

    braidmap().arg("sync").arg(&file).assert().success();
    let second = fs::read_to_string(&file).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sync_dry_run_leaves_file_alone() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap()
        .args(["sync", "--dry-run"])
        .arg(&file)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&file).unwrap(), SAMPLE);
}

#[test]
fn test_sync_flagged_document_is_untouched() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, CONFLICT).unwrap();

    braidmap()
        .arg("sync")
        .arg(&file)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("more than one place"));

    assert_eq!(fs::read_to_string(&file).unwrap(), CONFLICT);
}

#[test]
fn test_sync_bound_id_conflict_is_untouched() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, BOUND_CONFLICT).unwrap();

    braidmap()
        .arg("sync")
        .arg(&file)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("line 4:"))
        .stdout(predicate::str::contains("line 6:"));

    assert_eq!(fs::read_to_string(&file).unwrap(), BOUND_CONFLICT);
}

#[test]
fn test_sync_annotate_then_dismiss() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, CONFLICT).unwrap();

    braidmap()
        .args(["sync", "--annotate"])
        .arg(&file)
        .assert()
        .code(3);

    let flagged = fs::read_to_string(&file).unwrap();
    assert!(flagged.contains("- Dup %%warn 4%%"));

    braidmap().arg("dismiss").arg(&file).assert().success();
    assert_eq!(fs::read_to_string(&file).unwrap(), CONFLICT);

    // dismissing a clean file changes nothing
    braidmap().arg("dismiss").arg(&file).assert().success();
    assert_eq!(fs::read_to_string(&file).unwrap(), CONFLICT);
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_clean_document() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("clean (4 notes)"));

    // check never writes
    assert_eq!(fs::read_to_string(&file).unwrap(), SAMPLE);
}

#[test]
fn test_check_reports_warnings_with_line_numbers() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, CONFLICT).unwrap();

    braidmap()
        .arg("check")
        .arg(&file)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("line 4:"));
}

#[test]
fn test_check_rejects_non_map() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.md");
    fs::write(&file, "just some prose\n").unwrap();

    braidmap()
        .arg("check")
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a mind map"));
}

#[test]
fn test_check_json_warnings() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, CONFLICT).unwrap();

    braidmap()
        .args(["--format", "json", "check"])
        .arg(&file)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"link_conflict\""))
        .stderr(predicate::str::contains("\"document_flagged\""));
}

// ============================================================================
// graph
// ============================================================================

#[test]
fn test_graph_json_export() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap()
        .args(["--format", "json", "graph"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"edges\""))
        .stdout(predicate::str::contains("rocks\\\\igneous"));
}

#[test]
fn test_graph_human_summary() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, SAMPLE).unwrap();

    braidmap()
        .arg("graph")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Geology: 5 nodes, 4 edges"));
}

#[test]
fn test_graph_refuses_flagged_document() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("map.md");
    fs::write(&file, CONFLICT).unwrap();

    braidmap().arg("graph").arg(&file).assert().code(3);
}

// ============================================================================
// error surface
// ============================================================================

#[test]
fn test_missing_file_is_a_failure() {
    braidmap()
        .arg("check")
        .arg("does-not-exist.md")
        .assert()
        .code(1);
}

#[test]
fn test_json_error_envelope_for_bad_usage() {
    braidmap()
        .args(["--format", "json", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}
