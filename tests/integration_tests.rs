//! Integration tests for the sheetdxf CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get a sheetdxf command
fn sheetdxf() -> Command {
    Command::cargo_bin("sheetdxf").unwrap()
}

const FRAME: &str = r#"name: Frame.iam
parts:
  - name: A.ipt
    sheet_metal:
      thickness: 0.12
      flat_pattern: flat/A.dxf
  - name: B.ipt
  - name: C.ipt
    sheet_metal:
      thickness: 0.12
      flat_pattern: flat/C.dxf
occurrences:
  - A.ipt
  - A.ipt
  - B.ipt
  - C.ipt
  - A.ipt
"#;

/// Helper to create a model directory with the sample assembly
fn setup_model() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("flat")).unwrap();
    fs::write(tmp.path().join("flat/A.dxf"), "flat pattern A\n").unwrap();
    fs::write(tmp.path().join("flat/C.dxf"), "flat pattern C\n").unwrap();
    fs::write(tmp.path().join("frame.yaml"), FRAME).unwrap();
    tmp
}

fn dxf_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    sheetdxf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet-metal"));
}

#[test]
fn test_version_displays() {
    sheetdxf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetdxf"));
}

#[test]
fn test_unknown_command_fails() {
    sheetdxf()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Scan Command Tests
// ============================================================================

#[test]
fn test_scan_lists_counts_and_names() {
    let tmp = setup_model();

    sheetdxf()
        .current_dir(tmp.path())
        .args(["scan", "frame.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A-t1.2mm-3pcs.dxf"))
        .stdout(predicate::str::contains("C-t1.2mm-1pcs.dxf"))
        .stdout(predicate::str::contains("3 distinct part(s), 5 occurrence(s)"));
}

#[test]
fn test_scan_json_output() {
    let tmp = setup_model();

    let output = sheetdxf()
        .current_dir(tmp.path())
        .args(["scan", "frame.yaml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["part"], "A.ipt");
    assert_eq!(rows[0]["count"], 3);
    assert_eq!(rows[1]["kind"], "generic");
    assert_eq!(rows[2]["file_name"], "C-t1.2mm-1pcs.dxf");
}

#[test]
fn test_scan_sheet_metal_only_ids() {
    let tmp = setup_model();

    sheetdxf()
        .current_dir(tmp.path())
        .args(["scan", "frame.yaml", "--sheet-metal", "-f", "id"])
        .assert()
        .success()
        .stdout("A.ipt\nC.ipt\n");
}

#[test]
fn test_scan_reports_unknown_part() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("bad.yaml"),
        "name: Bad.iam\nparts:\n  - name: A.ipt\noccurrences:\n  - Ghost.ipt\n",
    )
    .unwrap();

    sheetdxf()
        .current_dir(tmp.path())
        .args(["scan", "bad.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown part Ghost.ipt"));
}

// ============================================================================
// Export Command Tests
// ============================================================================

#[test]
fn test_export_writes_one_file_per_sheet_metal_part() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved A.ipt (3 pcs)"))
        .stderr(predicate::str::contains("Saved C.ipt (1 pcs)"))
        .stdout(predicate::str::contains("2 file(s) saved, 1 part(s) skipped, 0 failed"));

    assert_eq!(
        dxf_files(&out),
        vec!["A-t1.2mm-3pcs.dxf", "C-t1.2mm-1pcs.dxf"]
    );
    assert_eq!(
        fs::read_to_string(out.join("A-t1.2mm-3pcs.dxf")).unwrap(),
        "flat pattern A\n"
    );
}

#[test]
fn test_export_twice_overwrites() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    for _ in 0..2 {
        sheetdxf()
            .current_dir(tmp.path())
            .args(["export", "frame.yaml", "-q", "-o"])
            .arg(&out)
            .assert()
            .success();
    }

    assert_eq!(dxf_files(&out).len(), 2);
    assert_eq!(
        fs::read_to_string(out.join("C-t1.2mm-1pcs.dxf")).unwrap(),
        "flat pattern C\n"
    );
}

#[test]
fn test_export_quiet_hides_saved_notices() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "--quiet", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved").not())
        .stdout(predicate::str::is_empty());

    assert_eq!(dxf_files(&out).len(), 2);
}

#[test]
fn test_export_sanitized_name_collision_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("flat")).unwrap();
    fs::write(tmp.path().join("flat/plain.dxf"), "plain\n").unwrap();
    fs::write(tmp.path().join("flat/piped.dxf"), "piped\n").unwrap();
    fs::write(
        tmp.path().join("pair.yaml"),
        r#"name: Pair.iam
parts:
  - name: a_b.ipt
    sheet_metal:
      thickness: 0.1
      flat_pattern: flat/plain.dxf
  - name: "a|b.ipt"
    sheet_metal:
      thickness: 0.1
      flat_pattern: flat/piped.dxf
occurrences:
  - a_b.ipt
  - "a|b.ipt"
"#,
    )
    .unwrap();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "pair.yaml", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already saved for a_b.ipt"))
        .stderr(predicate::str::contains("1 part(s) could not be exported"));

    assert_eq!(dxf_files(&out), vec!["a_b-t1.0mm-1pcs.dxf"]);
    assert_eq!(
        fs::read_to_string(out.join("a_b-t1.0mm-1pcs.dxf")).unwrap(),
        "plain\n"
    );
}

#[test]
fn test_export_part_document_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("plate.yaml"),
        "name: Plate.ipt\ntype: part\nsheet_metal:\n  thickness: 0.2\n",
    )
    .unwrap();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "plate.yaml", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an assembly"));

    assert!(!out.exists());
}

#[test]
fn test_export_without_translator_aborts() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "--translator", "{bogus}", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("{bogus} not found"));

    assert!(dxf_files(&out).is_empty());
}

#[test]
fn test_export_continues_after_failed_part() {
    let tmp = setup_model();
    fs::remove_file(tmp.path().join("flat/A.dxf")).unwrap();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to save DXF for A.ipt"))
        .stderr(predicate::str::contains("1 part(s) could not be exported"));

    assert_eq!(dxf_files(&out), vec!["C-t1.2mm-1pcs.dxf"]);
}

#[test]
fn test_export_reports_missing_flat_pattern() {
    let tmp = setup_model();
    let model = FRAME.replace("      flat_pattern: flat/C.dxf\n", "");
    fs::write(tmp.path().join("frame.yaml"), model).unwrap();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("no flat pattern for C.ipt"));

    assert_eq!(dxf_files(&out), vec!["A-t1.2mm-3pcs.dxf"]);
}

#[test]
fn test_export_minimal_names() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "--minimal-names", "-q", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(dxf_files(&out), vec!["A.dxf", "C.dxf"]);
}

#[test]
fn test_export_uses_config_file() {
    let tmp = setup_model();
    let out = tmp.path().join("from-config");
    fs::write(
        tmp.path().join("sheetdxf.yaml"),
        format!("output_dir: {}\n", out.display()),
    )
    .unwrap();

    sheetdxf()
        .current_dir(tmp.path())
        .args(["--config", "sheetdxf.yaml", "export", "frame.yaml", "-q"])
        .assert()
        .success();

    assert_eq!(dxf_files(&out).len(), 2);
}

#[test]
fn test_export_json_report() {
    let tmp = setup_model();
    let out = tmp.path().join("out");

    let output = sheetdxf()
        .current_dir(tmp.path())
        .args(["export", "frame.yaml", "-f", "json", "-o"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["status"], "exported");
    assert_eq!(outcomes[1]["status"], "not_sheet_metal");
    assert!(report.get("aborted").is_none());
}

// ============================================================================
// Name Command Tests
// ============================================================================

#[test]
fn test_name_counted() {
    sheetdxf()
        .args(["name", "A.ipt", "--thickness", "0.12", "--count", "3"])
        .assert()
        .success()
        .stdout("A-t1.2mm-3pcs.dxf\n");
}

#[test]
fn test_name_without_thickness() {
    sheetdxf()
        .args(["name", "Bracket.ipt", "-n", "2"])
        .assert()
        .success()
        .stdout("Bracket-2pcs.dxf\n");
}

#[test]
fn test_name_sanitizes_by_default() {
    sheetdxf()
        .args(["name", "a:b.ipt", "-t", "0.1", "-n", "1"])
        .assert()
        .success()
        .stdout("a_b-t1.0mm-1pcs.dxf\n")
        .stderr(predicate::str::contains("renamed"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_keys() {
    sheetdxf()
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output_dir"))
        .stdout(predicate::str::contains("name_style"));
}

#[test]
fn test_config_show_yaml() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("c.yaml"), "name_style: minimal\n").unwrap();

    sheetdxf()
        .current_dir(tmp.path())
        .args(["--config", "c.yaml", "config", "show", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name_style: minimal"));
}

#[test]
fn test_completions_bash() {
    sheetdxf()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetdxf"));
}
