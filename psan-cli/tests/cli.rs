use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn render_focus_with_recorded_decision() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .arg("--document")
        .arg("1")
        .arg("--decisions")
        .arg(fixture_path("decisions.json"))
        .arg("--focus")
        .arg("0..4");

    cmd.assert().success().stdout(predicate::str::contains(
        r#"<span class="candidate candidate-public highlight" data-start="0" data-end="4">Anna</span> <span class="token" data-token="5">visited</span>"#,
    ));
}

#[test]
fn render_defaults_to_first_undecided_candidate() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .arg("--document")
        .arg("1")
        .arg("--decisions")
        .arg(fixture_path("decisions.json"));

    let output_pred = predicate::str::contains(
        r#"<span class="candidate highlight" data-start="13" data-end="18">Praha</span>"#,
    )
    .and(predicate::str::contains(
        r#"<span class="candidate candidate-public" data-start="0" data-end="4">"#,
    ));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn render_json_reports_highlight() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .args(["--document", "1", "--focus", "13..18", "--format", "json"]);

    let output_pred = predicate::str::contains(r#""entity_type": "gu""#)
        .and(predicate::str::contains(r#""text": "Praha""#));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn render_margin_override_starts_fade_tail() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .arg("--decisions")
        .arg(fixture_path("decisions.json"))
        .args(["--document", "1", "--focus", "0..4", "--margin", "0"]);

    cmd.assert().success().stdout(predicate::str::contains(
        r#"Anna</span><span class="small fadeout"> visited Praha</span>"#,
    ));
}

#[test]
fn render_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("review.toml");
    fs::write(
        &config,
        "[render]\nmargin = 0\nfade_tail = false\n\n[render.classes]\nhighlight = \"focus\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .args(["--document", "1", "--focus", "0..4", "--config"])
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"class="candidate focus""#))
        .stdout(predicate::str::contains("visited").not());
}

#[test]
fn render_reports_missing_candidate() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .args(["--document", "1", "--focus", "2..4"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Candidate not found"));
}

#[test]
fn render_rejects_malformed_document() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("broken.xml"))
        .args(["--document", "1", "--focus", "0..4"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Render failed"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn render_without_undecided_candidates_fails() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("render")
        .arg(fixture_path("anna.xml"))
        .args(["--document", "2"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No undecided candidates"));
}

#[test]
fn features_writes_csv_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("features.csv");
    let text = dir.path().join("text.txt");

    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("features")
        .arg(fixture_path("anna.xml"))
        .arg(&csv)
        .arg(&text);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 features, 18 characters"));
    assert_eq!(fs::read_to_string(&csv).unwrap(), "0,4,Person\n");
    assert_eq!(fs::read_to_string(&text).unwrap(), "Anna visited Praha");
}

#[test]
fn codes_lists_vocabulary() {
    let mut cmd = cargo_bin_cmd!("psan");
    cmd.arg("codes");

    let output_pred = predicate::str::contains("pf  first names")
        .and(predicate::str::contains("gu  cities/towns"));

    cmd.assert().success().stdout(output_pred);
}
