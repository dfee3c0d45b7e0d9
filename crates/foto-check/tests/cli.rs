use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn sample_policy() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config.json")
}

/// Run in an empty directory so no settings file is picked up.
fn cmd(workdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("foto-check").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .arg("--policy")
        .arg(sample_policy());
    cmd
}

#[test]
fn flags_only_check_prints_decision() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .args([
            "--minors",
            "n",
            "--identifiable",
            "j",
            "--group-photo",
            "n",
            "--prominent-subject",
            "j",
            "--channel",
            "website",
            "--consent",
            "unbekannt",
            "--no-report",
        ])
        .assert()
        .success()
        .stdout(contains("Ergebnis:"))
        .stdout(contains("🔴 NICHT ERLAUBT: Erkennbare Personen ohne geklärte Einwilligung."))
        .stdout(contains("Sensibilität: HIGH"))
        .stdout(contains(" - Personen sind erkennbar."))
        .stdout(contains("Art. 6 DSGVO"));
}

#[test]
fn json_output_for_unmatched_photo() {
    let dir = tempfile::tempdir().unwrap();
    let output = cmd(&dir)
        .args([
            "--json",
            "--minors",
            "nein",
            "--identifiable",
            "nein",
            "--group-photo",
            "ja",
            "--prominent-subject",
            "nein",
            "--channel",
            "flyer",
            "--consent",
            "alle",
            "--no-report",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["decision"], "ALLOWED");
    assert_eq!(
        json["result"]["message"],
        "🟢 ERLAUBT: Keine Regel greift restriktiv."
    );
    assert!(json["result"]["rule_id"].is_null());
    assert_eq!(json["result"]["reasons"].as_array().unwrap().len(), 6);
    assert_eq!(json["result"]["reasons"][4], "Kanal: print.");
    assert_eq!(json["sensitivity"]["tier"], "LOW");
    assert_eq!(json["context"]["channel"], "print");
    assert!(json["legal_refs"].as_array().unwrap().is_empty());
}

#[test]
fn interactive_answers_are_read_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("j\nj\nvielleicht\nn\nj\ninstagram\nalle\nn\n")
        .assert()
        .success()
        .stdout(contains("Sind Minderjährige auf dem Foto? (j/n): "))
        .stdout(contains("Bitte 'j' oder 'n' eingeben."))
        .stdout(contains("🔴 NICHT ERLAUBT: Erkennbare Minderjährige in sozialen Medien."))
        .stdout(contains("HTML-Report erzeugen?"))
        .stdout(contains("Report gespeichert").not());
}

#[test]
fn closed_stdin_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("j\n")
        .assert()
        .failure()
        .stderr(contains("input closed"));
}

#[test]
fn report_is_written_to_report_dir() {
    let dir = tempfile::tempdir().unwrap();
    let reports = dir.path().join("out");
    cmd(&dir)
        .args([
            "--minors",
            "j",
            "--identifiable",
            "j",
            "--group-photo",
            "j",
            "--prominent-subject",
            "n",
            "--channel",
            "print",
            "--consent",
            "alle",
            "--report",
            "--report-dir",
        ])
        .arg(&reports)
        .assert()
        .success()
        .stdout(contains("Report gespeichert:"))
        .stderr(contains("logo").not());

    let files: Vec<_> = std::fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(
        files[0].starts_with("report_") && files[0].ends_with(".html"),
        "{files:?}"
    );

    let html = std::fs::read_to_string(reports.join(&files[0])).unwrap();
    assert!(html.contains("minors_print_or_web"));
    assert!(html.contains("Art. 8 DSGVO"));
}

#[test]
fn settings_file_supplies_policy_and_report_prompt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("foto-check.yaml"),
        format!(
            "policy_file: {}\nreport:\n  prompt: false\n",
            sample_policy().display()
        ),
    )
    .unwrap();

    Command::cargo_bin("foto-check")
        .unwrap()
        .current_dir(dir.path())
        .write_stdin("n\nn\nj\nn\nweb\nalle\n")
        .assert()
        .success()
        .stdout(contains("🟢 ERLAUBT"))
        .stdout(contains("HTML-Report erzeugen?").not());
}

#[test]
fn validate_sample_policy() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("6 rule(s), 6 legal reference(s)"))
        .stdout(contains("no problems found"));
}

#[test]
fn validate_reports_lint_findings() {
    let dir = tempfile::tempdir().unwrap();
    let policy = dir.path().join("rules.json");
    std::fs::write(
        &policy,
        r#"{ "rules_ordered": [
            {
                "id": "typo",
                "when": { "minor": true },
                "decision": "LIMITED",
                "message": "m",
                "legal_refs": ["gone"]
            }
        ] }"#,
    )
    .unwrap();

    Command::cargo_bin("foto-check")
        .unwrap()
        .current_dir(dir.path())
        .args(["--policy", "rules.json", "validate"])
        .assert()
        .success()
        .stdout(contains("warning: rule 'typo': unrecognized condition 'minor' is ignored"))
        .stdout(contains("warning: rule 'typo': legal reference 'gone' is not in the catalog"));
}

#[test]
fn validate_warns_about_duplicate_and_empty_ids() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rules.json"),
        r#"{ "rules_ordered": [
            { "id": "kids", "when": { "minors": true }, "decision": "LIMITED", "message": "a" },
            { "id": "kids", "when": { "minors": false }, "decision": "LIMITED", "message": "b" },
            { "id": "", "when": { "identifiable": true }, "decision": "LIMITED", "message": "c" }
        ] }"#,
    )
    .unwrap();

    Command::cargo_bin("foto-check")
        .unwrap()
        .current_dir(dir.path())
        .args(["--policy", "rules.json", "validate"])
        .assert()
        .success()
        .stdout(contains("3 rule(s), 0 legal reference(s)"))
        .stdout(contains("warning: rule #1: id 'kids' is already used by rule #0"))
        .stdout(contains("warning: rule #2: id is empty"));
}

#[test]
fn missing_settings_file_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .arg("validate")
        .assert()
        .success()
        .stderr(contains("settings file not found; using defaults"))
        .stderr(contains("foto-check.yaml"));
}

#[test]
fn missing_policy_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("foto-check")
        .unwrap()
        .current_dir(dir.path())
        .args(["--policy", "nope.json", "validate"])
        .assert()
        .failure()
        .stderr(contains("failed to load rule configuration"));
}

#[test]
fn invalid_decision_in_policy_fails_at_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rules.json"),
        r#"{ "rules_ordered": [ { "decision": "FORBIDDEN", "message": "m" } ] }"#,
    )
    .unwrap();

    Command::cargo_bin("foto-check")
        .unwrap()
        .current_dir(dir.path())
        .args(["--policy", "rules.json", "validate"])
        .assert()
        .failure()
        .stderr(contains("FORBIDDEN"));
}

#[test]
fn unknown_channel_flag_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .args(["--channel", "fax"])
        .assert()
        .failure()
        .stderr(contains("unknown channel 'fax'"));
}
