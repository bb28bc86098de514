use assert_fs::prelude::*;
use insta::assert_snapshot;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FIXTURES: LazyLock<PathBuf> =
    LazyLock::new(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"));

fn cli(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kiosk-i18n");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG")
        .env_remove("RUST_BACKTRACE")
        .env_remove("RUST_LIB_BACKTRACE");
    cmd
}

fn run_cli(dir: &Path, args: &[&str]) -> String {
    let assert = cli(dir).args(args).assert();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    format!("STDOUT:\n{}\nSTDERR:\n{}", stdout, stderr)
}

#[test]
fn check_clean_dictionaries() {
    let dir = FIXTURES.join("clean");
    cli(&dir).arg("check").assert().success();

    assert_snapshot!(run_cli(&dir, &["check"]));
}

#[test]
fn check_reports_missing_keys_and_mismatches() {
    let dir = FIXTURES.join("broken");
    let args = [
        "check",
        "--global",
        "translations.json",
        "--namespaces",
        "namespaces.json",
    ];
    cli(&dir).args(args).assert().failure();

    assert_snapshot!(run_cli(&dir, &args));
}

#[test]
fn check_without_config_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    cli(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read i18n.toml"));
}

#[test]
fn check_config_without_dictionaries_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("i18n.toml")
        .write_str("fallback_language = \"az\"\n")
        .unwrap();

    cli(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not configure any dictionaries"));
}

#[test]
fn check_explicit_config_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("kiosk/i18n.toml")
        .write_str("[dictionaries]\nglobal = \"tables.json\"\n")
        .unwrap();
    temp.child("kiosk/tables.json")
        .write_str(r#"{"az": {"ok": "Bəli"}, "en": {"ok": "Yes"}, "ru": {"ok": "Да"}}"#)
        .unwrap();

    cli(temp.path())
        .args(["check", "--config", "kiosk/i18n.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn check_rejects_malformed_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("tables.json").write_str("{\"az\": ").unwrap();

    cli(temp.path())
        .args(["check", "--global", "tables.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse dictionary JSON"));
}

#[test]
fn namespaces_flag_requires_global() {
    cli(&FIXTURES.join("broken"))
        .args(["check", "--namespaces", "namespaces.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--global"));
}

#[test]
fn translate_selects_russian_plural() {
    let dir = FIXTURES.join("clean");

    for (count, expected) in [
        ("1", "1 приём"),
        ("3", "3 приёма"),
        ("11", "11 приёмов"),
        ("21", "21 приём"),
    ] {
        cli(&dir)
            .args(["translate", "visits", "--lang", "ru", "--count", count])
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{}\n", expected)));
    }
}

#[test]
fn translate_uses_namespace_then_global() {
    let dir = FIXTURES.join("clean");

    cli(&dir)
        .args(["translate", "greet", "-l", "en", "--ns", "triage", "--var", "name=Murad"])
        .assert()
        .success()
        .stdout("Welcome, Murad.\n");

    cli(&dir)
        .args(["translate", "greet", "-l", "az", "--ns", "triage", "--var", "name=Murad"])
        .assert()
        .success()
        .stdout("Salam, Murad!\n");
}

#[test]
fn translate_unknown_key_prints_key() {
    cli(&FIXTURES.join("clean"))
        .args(["translate", "missing.key", "--lang", "AZ"])
        .assert()
        .success()
        .stdout("missing.key\n");
}

#[test]
fn translate_leaves_unmatched_placeholders() {
    cli(&FIXTURES.join("clean"))
        .args(["translate", "greet", "--lang", "en"])
        .assert()
        .success()
        .stdout("Hello, {name}!\n");
}

#[test]
fn translate_rejects_unsupported_language() {
    cli(&FIXTURES.join("clean"))
        .args(["translate", "greet", "--lang", "de"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language 'de'"));
}

#[test]
fn translate_rejects_malformed_variable() {
    cli(&FIXTURES.join("clean"))
        .args(["translate", "greet", "--lang", "en", "--var", "Aysel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid variable 'Aysel'"));
}
