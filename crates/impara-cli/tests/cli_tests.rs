//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

fn impara() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("impara").unwrap()
}

/// A command isolated from any real config or progress file.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = impara();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("IMPARA_DATA_DIR", DATA_DIR)
        .env("IMPARA_PROGRESS", dir.path().join("progress.json"))
        .env_remove("RUST_LOG");
    cmd
}

const PROGRESS: &str = r#"{
  "parlare": {
    "present": [
      {"correct": 1, "attempts": 1}, {"correct": 1, "attempts": 1},
      {"correct": 0, "attempts": 1}, {"correct": 0, "attempts": 0},
      {"correct": 0, "attempts": 0}, {"correct": 0, "attempts": 0}
    ],
    "lex": {"it2en": {"correct": 3, "attempts": 3}, "en2it": {"correct": 3, "attempts": 4}}
  },
  "nouns": {"n-casa": {"lex": {"it2en": {"correct": 1, "attempts": 2}}}}
}"#;

#[test]
fn help_output() {
    impara()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Offline Italian conjugation and vocabulary drills",
        ));
}

#[test]
fn version_output() {
    impara()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("impara"));
}

#[test]
fn validate_data_directory() {
    impara()
        .arg("validate")
        .arg("--data")
        .arg("../../data")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Category: Everyday basics (10 verbs, 8 nouns, 6 adjectives)",
        ))
        .stdout(predicate::str::contains("Category: Travel (4 verbs"))
        .stdout(predicate::str::contains("All datasets valid."));
}

#[test]
fn validate_jsonl_file() {
    impara()
        .arg("validate")
        .arg("--data")
        .arg("../../data/verbs_sample.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 verbs"));
}

#[test]
fn validate_guesses_kind_from_file_name() {
    impara()
        .arg("validate")
        .arg("--data")
        .arg("../../data/nouns.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("8 nouns"));

    impara()
        .arg("validate")
        .arg("--data")
        .arg("../../data/adjectives.json")
        .arg("--kind")
        .arg("adjectives")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 adjectives"));
}

#[test]
fn validate_invalid_file() {
    impara()
        .arg("validate")
        .arg("--data")
        .arg("../../data/verbs_invalid.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema validation failed"))
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("finire"));
}

#[test]
fn validate_reports_lint_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verbs.jsonl");
    std::fs::write(
        &path,
        "{\"infinitive\": \"parlare\"}\n{\"infinitive\": \"parlare\", \"translation\": \"to speak\"}\n",
    )
    .unwrap();

    impara()
        .arg("validate")
        .arg("--data")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[parlare] WARNING: duplicate key"))
        .stdout(predicate::str::contains("[parlare] WARNING: missing translation"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    impara()
        .arg("validate")
        .arg("--data")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn tables_present_with_derived_forms() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("tables")
        .arg("--tense")
        .arg("present")
        .assert()
        .success()
        .stdout(predicate::str::contains("Present tense (14 verbs)"))
        .stdout(predicate::str::contains("vado"))
        .stdout(predicate::str::contains("parla / parlate"))
        .stdout(predicate::str::contains("viaggiamo"));
}

#[test]
fn tables_past_marks_missing_forms() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("tables")
        .arg("--tense")
        .arg("past")
        .arg("--category")
        .arg("viaggio")
        .assert()
        .success()
        .stdout(predicate::str::contains("(n/a)"))
        .stdout(predicate::str::contains(
            "4 verb(s) have no past forms stored or derivable.",
        ));
}

#[test]
fn tables_endings() {
    impara()
        .arg("tables")
        .arg("--endings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Present tense endings"))
        .stdout(predicate::str::contains("-iamo"))
        .stdout(predicate::str::contains("-ono"));
}

#[test]
fn tables_rejects_unknown_tense() {
    impara()
        .arg("tables")
        .arg("--tense")
        .arg("pluperfect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tense"));
}

#[test]
fn status_without_progress() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No progress recorded yet."))
        .stdout(predicate::str::contains("Progress file:"))
        .stdout(predicate::str::contains("progress.json"));
}

#[test]
fn status_text_table() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.json"), PROGRESS).unwrap();

    isolated(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Verbs (present, 1/1 past the lexical gate)"))
        .stdout(predicate::str::contains("parlare"))
        .stdout(predicate::str::contains("67%"))
        .stdout(predicate::str::contains("Nouns (0/1 past the lexical gate)"));
}

#[test]
fn status_json_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.json"), PROGRESS).unwrap();

    let output = isolated(&dir)
        .arg("status")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tense"], "present");
    assert_eq!(report["verbs"][0]["key"], "parlare");
    assert_eq!(report["verbs"][0]["attempts"], 3);
    assert_eq!(report["verbs"][0]["gated"], true);
    assert_eq!(report["nouns"][0]["lexical_attempts"], 2);
}

#[test]
fn status_json_to_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.json"), PROGRESS).unwrap();
    let out = dir.path().join("reports").join("status.json");

    isolated(&dir)
        .arg("status")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"created_at\""));
}

#[test]
fn status_unknown_format() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("status")
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn practice_quit_from_category_menu() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Choose a Category ==="))
        .stdout(predicate::str::contains("1) Everyday basics (base)"))
        .stdout(predicate::str::contains("2) Travel (viaggio)"))
        .stdout(predicate::str::contains("A presto!"));
}

#[test]
fn practice_survives_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .write_stdin(b"\xff\xfe\n3\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice."))
        .stdout(predicate::str::contains("A presto!"));
}

#[test]
fn practice_rejects_broken_dataset_at_startup() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(
        data.join("themes.json"),
        r#"{"themes": [{"id": "base", "label": "Basics", "files": {"verbs": ["verbs.json"], "nouns": ["nouns.json"]}}]}"#,
    )
    .unwrap();
    std::fs::write(data.join("verbs.json"), r#"[{"infinitive": "parlare"}]"#).unwrap();
    std::fs::write(
        data.join("nouns.json"),
        r#"[{"id": "n-casa", "lemma": "casa", "gender": "f", "forms": {"sg": "casa", "pl": ""}}]"#,
    )
    .unwrap();

    isolated(&dir)
        .env("IMPARA_DATA_DIR", &data)
        .arg("practice")
        .write_stdin("1\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Choose a Category").not())
        .stderr(predicate::str::contains("Schema validation failed"))
        .stderr(predicate::str::contains("n-casa"));
}

#[test]
fn practice_noun_warmup_records_answers() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .arg("--seed")
        .arg("7")
        .write_stdin("1\n2\n\nxyz\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) Practice verbs (10)"))
        .stdout(predicate::str::contains("=== Nouns: Everyday basics (8 nouns) ==="))
        .stdout(predicate::str::contains("✘ Wrong"))
        .stdout(predicate::str::contains("Exiting to main menu."));

    let progress = std::fs::read_to_string(dir.path().join("progress.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&progress).unwrap();
    assert!(doc["nouns"].as_object().is_some_and(|nouns| nouns.len() == 1));
}

#[test]
fn practice_category_flag_skips_menu() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .arg("--category")
        .arg("viaggio")
        .write_stdin("2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Practice: Travel ==="))
        .stdout(predicate::str::contains("2) Practice nouns: no data"))
        .stdout(predicate::str::contains("No noun data for this category."))
        .stdout(predicate::str::contains("Choose a Category").not());
}

#[test]
fn practice_warmup_only() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .arg("--category")
        .arg("viaggio")
        .write_stdin("4\nq\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Verb warm-up: Travel (4 verbs) ==="))
        .stdout(predicate::str::contains("Warm-up finished!"))
        .stdout(predicate::str::contains("Return to main menu? (Y/n): "));
}

#[test]
fn practice_unknown_category() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("practice")
        .arg("--category")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category: nope"));
}

#[test]
fn practice_without_catalog_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .env("IMPARA_DATA_DIR", dir.path().join("missing"))
        .arg("practice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("themes.json"));
}

#[test]
fn explicit_config_is_used() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "lexical_gate = 4\n").unwrap();
    std::fs::write(dir.path().join("progress.json"), PROGRESS).unwrap();

    isolated(&dir)
        .arg("status")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Verbs (present, 0/1 past the lexical gate)"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("status")
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created impara.toml"))
        .stdout(predicate::str::contains("Created data/themes.json"));

    assert!(dir.path().join("impara.toml").exists());
    assert!(dir.path().join("data/verbs.json").exists());
    assert!(dir.path().join("data/viaggio.jsonl").exists());

    impara()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--data")
        .arg("data")
        .assert()
        .success()
        .stdout(predicate::str::contains("All datasets valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
