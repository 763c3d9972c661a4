//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `paperly` command isolated in `dir`: no global config, no creator override.
fn paperly(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("paperly").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("PAPERLY_CREATOR")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config that keeps papers under `dir/papers`.
fn write_config(dir: &Path, creator: &str, role: &str) {
    std::fs::write(
        dir.join("paperly.toml"),
        format!(
            "[store]\ntype = \"json\"\ndir = \"papers\"\n\n[identity]\ncreator = \"{creator}\"\nrole = \"{role}\"\n"
        ),
    )
    .unwrap();
}

fn save_paper(dir: &Path, title: &str, questions: &str) {
    paperly(dir)
        .args(["generate", "--save", "--title", title])
        .args(["--subject", "Science", "--grade", "Grade 6"])
        .args(["--questions", questions])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved paper"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("practice"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("paperly"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    paperly(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created paperly.toml"))
        .stdout(predicate::str::contains("Created params/example.toml"));

    assert!(dir.path().join("paperly.toml").exists());
    assert!(dir.path().join("params/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    paperly(dir.path()).arg("init").assert().success();

    paperly(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn generate_from_example_params() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path()).arg("init").assert().success();

    paperly(dir.path())
        .args(["generate", "--params", "params/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generated 10 questions (4 easy, 4 medium, 2 hard)",
        ))
        .stdout(predicate::str::contains("What is the sum of 5 and 7?"));
}

#[test]
fn generate_rejects_zero_questions() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .args(["generate", "--title", "T", "--subject", "S", "--grade", "G"])
        .args(["--questions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question count must be at least 1"));
}

#[test]
fn generate_warns_on_bad_distribution() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .args(["generate", "--title", "T", "--subject", "S", "--grade", "G"])
        .args(["--questions", "4", "--easy", "50", "--medium", "50", "--hard", "50"])
        .assert()
        .success()
        .stderr(predicate::str::contains("should equal 100%"))
        .stdout(predicate::str::contains("Generated 4 questions"));
}

#[test]
fn generated_output_validates() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("paper.json");

    paperly(dir.path())
        .args(["generate", "--title", "Quiz", "--subject", "Maths", "--grade", "7"])
        .args(["--questions", "3", "--marks", "2", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidate written to"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["total_marks"], 6);
    assert_eq!(value["questions"].as_array().unwrap().len(), 3);

    paperly(dir.path())
        .arg("validate")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions, 6 total marks"))
        .stdout(predicate::str::contains("Paper valid."));
}

#[test]
fn validate_rejects_tampered_total() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("paper.json");

    paperly(dir.path())
        .args(["generate", "--title", "Quiz", "--subject", "Maths", "--grade", "7"])
        .args(["--questions", "2", "--output"])
        .arg(&out)
        .assert()
        .success();

    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    value["total_marks"] = serde_json::json!(99);
    std::fs::write(&out, value.to_string()).unwrap();

    paperly(dir.path())
        .arg("validate")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .args(["validate", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn practice_generated_paper_one_of_four() {
    let dir = TempDir::new().unwrap();
    paperly(dir.path())
        .args(["practice", "--title", "T", "--subject", "S", "--grade", "G"])
        .args(["--questions", "4", "--easy", "100", "--medium", "0", "--hard", "0"])
        .write_stdin("1\n1\n1\n1\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 5/20 (25%)"))
        .stdout(predicate::str::contains("Keep Practicing!"));
}

#[test]
fn save_list_search_show() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "ms-rivera", "teacher");

    save_paper(dir.path(), "Fractions Quiz", "3");
    save_paper(dir.path(), "Decimals Test", "2");
    assert!(dir.path().join("papers/paper-1.json").exists());
    assert!(dir.path().join("papers/paper-2.json").exists());

    paperly(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractions Quiz"))
        .stdout(predicate::str::contains("Decimals Test"));

    paperly(dir.path())
        .args(["search", "quiz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractions Quiz"))
        .stdout(predicate::str::contains("Decimals Test").not());

    paperly(dir.path())
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created by ms-rivera | 2 questions | 10 total marks"));

    let output = paperly(dir.path())
        .args(["show", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["total_marks"], 15);
}

#[test]
fn list_mine_filters_by_creator() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");
    save_paper(dir.path(), "Alice Quiz", "1");

    paperly(dir.path())
        .env("PAPERLY_CREATOR", "bob")
        .args(["generate", "--save", "--title", "Bob Quiz"])
        .args(["--subject", "S", "--grade", "G", "--questions", "1"])
        .assert()
        .success();

    paperly(dir.path())
        .args(["list", "--mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Quiz"))
        .stdout(predicate::str::contains("Bob Quiz").not());
}

#[test]
fn show_missing_paper_fails() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");

    paperly(dir.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paper 42 not found"));
}

#[test]
fn students_cannot_save() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "sam", "student");

    paperly(dir.path())
        .args(["generate", "--save", "--title", "T", "--subject", "S", "--grade", "G"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only teachers can save papers"));
    assert!(!dir.path().join("papers").exists());
}

#[test]
fn merge_preview_and_save() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");
    save_paper(dir.path(), "Quiz A", "2");
    save_paper(dir.path(), "Quiz B", "3");

    paperly(dir.path())
        .args(["merge", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested title:   Quiz A + Quiz B"))
        .stdout(predicate::str::contains("Merged paper: 5 questions, 25 total marks"));
    assert!(!dir.path().join("papers/paper-3.json").exists());

    paperly(dir.path())
        .args(["merge", "1", "2", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved merged paper"));

    paperly(dir.path())
        .args(["show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz A + Quiz B (Science / Grade 6)"))
        .stdout(predicate::str::contains("5 questions | 25 total marks"));
}

#[test]
fn practice_stored_paper() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");
    save_paper(dir.path(), "Quiz", "2");

    paperly(dir.path())
        .args(["practice", "--paper", "1"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Practicing 'Quiz'"))
        .stdout(predicate::str::contains("Session abandoned."));
}

#[test]
fn edit_saves_a_new_paper() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");
    save_paper(dir.path(), "Quiz", "2");

    let edits = dir.path().join("edits.json");
    std::fs::write(
        &edits,
        r#"[
            { "op": "set_text", "index": 0, "text": "What is 6 x 7?" },
            { "op": "set_marks", "index": 0, "marks": 2 }
        ]"#,
    )
    .unwrap();

    paperly(dir.path())
        .args(["edit", "1", "--save", "--edits"])
        .arg(&edits)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions, 7 total marks"))
        .stdout(predicate::str::contains("Saved paper 2"));

    paperly(dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 total marks"))
        .stdout(predicate::str::contains("What is 6 x 7?").not());

    paperly(dir.path())
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What is 6 x 7?"))
        .stdout(predicate::str::contains("7 total marks"));
}

#[test]
fn edit_with_blank_question_is_not_saved() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "alice", "teacher");
    save_paper(dir.path(), "Quiz", "1");

    let edits = dir.path().join("edits.json");
    std::fs::write(&edits, r#"[{ "op": "add", "marks": 3 }]"#).unwrap();

    paperly(dir.path())
        .args(["edit", "1", "--save", "--edits"])
        .arg(&edits)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[Q2]"))
        .stderr(predicate::str::contains("invalid paper"));
    assert!(!dir.path().join("papers/paper-2.json").exists());
}
