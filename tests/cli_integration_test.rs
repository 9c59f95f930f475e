//! Runs the `docprune` binary against temporary PHP projects.

mod common;

use assert_cmd::Command;
use common::create_php_project;
use indoc::indoc;
use std::fs;

const COUNTER: &str = indoc! {r#"
    <?php
    class Counter
    {
        /**
         * @return int
         */
        public function getCount(): int
        {
            return 1;
        }
    }
"#};

const COUNTER_FIXED: &str = indoc! {r#"
    <?php
    class Counter
    {
        public function getCount(): int
        {
            return 1;
        }
    }
"#};

fn docprune() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docprune"));
    cmd.env_remove("DOCPRUNE_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_fix_rewrites_files_in_place() {
    let project = create_php_project(&[("src/Counter.php", COUNTER)]);

    docprune()
        .current_dir(project.path())
        .args(["fix", "src"])
        .assert()
        .success();

    let content = fs::read_to_string(project.path().join("src/Counter.php")).unwrap();
    assert_eq!(content, COUNTER_FIXED);
}

#[test]
fn test_dry_run_reports_pending_changes_with_exit_code() {
    let project = create_php_project(&[("Counter.php", COUNTER)]);

    docprune()
        .current_dir(project.path())
        .args(["fix", "--dry-run", "."])
        .assert()
        .code(1);

    let content = fs::read_to_string(project.path().join("Counter.php")).unwrap();
    assert_eq!(content, COUNTER);
}

#[test]
fn test_dry_run_on_clean_project_succeeds() {
    let project = create_php_project(&[("Counter.php", COUNTER_FIXED)]);

    docprune()
        .current_dir(project.path())
        .args(["fix", "--dry-run", "."])
        .assert()
        .success();
}

#[test]
fn test_json_report() {
    let project = create_php_project(&[("Counter.php", COUNTER)]);

    let output = docprune()
        .current_dir(project.path())
        .args(["fix", "--dry-run", "--format", "json", "."])
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["files_scanned"], 1);
    let removal = &report["files"][0]["removals"][0];
    assert_eq!(removal["callable"], "Counter::getCount");
    assert_eq!(removal["tag"], "return");
    assert_eq!(removal["line"], 7);
}

#[test]
fn test_config_ignore_patterns_skip_files() {
    let project = create_php_project(&[
        (".docprune.toml", "[ignore]\npatterns = [\"vendor/**\"]\n"),
        ("vendor/Counter.php", COUNTER),
        ("src/Counter.php", COUNTER),
    ]);

    docprune()
        .current_dir(project.path())
        .args(["fix", "."])
        .assert()
        .success();

    let vendored = fs::read_to_string(project.path().join("vendor/Counter.php")).unwrap();
    let own = fs::read_to_string(project.path().join("src/Counter.php")).unwrap();
    assert_eq!(vendored, COUNTER);
    assert_eq!(own, COUNTER_FIXED);
}

#[test]
fn test_invalid_explicit_config_fails() {
    let project = create_php_project(&[("broken.toml", "[fixer\n"), ("Counter.php", COUNTER)]);

    docprune()
        .current_dir(project.path())
        .args(["fix", "--config", "broken.toml", "."])
        .assert()
        .failure();

    let content = fs::read_to_string(project.path().join("Counter.php")).unwrap();
    assert_eq!(content, COUNTER);
}

#[test]
fn test_init_writes_default_config_once() {
    let project = create_php_project(&[]);

    docprune()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .success();
    assert!(project.path().join(".docprune.toml").exists());

    docprune()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .failure();

    docprune()
        .current_dir(project.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
