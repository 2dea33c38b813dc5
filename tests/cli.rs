//! Binary smoke tests: stdin piping, flags and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LISTING: &str = "\
(dryrun) delete: s3://bkt/old/report.csv
(dryrun) upload: /tmp/report.csv to s3://bkt/new/report.csv
(dryrun) delete: s3://bkt/.dropbox.cache/a.tmp
random log line
";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("s3dryview").expect("binary should build");
    // Keep user-level config out of the picture.
    cmd.env("HOME", env!("CARGO_TARGET_TMPDIR")).env_remove("RUST_LOG");
    cmd
}

#[test]
fn stdin_plain_report() {
    cmd()
        .args(["--color", "never"])
        .write_stdin(LISTING)
        .assert()
        .success()
        .stdout(
            "DELETE: .dropbox.cache/a.tmp\n---\n{old -> new}/report.csv\n---\nrandom log line\n",
        );
}

#[test]
fn color_is_forced_by_default() {
    cmd()
        .write_stdin(LISTING)
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}["))
        .stdout(predicate::str::contains("report.csv"));
}

#[test]
fn dash_reads_stdin() {
    cmd()
        .args(["-", "--color", "never"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("---\n---\nhello\n");
}

#[test]
fn json_format() {
    cmd()
        .args(["--format", "json"])
        .write_stdin(LISTING)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"moves\""))
        .stdout(predicate::str::contains("\"file_name\": \"report.csv\""));
}

#[test]
fn missing_input_file_fails() {
    cmd()
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error opening input"));
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/definitely/not/here.toml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn diagnostics_stay_off_stdout() {
    cmd()
        .args(["-vvv", "--color", "never"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("---\n---\nhello\n");
}

#[test]
fn color_auto_without_terminal_is_plain() {
    cmd()
        .args(["--color", "auto"])
        .env_remove("CLICOLOR_FORCE")
        .write_stdin("(dryrun) delete: s3://bkt/a/x\n")
        .assert()
        .success()
        .stdout("---\nDELETE: a/x\n---\n");
}

#[test]
fn config_auto_color_without_terminal_is_plain() {
    let cwd = TempDir::new().expect("Failed to create temp directory");
    fs::write(cwd.path().join(".s3dryviewrc.toml"), "[output]\ncolor = \"auto\"\n")
        .expect("Failed to write config");

    cmd()
        .current_dir(cwd.path())
        .env_remove("CLICOLOR_FORCE")
        .write_stdin("(dryrun) delete: s3://bkt/a/x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn config_discovered_in_current_directory() {
    let cwd = TempDir::new().expect("Failed to create temp directory");
    fs::write(cwd.path().join(".s3dryviewrc.toml"), "[output]\ncolor = \"never\"\n")
        .expect("Failed to write config");

    cmd()
        .current_dir(cwd.path())
        .write_stdin("(dryrun) delete: s3://bkt/a/x\n")
        .assert()
        .success()
        .stdout("---\nDELETE: a/x\n---\n");
}

#[test]
fn config_discovered_in_home() {
    let cwd = TempDir::new().expect("Failed to create temp directory");
    let home = TempDir::new().expect("Failed to create temp directory");
    write_home_config(
        home.path(),
        "[classifier]\ncache_marker = \"/scratch/\"\n\n[output]\ncolor = \"never\"\n",
    );

    cmd()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .write_stdin("(dryrun) delete: s3://bkt/scratch/a\n")
        .assert()
        .success()
        .stdout("DELETE: scratch/a\n---\n---\n");
}

#[test]
fn current_directory_config_wins_over_home() {
    let cwd = TempDir::new().expect("Failed to create temp directory");
    let home = TempDir::new().expect("Failed to create temp directory");
    fs::write(cwd.path().join(".s3dryviewrc.toml"), "[output]\ncolor = \"never\"\n")
        .expect("Failed to write config");
    write_home_config(home.path(), "[classifier]\ncache_marker = \"/scratch/\"\n");

    // Only the first file found is used; the home marker must not apply.
    cmd()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .write_stdin("(dryrun) delete: s3://bkt/scratch/a\n")
        .assert()
        .success()
        .stdout("---\nDELETE: scratch/a\n---\n");
}

fn write_home_config(home: &Path, content: &str) {
    let dir = home.join(".config").join("s3dryview");
    fs::create_dir_all(&dir).expect("Failed to create config directory");
    fs::write(dir.join("config.toml"), content).expect("Failed to write config");
}
