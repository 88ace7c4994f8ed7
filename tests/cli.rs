//! CLI integration tests: exit codes, in-place rewrites, and the hook modes.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BASIC_CONFIG: &str = "\
check_whitespaces_at_end: true
check_find_more_separator: true
check_lowercase_tags: true
do_remove_whitespaces_at_end: true
";

/// A temp repo with a config file; returns (dir, config path).
fn setup() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join(".postlint.yaml");
    fs::write(&config, BASIC_CONFIG).unwrap();
    (temp, config)
}

#[test]
fn test_help() {
    cargo_bin_cmd!("postlint")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Check Markdown blog posts"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("postlint")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    cargo_bin_cmd!("postlint")
        .args(["--verbose", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn test_clean_file_passes() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntitle: x\ntags: [fine]\n---\n\nTeaser.\n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning").not());
}

#[test]
fn test_warnings_do_not_fail_the_run() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(&post, "---\ntitle: x\ntags: [fine]\n---\n\nNo separator.\n").unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("more_separator"))
        .stdout(predicate::str::contains("skip_more_separator"));
}

#[test]
fn test_suppressed_warning_is_silent() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntitle: x\ntags: [fine]\nsuppresswarnings:\n  - skip_more_separator\n---\n\nNo separator.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("more_separator").not());
}

#[test]
fn test_invalid_tag_fails() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntags: [\"Not Fine\"]\n---\n\nTeaser.\n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid tag: Not Fine"));
}

#[test]
fn test_rewrites_in_place() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntitle: x\ntags: [fine]\n---\n\ndirty line  \n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success();

    let rewritten = fs::read_to_string(&post).unwrap();
    assert!(rewritten.contains("\ndirty line\n"));
    assert!(!rewritten.contains("dirty line  "));
}

#[test]
fn test_dry_run_leaves_file_alone() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    let original = "---\ntitle: x\ntags: [fine]\n---\n\ndirty line  \n\n<!--more-->\n\nBody.\n";
    fs::write(&post, original).unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-n", "-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&post).unwrap(), original);
}

#[test]
fn test_dry_run_print_shows_result() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntitle: x\ntags: [fine]\n---\n\ndirty line  \n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-n", "-p", "-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\ndirty line\n"));
}

#[test]
fn test_check_mode_fails_on_pending_rewrite() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    let original = "---\ntitle: x\ntags: [fine]\n---\n\ndirty line  \n\n<!--more-->\n\nBody.\n";
    fs::write(&post, original).unwrap();

    cargo_bin_cmd!("postlint")
        .args(["--check", "-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Diff in"));

    // check mode never writes
    assert_eq!(fs::read_to_string(&post).unwrap(), original);
}

#[test]
fn test_check_mode_passes_clean_file() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(
        &post,
        "---\ntitle: x\ntags: [fine]\n---\n\nTeaser.\n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["--check", "-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_broken_frontmatter_fails() {
    let (temp, config) = setup();
    let post = temp.path().join("post.md");
    fs::write(&post, "# No frontmatter here\n").unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not start with frontmatter"));
}

#[test]
fn test_invalid_config_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join(".postlint.yaml");
    // enabled check without its parameter block
    fs::write(&config, "check_missing_tags: true\n").unwrap();
    let post = temp.path().join("post.md");
    fs::write(&post, "---\ntitle: x\n---\n\nBody.\n").unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), post.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing_tags"));
}

#[test]
fn test_non_markdown_argument_is_rejected() {
    let (temp, config) = setup();
    let other = temp.path().join("notes.txt");
    fs::write(&other, "x").unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), other.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a Markdown file"));
}

#[test]
fn test_page_bundle_directory() {
    let (temp, config) = setup();
    let bundle = temp.path().join("a-day-at-the-lake");
    fs::create_dir(&bundle).unwrap();
    fs::write(
        bundle.join("index.md"),
        "---\ntitle: x\ntags: [fine]\n---\n\nTeaser.\n\n<!--more-->\n\nBody.\n",
    )
    .unwrap();

    cargo_bin_cmd!("postlint")
        .args(["-c", config.to_str().unwrap(), bundle.to_str().unwrap()])
        .assert()
        .success();
}
