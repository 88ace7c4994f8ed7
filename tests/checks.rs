//! End-to-end tests for the check pipeline: suppression, rewrites,
//! idempotence, and exit-status policy.

use std::path::Path;

use postlint::{Config, Severity, check};

fn config(yaml: &str) -> Config {
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    config
}

fn run(doc: &str, config: &Config) -> postlint::RunResult {
    check(doc, config, Path::new("post/index.md")).unwrap()
}

const PAIR_CONFIG: &str = "\
check_missing_other_tags_both_ways: true
missing_other_tags_both_ways:
  - tag1: icecream
    tag2: ice-cream
";

#[test]
fn pair_key_is_canonical_in_both_directions() {
    let config = config(PAIR_CONFIG);

    let doc = "---\ntags: [icecream]\n---\n\nA posting about frozen desserts.\n";
    let result = run(doc, &config);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        result.diagnostics[0].suppress_key.as_deref(),
        Some("skip_missing_other_tags_both_ways_icecream_ice-cream")
    );
    // warnings alone do not fail the run
    assert_eq!(result.exit_status, 0);

    let doc = "---\ntags: [ice-cream]\n---\n\nSame subject, other spelling.\n";
    let result = run(doc, &config);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].suppress_key.as_deref(),
        Some("skip_missing_other_tags_both_ways_icecream_ice-cream")
    );
}

#[test]
fn one_suppression_silences_both_directions() {
    let config = config(PAIR_CONFIG);
    let header = "suppresswarnings:\n  - skip_missing_other_tags_both_ways_icecream_ice-cream";

    for tags in ["[icecream]", "[ice-cream]"] {
        let doc = format!("---\ntags: {tags}\n{header}\n---\n\nBody.\n");
        let result = run(&doc, &config);
        assert!(result.diagnostics.is_empty(), "tags {tags} not silenced");
    }
}

#[test]
fn suppression_is_exact_not_prefixed() {
    let config = config(PAIR_CONFIG);
    // a shorter, prefix-only flag must not match
    let doc = "---\ntags: [icecream]\nsuppresswarnings:\n  - skip_missing_other_tags_both_ways\n---\n\nBody.\n";
    let result = run(doc, &config);
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn whitespace_rewrite_spares_quotes() {
    let config = config(
        "check_whitespaces_at_end: true\ndo_remove_whitespaces_at_end: true\n",
    );
    let doc = "---\ntitle: x\n---\n\nplain line   \n> quoted line  \n";

    let result = run(doc, &config);
    assert!(result.changed);
    similar_asserts::assert_eq!(
        result.content,
        "---\ntitle: x\n---\n\nplain line\n> quoted line  \n"
    );
    // detection plus rewrite, both reported
    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(result.exit_status, 0);
}

#[test]
fn pipeline_is_idempotent() {
    let config = config(
        "\
check_whitespaces_at_end: true
do_remove_whitespaces_at_end: true
do_replace_broken_links: true
broken_links:
  - orig: old.example.com
    replace: https://new.example.com/
check_fixme: true
",
    );
    let doc = "---\ntitle: x\n---\n\ndirty line  \nand a [link](http://old.example.com/page)\n";

    let first = run(doc, &config);
    assert!(first.changed);

    let second = run(&first.content, &config);
    assert!(!second.changed, "second run must be a fixed point");
    similar_asserts::assert_eq!(second.content, first.content);
}

#[test]
fn unsuppressable_format_errors_fail_the_run() {
    let config = config("check_lowercase_tags: true\n");
    let doc = "---\ntags: [\"Lake Tahoe\"]\nsuppresswarnings:\n  - skip_lowercase_tags\n---\n\nBody.\n";

    let result = run(doc, &config);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
    assert_eq!(result.exit_status, 1);
    assert!(result.has_errors());
}

#[test]
fn missing_frontmatter_runs_no_checks() {
    let config = config("check_fixme: true\n");
    let result = check("# FIXME no header\n", &config, Path::new("post/index.md"));
    assert!(result.is_err());
}

#[test]
fn diagnostics_keep_emission_order() {
    let config = config(
        "check_find_more_separator: true\ncheck_fixme: true\ncheck_http_link: true\n",
    );
    let doc = "---\ntitle: x\n---\n\nFIXME see http://example.com\n";

    let result = run(doc, &config);
    let rules: Vec<_> = result.diagnostics.iter().map(|d| d.rule).collect();
    // registry order: more_separator before http_link before fixme
    assert_eq!(rules, vec!["more_separator", "http_link", "fixme"]);
}

#[test]
fn enabled_checks_without_findings_stay_silent() {
    let config = config(
        "\
check_whitespaces_at_end: true
check_find_more_separator: true
check_http_link: true
check_fixme: true
check_dass: true
",
    );
    let doc = "---\ntitle: x\n---\n\nAll good here.\n\n<!--more-->\n\nNothing to see.\n";

    let result = run(doc, &config);
    assert!(result.diagnostics.is_empty());
    assert!(!result.changed);
    assert_eq!(result.exit_status, 0);
}
