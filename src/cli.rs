use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postlint")]
#[command(author, version)]
#[command(about = "Check Markdown blog posts before committing them")]
#[command(
    long_about = "Postlint runs a configurable battery of checks over Markdown postings with \
    YAML frontmatter: required tags, preview metadata, link hygiene, code fence types, and \
    more. Some checks rewrite the posting in place (trailing whitespace, dead links); all \
    findings can be suppressed per document through the 'suppresswarnings' header field."
)]
#[command(after_help = "\
EXAMPLES:

    # Check one posting
    postlint content/posts/a-day-at-the-lake/index.md

    # Check a page bundle (uses its index.md)
    postlint content/posts/a-day-at-the-lake

    # Check everything under the configured content directories
    postlint --all

    # As a pre-commit hook: fail when a rewrite would be needed
    postlint --check content/posts/a-day-at-the-lake/index.md

    # Show what would change, without touching the file
    postlint -n -p content/posts/a-day-at-the-lake/index.md

CONFIGURATION:

Postlint looks for .postlint.yaml or postlint.yaml, walking up from the
current directory and stopping at the repository root (.git). Every check is
off by default; a config file is required.

Example .postlint.yaml:

    check_whitespaces_at_end: true
    do_remove_whitespaces_at_end: true
    check_missing_other_tags_both_ways: true
    missing_other_tags_both_ways:
      - tag1: icecream
        tag2: ice-cream")]
pub struct Cli {
    /// Markdown files or page-bundle directories (scans content dirs if empty)
    #[arg(help = "Markdown files or page-bundle directories to check")]
    #[arg(
        long_help = "Markdown files to check. A directory is accepted when it contains an \
        index.md (Hugo page bundles). Without arguments, the configured content directories \
        are scanned for postings newer than the config file, plus drafts."
    )]
    pub files: Vec<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    #[arg(help = "Configuration file (default: .postlint.yaml found tree-upwards)")]
    pub config: Option<PathBuf>,

    /// Check all discovered files, not only newer ones
    #[arg(short, long)]
    pub all: bool,

    /// Don't write changed files back
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the resulting document in dry-run mode
    #[arg(short, long, requires = "dry_run")]
    pub print: bool,

    /// Fail when content would be rewritten, without writing (for hooks/CI)
    #[arg(long)]
    pub check: bool,

    /// Be more verbose
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Run quietly
    #[arg(short, long)]
    pub quiet: bool,
}
