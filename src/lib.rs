pub mod checker;
pub mod config;
pub mod discover;
pub mod frontmatter;

pub use checker::{CheckRunner, Diagnostic, RunResult, Severity};
pub use config::Config;
pub use frontmatter::{Frontmatter, FrontmatterError};

use std::path::Path;

/// Runs the full configured check pipeline over one document.
///
/// Parses the frontmatter once, threads the content through every enabled
/// check in their fixed order, filters suppressed findings, and reports
/// whether the content was rewritten.
///
/// # Arguments
///
/// * `input` - The raw document content (frontmatter plus Markdown body)
/// * `config` - The validated run configuration
/// * `path` - Path to the document, used by checks that inspect sibling files
///
/// # Errors
///
/// Returns `FrontmatterError` when the document does not start with a
/// parseable frontmatter block; no checks run in that case.
pub fn check(input: &str, config: &Config, path: &Path) -> Result<RunResult, FrontmatterError> {
    CheckRunner::new().run(config, input, path)
}
