use std::path::Path;

use crate::config::Config;
use crate::frontmatter::{Frontmatter, FrontmatterError};

use super::diagnostics::{RunResult, Severity};
use super::rules::{RuleContext, RuleRegistry};

/// Threads one document through the ordered check pipeline.
///
/// The frontmatter is parsed once from the original content; every check,
/// however late in the pipeline, sees that same view. Content flows from
/// check to check as an immutable value: a mutating check returns a full
/// replacement, never edits a shared buffer, so two rewrites compose
/// deterministically and `changed` can be decided byte for byte.
pub struct CheckRunner {
    registry: RuleRegistry,
}

impl CheckRunner {
    pub fn new() -> Self {
        Self::with_registry(super::default_registry())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Run all enabled checks over `input`.
    ///
    /// Fails fast with `FrontmatterError` before any check executes. All
    /// check-level findings flow through suppression filtering here, so a
    /// check author cannot forget the lookup.
    pub fn run(
        &self,
        config: &Config,
        input: &str,
        path: &Path,
    ) -> Result<RunResult, FrontmatterError> {
        let frontmatter = Frontmatter::parse(input)?;
        let ctx = RuleContext {
            config,
            frontmatter: &frontmatter,
            path,
        };

        let mut content = input.to_string();
        let mut diagnostics = Vec::new();
        let mut changed = false;

        for rule in self.registry.rules() {
            if !rule.enabled(config) {
                continue;
            }
            log::debug!("Running check: {}", rule.name());

            let outcome = rule.check(&content, &ctx);
            if let Some(new_content) = outcome.content {
                if new_content != content {
                    changed = true;
                }
                content = new_content;
            }
            for diagnostic in outcome.diagnostics {
                if let Some(key) = &diagnostic.suppress_key
                    && frontmatter.is_suppressed(key)
                {
                    log::debug!("Suppressed by '{key}': {}", diagnostic.message);
                    continue;
                }
                diagnostics.push(diagnostic);
            }
        }

        let exit_status = i32::from(
            diagnostics
                .iter()
                .any(|diagnostic| diagnostic.severity == Severity::Error),
        );

        Ok(RunResult {
            content,
            diagnostics,
            changed,
            exit_status,
        })
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}
