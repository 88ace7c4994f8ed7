use std::path::Path;

use crate::config::Config;
use crate::frontmatter::Frontmatter;

use super::diagnostics::Diagnostic;

pub mod assets;
pub mod code_blocks;
pub mod cursive;
pub mod header_fields;
pub mod headlines;
pub mod links;
pub mod preview;
pub mod tags;
pub mod whitespace;
pub mod words;

/// Per-document state shared by every check in a run.
///
/// The frontmatter is the one parsed from the original content before any
/// check ran; it is never re-derived, even when a rewrite changes text that
/// looks like a header.
pub struct RuleContext<'a> {
    pub config: &'a Config,
    pub frontmatter: &'a Frontmatter,
    pub path: &'a Path,
}

/// What one check produced: diagnostics, and for mutating checks the
/// replacement content.
pub struct RuleOutcome {
    pub content: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RuleOutcome {
    /// Nothing to report, content untouched.
    pub fn clean() -> Self {
        Self {
            content: None,
            diagnostics: Vec::new(),
        }
    }

    /// Findings only; content untouched.
    pub fn report(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            content: None,
            diagnostics,
        }
    }

    /// Replacement content plus any findings.
    pub fn rewrite(content: String, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            content: Some(content),
            diagnostics,
        }
    }
}

/// One independent detection or detection-plus-rewrite unit.
///
/// Checks compute their own suppression keys and attach them to the
/// diagnostics they emit; the runner filters suppressed findings so a check
/// author cannot forget the lookup. Mutating checks must additionally gate
/// the rewrite itself on their whole-rule key, and must be idempotent: run
/// twice over their own output, the second pass changes nothing.
pub trait Rule: Sync {
    fn name(&self) -> &'static str;

    /// Whether this check is switched on in the given configuration.
    fn enabled(&self, config: &Config) -> bool;

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome;
}

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
