//! Trailing-whitespace detection and removal.
//!
//! Quote lines (`>`) keep their trailing whitespace in both checks: two
//! trailing spaces inside a blockquote are a deliberate hard line break.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::config::Config;

pub struct TrailingWhitespace;

impl Rule for TrailingWhitespace {
    fn name(&self) -> &'static str {
        "whitespaces_at_end"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_whitespaces_at_end
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let mut found = 0usize;
        let mut first_line = None;

        for (idx, line) in content.lines().enumerate() {
            if line.is_empty() || line.starts_with('>') {
                continue;
            }
            if line != line.trim_end() {
                found += 1;
                if first_line.is_none() {
                    first_line = Some(idx + 1);
                }
            }
        }

        if found == 0 {
            return RuleOutcome::clean();
        }

        let message = if found == 1 {
            "Found 1 line with whitespaces at the end".to_string()
        } else {
            format!("Found {found} lines with whitespaces at the end")
        };
        let mut diagnostic =
            Diagnostic::warning(self.name(), suppress::rule_key("whitespaces_at_end"), message);
        if let Some(line) = first_line {
            diagnostic = diagnostic.with_line(line);
        }
        RuleOutcome::report(vec![diagnostic])
    }
}

pub struct StripTrailingWhitespace;

impl Rule for StripTrailingWhitespace {
    fn name(&self) -> &'static str {
        "remove_whitespaces_at_end"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.do_remove_whitespaces_at_end
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        let key = suppress::rule_key("do_remove_whitespaces_at_end");
        // suppression must stop the rewrite itself, not just the report
        if ctx.frontmatter.is_suppressed(&key) {
            return RuleOutcome::clean();
        }

        let mut output = content
            .lines()
            .map(|line| {
                if line.is_empty() || line.starts_with('>') {
                    line
                } else {
                    line.trim_end()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        output.push('\n');

        if output == content {
            return RuleOutcome::clean();
        }
        RuleOutcome::rewrite(
            output,
            vec![Diagnostic::warning(
                self.name(),
                key,
                "Removing whitespaces at end of lines",
            )],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;
    use std::path::Path;

    fn run(rule: &dyn Rule, doc: &str) -> RuleOutcome {
        let config = Config::default();
        let frontmatter = Frontmatter::parse(doc).unwrap();
        let ctx = RuleContext {
            config: &config,
            frontmatter: &frontmatter,
            path: Path::new("post/index.md"),
        };
        rule.check(doc, &ctx)
    }

    #[test]
    fn counts_offending_lines() {
        let doc = "---\ntitle: x\n---\n\nclean line\ndirty line  \nanother one\t\n";
        let outcome = run(&TrailingWhitespace, doc);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].message.contains("2 lines"));
        assert_eq!(outcome.diagnostics[0].line, Some(6));
    }

    #[test]
    fn quotes_are_exempt() {
        let doc = "---\ntitle: x\n---\n\n> quoted  \n";
        let outcome = run(&TrailingWhitespace, doc);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn strips_and_reports() {
        let doc = "---\ntitle: x\n---\n\ndirty line  \n> quoted  \n";
        let outcome = run(&StripTrailingWhitespace, doc);
        let content = outcome.content.unwrap();
        assert_eq!(content, "---\ntitle: x\n---\n\ndirty line\n> quoted  \n");
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn idempotent_on_clean_input() {
        let doc = "---\ntitle: x\n---\n\nclean line\n> quoted  \n";
        let outcome = run(&StripTrailingWhitespace, doc);
        assert!(outcome.content.is_none());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn suppression_gates_the_rewrite() {
        let doc = "---\nsuppresswarnings:\n  - skip_do_remove_whitespaces_at_end\n---\n\ndirty  \n";
        let outcome = run(&StripTrailingWhitespace, doc);
        assert!(outcome.content.is_none());
    }
}
