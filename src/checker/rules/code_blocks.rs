//! Fenced code block checks, plus the blank-line rules that share the
//! fence-tracking logic.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

/// Every opening fence carries a language, every closing fence is bare; if
/// the two counts disagree, a fence is missing its highlighting type.
pub struct FencedCodeBlocks;

impl Rule for FencedCodeBlocks {
    fn name(&self) -> &'static str {
        "code_blocks"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_code_blocks
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let body = text::body_of(content);

        let mut opening = 0usize;
        let mut closing = 0usize;
        for line in body.lines() {
            if line.starts_with("```") && line.len() > 3 {
                opening += 1;
            }
            if line == "```" {
                closing += 1;
            }
        }

        if (opening > 0 || closing > 0) && opening != closing {
            return RuleOutcome::report(vec![Diagnostic::warning(
                self.name(),
                suppress::rule_key("unmatching_code_blocks"),
                "Found unmatching fenced code blocks",
            )]);
        }
        RuleOutcome::clean()
    }
}

/// The highlighter has no `psql` lexer; postings must use `postgresql`.
pub struct PsqlCodeBlocks;

impl Rule for PsqlCodeBlocks {
    fn name(&self) -> &'static str {
        "psql_code_blocks"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_psql_code_blocks
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let (body, offset) = text::body_with_offset(content);
        let Some(idx) = body
            .lines()
            .position(|line| line == "```psql" || line == "````psql")
        else {
            return RuleOutcome::clean();
        };
        RuleOutcome::report(vec![
            Diagnostic::warning(
                self.name(),
                suppress::rule_key("psql_code"),
                "Found 'psql' code blocks, use 'postgresql' instead",
            )
            .with_line(offset + idx + 1),
        ])
    }
}

/// A closing fence must be followed by an empty line.
pub struct EmptyLineAfterCode;

impl Rule for EmptyLineAfterCode {
    fn name(&self) -> &'static str {
        "empty_line_after_code"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_empty_line_after_code
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let (body, offset) = text::body_with_offset(content);
        let mut diagnostics = Vec::new();

        let mut in_code_block = false;
        let mut last_line_ends_code_block = false;

        for (idx, line) in body.lines().enumerate() {
            if last_line_ends_code_block && !line.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        suppress::rule_key("empty_line_after_code"),
                        "Missing empty line after code block",
                    )
                    .with_line(offset + idx + 1),
                );
            }

            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                continue;
            }
            if line == "```" && in_code_block {
                in_code_block = false;
                last_line_ends_code_block = true;
                continue;
            }
            last_line_ends_code_block = false;
        }

        RuleOutcome::report(diagnostics)
    }
}

/// A list must be followed by an empty line (or another list item).
pub struct EmptyLineAfterList;

impl Rule for EmptyLineAfterList {
    fn name(&self) -> &'static str {
        "empty_line_after_list"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_empty_line_after_list
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let (body, offset) = text::body_with_offset(content);
        let mut diagnostics = Vec::new();

        let mut last_line_is_list = false;
        let mut in_code_block = false;

        for (idx, line) in body.lines().enumerate() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }

            if line.is_empty() {
                last_line_is_list = false;
            } else if !text::line_is_list(line) && last_line_is_list {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        suppress::rule_key("empty_line_after_list"),
                        "Missing empty line after list",
                    )
                    .with_line(offset + idx + 1),
                );
            }

            if text::line_is_list(line) {
                last_line_is_list = true;
            }
        }

        RuleOutcome::report(diagnostics)
    }
}
