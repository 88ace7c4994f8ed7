//! Headline depth and spacing checks.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

/// Flags headlines deeper than the blog layout renders well. One instance
/// per level, each with its own toggle and suppression key.
pub struct DeepHeadline {
    level: usize,
    name: &'static str,
    marker: &'static str,
}

impl DeepHeadline {
    pub fn level3() -> Self {
        Self {
            level: 3,
            name: "headline3",
            marker: "### ",
        }
    }

    pub fn level4() -> Self {
        Self {
            level: 4,
            name: "headline4",
            marker: "#### ",
        }
    }

    pub fn level5() -> Self {
        Self {
            level: 5,
            name: "headline5",
            marker: "##### ",
        }
    }
}

impl Rule for DeepHeadline {
    fn name(&self) -> &'static str {
        self.name
    }

    fn enabled(&self, config: &Config) -> bool {
        match self.level {
            3 => config.check_find_3_headline,
            4 => config.check_find_4_headline,
            _ => config.check_find_5_headline,
        }
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let Some(idx) = content.lines().position(|line| line.contains(self.marker)) else {
            return RuleOutcome::clean();
        };
        RuleOutcome::report(vec![
            Diagnostic::warning(
                self.name,
                suppress::rule_key(self.name),
                format!("Headline {} in Markdown!", self.level),
            )
            .with_line(idx + 1),
        ])
    }
}

/// A headline must be followed by an empty line; fenced code is ignored.
pub struct EmptyLineAfterHeader;

impl Rule for EmptyLineAfterHeader {
    fn name(&self) -> &'static str {
        "empty_line_after_header"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_empty_line_after_header
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let (body, offset) = text::body_with_offset(content);
        let mut diagnostics = Vec::new();

        let mut last_line_is_header = false;
        let mut last_header = "";
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
                last_line_is_header = false;
                last_header = "";
            } else if !line.starts_with('#') && last_line_is_header {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        suppress::rule_key("empty_line_after_header"),
                        format!("Missing empty line after header: {last_header}"),
                    )
                    .with_line(offset + idx + 1),
                );
            }

            if line.starts_with('#') {
                last_line_is_header = true;
                last_header = line;
            }
        }

        RuleOutcome::report(diagnostics)
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
    fn finds_deep_headlines() {
        let doc = "---\ntitle: x\n---\n\n## fine\n\n### too deep\n";
        assert_eq!(run(&DeepHeadline::level3(), doc).diagnostics.len(), 1);
        assert!(run(&DeepHeadline::level4(), doc).diagnostics.is_empty());
    }

    #[test]
    fn headline_key_is_per_level() {
        let doc = "---\ntitle: x\n---\n\n#### deep\n";
        let outcome = run(&DeepHeadline::level4(), doc);
        assert_eq!(
            outcome.diagnostics[0].suppress_key.as_deref(),
            Some("skip_headline4")
        );
    }

    #[test]
    fn header_needs_blank_line() {
        let doc = "---\ntitle: x\n---\n\n## Intro\ntext right below\n\n## Outro\n\ntext\n";
        let outcome = run(&EmptyLineAfterHeader, doc);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].message.contains("## Intro"));
        // body starts on content line 5
        assert_eq!(outcome.diagnostics[0].line, Some(6));
    }

    #[test]
    fn code_fences_do_not_trip_header_check() {
        let doc = "---\ntitle: x\n---\n\n## Intro\n\n```sh\n# not a header\necho hi\n```\n";
        let outcome = run(&EmptyLineAfterHeader, doc);
        assert!(outcome.diagnostics.is_empty());
    }
}
