//! Product and project names the blog always sets in cursive.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

/// A configured word appearing as a bare token (no `*` wrapping) outside
/// headlines, quotes, and image lines is a violation. The match is
/// case-sensitive on purpose: the configured spelling is the canonical one.
pub struct MissingCursive;

impl Rule for MissingCursive {
    fn name(&self) -> &'static str {
        "missing_cursive"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_missing_cursive
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        let body = text::body_of(content);
        let prose = body
            .lines()
            .filter(|line| {
                !line.starts_with('#') && !line.starts_with('>') && !line.starts_with('!')
            })
            .collect::<Vec<_>>()
            .join("\n");
        let tokens = text::unique_tokens(&prose);

        let mut diagnostics = Vec::new();
        for word in &ctx.config.missing_cursive {
            if tokens.contains(word) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::token_key("missing_cursive", word),
                    format!("Found non-cursive token: {word}"),
                ));
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

    fn run(doc: &str, config: &Config) -> RuleOutcome {
        let frontmatter = Frontmatter::parse(doc).unwrap();
        let ctx = RuleContext {
            config,
            frontmatter: &frontmatter,
            path: Path::new("post/index.md"),
        };
        MissingCursive.check(doc, &ctx)
    }

    fn config() -> Config {
        serde_yaml::from_str("missing_cursive: [psql]").unwrap()
    }

    #[test]
    fn bare_token_is_flagged() {
        let doc = "---\ntitle: x\n---\n\nRun psql to connect.\n";
        let outcome = run(doc, &config());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].suppress_key.as_deref(),
            Some("skip_missing_cursive_psql")
        );
    }

    #[test]
    fn cursive_token_is_fine() {
        let doc = "---\ntitle: x\n---\n\nRun *psql* to connect.\n";
        assert!(run(doc, &config()).diagnostics.is_empty());
    }

    #[test]
    fn headlines_quotes_and_images_are_exempt() {
        let doc = "---\ntitle: x\n---\n\n## psql tips\n\n> psql said so\n\n![psql](shot.png)\n";
        assert!(run(doc, &config()).diagnostics.is_empty());
    }
}
