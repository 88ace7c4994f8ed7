//! Minimum-length requirements on header fields.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::config::Config;

/// Configured header fields must exist and reach a minimum length. A missing
/// field is an unsuppressable error; a too-short one is a keyed warning.
pub struct HeaderFieldLength;

impl Rule for HeaderFieldLength {
    fn name(&self) -> &'static str {
        "header_field_length"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_header_field_length
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let mut diagnostics = Vec::new();

        for (field, min) in ctx.config.header_field_lengths() {
            match ctx.frontmatter.field_len(field) {
                None => {
                    diagnostics.push(Diagnostic::error(
                        self.name(),
                        format!("Missing frontmatter entry: {field}"),
                    ));
                }
                Some(len) if (len as i64) < min => {
                    diagnostics.push(Diagnostic::warning(
                        self.name(),
                        suppress::token_key("header_field_length", field),
                        format!("Frontmatter entry too short: {field} ({len} < {min} chars)"),
                    ));
                }
                Some(_) => {}
            }
        }

        RuleOutcome::report(diagnostics)
    }
}
