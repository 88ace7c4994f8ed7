//! Prose-level checks: casing slips, spelling relics, forbidden words,
//! leftover markers.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

/// English prose written in a hurry: a lowercase standalone "i" or "i'm".
pub struct LowercaseI;

impl Rule for LowercaseI {
    fn name(&self) -> &'static str {
        "i_i_am"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_i_i_am
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let flat = text::body_of(content).replace('\n', " ");
        let mut diagnostics = Vec::new();

        if flat.contains(" i ") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::rule_key("i_in_text"),
                "Found lowercase 'i' in text",
            ));
        }
        if flat.contains(" i'm ") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::rule_key("i_am_in_text"),
                "Found lowercase 'i'm' in text",
            ));
        }
        RuleOutcome::report(diagnostics)
    }
}

/// Pre-reform German spelling: 'daß' has been 'dass' since 1996.
pub struct Dass;

impl Rule for Dass {
    fn name(&self) -> &'static str {
        "dass"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_dass
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !text::body_of(content).contains("daß") {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("dass"),
            "Found 'daß' in text",
        )])
    }
}

pub struct ForbiddenWords;

impl Rule for ForbiddenWords {
    fn name(&self) -> &'static str {
        "forbidden_words"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_forbidden_words
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        let body = text::body_of(content);
        let mut diagnostics = Vec::new();

        for word in &ctx.config.forbidden_words {
            if body.contains(word.as_str()) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::token_key("forbidden_words", word),
                    format!("Found forbidden word: {word}"),
                ));
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

pub struct Fixme;

impl Rule for Fixme {
    fn name(&self) -> &'static str {
        "fixme"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_fixme
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !text::body_of(content).to_lowercase().contains("fixme") {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("fixme"),
            "Found FIXME in text!",
        )])
    }
}

/// Doubled parentheses outside code fences, a frequent paste artifact.
pub struct DoubleBrackets;

impl Rule for DoubleBrackets {
    fn name(&self) -> &'static str {
        "double_brackets"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_double_brackets
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let body = text::body_of(content);

        let mut prose = String::new();
        let mut in_code_block = false;
        for line in body.lines() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if !in_code_block {
                prose.push_str(line);
            }
        }

        let mut diagnostics = Vec::new();
        if prose.contains("((") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::rule_key("double_brackets_opening"),
                "Found opening double brackets!",
            ));
        }
        if prose.contains("))") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::rule_key("double_brackets_closing"),
                "Found closing double brackets!",
            ));
        }
        RuleOutcome::report(diagnostics)
    }
}
