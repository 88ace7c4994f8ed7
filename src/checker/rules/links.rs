//! Link hygiene: plain-http links, leftover preview links, blocked sites,
//! and the broken-link rewriter.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

pub struct HttpLink;

impl Rule for HttpLink {
    fn name(&self) -> &'static str {
        "http_link"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_http_link
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !text::body_of(content).contains("http://") {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("httplink"),
            "Found 'http://' link",
        )])
    }
}

/// A copied-from-the-preview `localhost:1313` link must never be published.
pub struct HugoLocalhost;

impl Rule for HugoLocalhost {
    fn name(&self) -> &'static str {
        "hugo_localhost"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_hugo_localhost
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !text::body_of(content).contains("http://localhost:1313/") {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("hugo_localhost"),
            "Found Hugo preview link",
        )])
    }
}

pub struct ForbiddenWebsites;

impl Rule for ForbiddenWebsites {
    fn name(&self) -> &'static str {
        "forbidden_websites"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_forbidden_websites
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        let body = text::body_of(content);
        let mut diagnostics = Vec::new();

        for site in &ctx.config.forbidden_websites {
            let https = format!("https://{site}");
            let http = format!("http://{site}");
            if body.contains(&https) || body.contains(&http) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::token_key("forbidden_websites", site),
                    format!("Found forbidden website: {site}"),
                ));
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

/// Rewrites configured dead links to their replacements. The trailing-slash
/// variant is replaced first so the bare prefix cannot truncate it.
pub struct ReplaceBrokenLinks;

impl Rule for ReplaceBrokenLinks {
    fn name(&self) -> &'static str {
        "replace_broken_links"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.do_replace_broken_links
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        let key = suppress::rule_key("do_replace_broken_links");
        // suppression must stop the rewrite itself, not just the report
        if ctx.frontmatter.is_suppressed(&key) {
            return RuleOutcome::clean();
        }

        let mut output = content.to_string();
        for link in &ctx.config.broken_links {
            for orig in [
                format!("https://{}/", link.orig),
                format!("https://{}", link.orig),
                format!("http://{}/", link.orig),
                format!("http://{}", link.orig),
            ] {
                output = output.replace(&orig, &link.replace);
            }
        }

        if output == content {
            return RuleOutcome::clean();
        }
        RuleOutcome::rewrite(
            output,
            vec![Diagnostic::warning(self.name(), key, "Replacing broken links")],
        )
    }
}
