//! Checks around the preview: the `<!--more-->` separator and the header
//! fields the site uses to render teasers.

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;

const MORE_SEPARATOR: &str = "<!--more-->";

pub struct MoreSeparator;

impl Rule for MoreSeparator {
    fn name(&self) -> &'static str {
        "more_separator"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_find_more_separator
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        if text::body_of(content).contains(MORE_SEPARATOR) {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("more_separator"),
            format!("Missing '{MORE_SEPARATOR}' separator in Markdown!"),
        )])
    }
}

/// Images do not belong in the teaser above the `<!--more-->` separator.
pub struct ImageInsidePreview;

impl Rule for ImageInsidePreview {
    fn name(&self) -> &'static str {
        "image_inside_preview"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_image_inside_preview
    }

    fn check(&self, content: &str, _ctx: &RuleContext) -> RuleOutcome {
        let key = suppress::rule_key("image_inside_preview");

        if !content.contains(MORE_SEPARATOR) {
            if content.contains("![") {
                return RuleOutcome::report(vec![Diagnostic::warning(
                    self.name(),
                    key,
                    "Found image in preview, but no preview separator",
                )]);
            }
            return RuleOutcome::clean();
        }

        let body = text::body_of(content);
        let preview = body.split(MORE_SEPARATOR).next().unwrap_or(body);
        if preview.contains("![") {
            return RuleOutcome::report(vec![Diagnostic::warning(
                self.name(),
                key,
                "Found image in preview, move it further down",
            )]);
        }
        RuleOutcome::clean()
    }
}

pub struct PreviewThumbnail;

impl Rule for PreviewThumbnail {
    fn name(&self) -> &'static str {
        "preview_thumbnail"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_preview_thumbnail
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        if ctx.frontmatter.field_len("thumbnail").unwrap_or(0) >= 1 {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("preview_thumbnail"),
            "Found no preview image in header",
        )])
    }
}

pub struct PreviewDescription;

impl Rule for PreviewDescription {
    fn name(&self) -> &'static str {
        "preview_description"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_preview_description
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        if ctx.frontmatter.field_len("description").unwrap_or(0) >= 1 {
            return RuleOutcome::clean();
        }
        RuleOutcome::report(vec![Diagnostic::warning(
            self.name(),
            suppress::rule_key("preview_description"),
            "Found no preview description in header",
        )])
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
    fn missing_separator_is_reported() {
        let doc = "---\ntitle: x\n---\n\nNo separator here.\n";
        assert_eq!(run(&MoreSeparator, doc).diagnostics.len(), 1);

        let doc = "---\ntitle: x\n---\n\nTeaser.\n\n<!--more-->\n\nRest.\n";
        assert!(run(&MoreSeparator, doc).diagnostics.is_empty());
    }

    #[test]
    fn image_above_separator() {
        let doc = "---\ntitle: x\n---\n\n![alt](a.jpg)\n\n<!--more-->\n\nRest.\n";
        let outcome = run(&ImageInsidePreview, doc);
        assert!(outcome.diagnostics[0].message.contains("move it further down"));

        let doc = "---\ntitle: x\n---\n\nTeaser.\n\n<!--more-->\n\n![alt](a.jpg)\n";
        assert!(run(&ImageInsidePreview, doc).diagnostics.is_empty());
    }

    #[test]
    fn image_without_separator() {
        let doc = "---\ntitle: x\n---\n\n![alt](a.jpg)\n";
        let outcome = run(&ImageInsidePreview, doc);
        assert!(outcome.diagnostics[0].message.contains("no preview separator"));
    }

    #[test]
    fn empty_thumbnail_and_description() {
        let doc = "---\ntitle: x\nthumbnail: \"\"\n---\n\nBody.\n";
        assert_eq!(run(&PreviewThumbnail, doc).diagnostics.len(), 1);
        assert_eq!(run(&PreviewDescription, doc).diagnostics.len(), 1);

        let doc = "---\nthumbnail: lake.jpg\ndescription: A fine day\n---\n\nBody.\n";
        assert!(run(&PreviewThumbnail, doc).diagnostics.is_empty());
        assert!(run(&PreviewDescription, doc).diagnostics.is_empty());
    }
}
