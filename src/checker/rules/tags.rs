//! Tag and category checks: required tags, tag relations, and the format
//! rules that keep taxonomy URLs clean.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::checker::text;
use crate::config::Config;
use crate::frontmatter::{Frontmatter, StringList};

/// Characters allowed in tags and categories; anything else needs URL
/// escaping and is rejected outright.
static ALLOWED_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-._äöüß]").expect("valid charset pattern"));

/// The tag list, or the unsuppressable finding standing in for it.
fn tag_list<'a>(
    rule: &'static str,
    frontmatter: &'a Frontmatter,
) -> Result<&'a [String], Diagnostic> {
    match frontmatter.tags() {
        StringList::Values(tags) => Ok(tags),
        StringList::Missing => Err(Diagnostic::error(rule, "No tags found!")),
        StringList::Malformed => Err(Diagnostic::error(rule, "Tags is not a list!")),
    }
}

fn category_list<'a>(
    rule: &'static str,
    frontmatter: &'a Frontmatter,
) -> Result<&'a [String], Diagnostic> {
    match frontmatter.categories() {
        StringList::Values(categories) => Ok(categories),
        StringList::Missing => Err(Diagnostic::error(rule, "No categories found!")),
        StringList::Malformed => Err(Diagnostic::error(rule, "Categories is not a list!")),
    }
}

/// Words that imply a tag: `word` found in the posting means `tag` must be
/// declared.
pub struct MissingTags;

impl Rule for MissingTags {
    fn name(&self) -> &'static str {
        "missing_tags"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_missing_tags
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        if let Err(diagnostic) = tag_list(self.name(), ctx.frontmatter) {
            return RuleOutcome::report(vec![diagnostic]);
        }

        let flat = content.replace('\n', " ");
        let tokens = text::lowercase_tokens(text::body_of(content));
        let mut diagnostics = Vec::new();

        for mapping in &ctx.config.missing_tags {
            if ctx.frontmatter.has_tag(&mapping.tag) {
                continue;
            }
            // exact substring over the whole posting, or token match
            if flat.contains(&mapping.word) || tokens.contains(&mapping.word) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::token_key("missing_tags", &mapping.tag),
                    format!("'{}' tag is missing", mapping.tag),
                ));
            }
        }

        RuleOutcome::report(diagnostics)
    }
}

/// Words that are tags themselves: a configured word used in prose must also
/// be declared as a tag.
pub struct MissingWordsAsTags;

impl Rule for MissingWordsAsTags {
    fn name(&self) -> &'static str {
        "missing_words_as_tags"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_missing_words_as_tags
    }

    fn check(&self, content: &str, ctx: &RuleContext) -> RuleOutcome {
        if let Err(diagnostic) = tag_list(self.name(), ctx.frontmatter) {
            return RuleOutcome::report(vec![diagnostic]);
        }

        let tokens = text::lowercase_tokens(text::body_of(content));
        let mut diagnostics = Vec::new();

        for word in &ctx.config.missing_words {
            let word = word.to_lowercase();
            if tokens.contains(&word) && !ctx.frontmatter.has_tag(&word) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::token_key("missing_words", &word),
                    format!("'{word}' tag is missing"),
                ));
            }
        }

        RuleOutcome::report(diagnostics)
    }
}

/// Tags must be lowercase, space-free, and URL-safe. Not suppressable:
/// disable the check instead.
pub struct TagFormat;

impl Rule for TagFormat {
    fn name(&self) -> &'static str {
        "lowercase_tags"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_lowercase_tags
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let tags = match tag_list(self.name(), ctx.frontmatter) {
            Ok(tags) => tags,
            Err(diagnostic) => return RuleOutcome::report(vec![diagnostic]),
        };
        RuleOutcome::report(
            tags.iter()
                .filter(|tag| ALLOWED_FORMAT.is_match(tag))
                .map(|tag| Diagnostic::error(self.name(), format!("Invalid tag: {tag}")))
                .collect(),
        )
    }
}

/// Same format contract for categories.
pub struct CategoryFormat;

impl Rule for CategoryFormat {
    fn name(&self) -> &'static str {
        "lowercase_categories"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_lowercase_categories
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let categories = match category_list(self.name(), ctx.frontmatter) {
            Ok(categories) => categories,
            Err(diagnostic) => return RuleOutcome::report(vec![diagnostic]),
        };
        RuleOutcome::report(
            categories
                .iter()
                .filter(|category| ALLOWED_FORMAT.is_match(category))
                .map(|category| {
                    Diagnostic::error(self.name(), format!("Invalid category: {category}"))
                })
                .collect(),
        )
    }
}

/// Directional tag relation: `tag1` present requires `tag2`.
pub struct OtherTagsOneWay;

impl Rule for OtherTagsOneWay {
    fn name(&self) -> &'static str {
        "missing_other_tags_one_way"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_missing_other_tags_one_way
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        if let Err(diagnostic) = tag_list(self.name(), ctx.frontmatter) {
            return RuleOutcome::report(vec![diagnostic]);
        }

        let mut diagnostics = Vec::new();
        for pair in &ctx.config.missing_other_tags_one_way {
            if ctx.frontmatter.has_tag(&pair.tag1) && !ctx.frontmatter.has_tag(&pair.tag2) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    suppress::pair_key("missing_other_tags_one_way", &pair.tag1, &pair.tag2),
                    format!("Found '{}' tag but '{}' tag is missing", pair.tag1, pair.tag2),
                ));
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

/// Symmetric tag relation: either tag requires the other. The suppression
/// key always uses the configured order, whichever side triggered, so one
/// flag silences both directions.
pub struct OtherTagsBothWays;

impl Rule for OtherTagsBothWays {
    fn name(&self) -> &'static str {
        "missing_other_tags_both_ways"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_missing_other_tags_both_ways
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        if let Err(diagnostic) = tag_list(self.name(), ctx.frontmatter) {
            return RuleOutcome::report(vec![diagnostic]);
        }

        let mut diagnostics = Vec::new();
        for pair in &ctx.config.missing_other_tags_both_ways {
            let key =
                suppress::pair_key("missing_other_tags_both_ways", &pair.tag1, &pair.tag2);
            for (present, missing) in [(&pair.tag1, &pair.tag2), (&pair.tag2, &pair.tag1)] {
                if ctx.frontmatter.has_tag(present) && !ctx.frontmatter.has_tag(missing) {
                    diagnostics.push(Diagnostic::warning(
                        self.name(),
                        key.clone(),
                        format!("Found '{present}' tag but '{missing}' tag is missing"),
                    ));
                }
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

/// The scaffolding placeholder must not survive into a commit.
pub struct Changeme;

impl Rule for Changeme {
    fn name(&self) -> &'static str {
        "changeme"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_changeme
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let mut diagnostics = Vec::new();

        if let Err(diagnostic) = tag_list(self.name(), ctx.frontmatter) {
            diagnostics.push(diagnostic);
        }
        if let Err(diagnostic) = category_list(self.name(), ctx.frontmatter) {
            diagnostics.push(diagnostic);
        }

        if ctx.frontmatter.has_tag("changeme") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::token_key("changeme", "tag"),
                "Found 'changeme' tag!",
            ));
        }
        if ctx.frontmatter.has_category("changeme") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                suppress::token_key("changeme", "category"),
                "Found 'changeme' category!",
            ));
        }

        RuleOutcome::report(diagnostics)
    }
}
