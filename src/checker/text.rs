//! Small text helpers shared by the checks.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::split_document;

/// The Markdown body of `content`, or the whole content when the header
/// cannot be split off (rewrites never touch the header in practice, but a
/// check must not panic on a half-recognizable buffer).
pub(crate) fn body_of(content: &str) -> &str {
    split_document(content)
        .map(|(_, body)| body)
        .unwrap_or(content)
}

/// The body plus the number of content lines preceding it, so checks that
/// iterate body lines can report line numbers relative to the content they
/// were handed.
pub(crate) fn body_with_offset(content: &str) -> (&str, usize) {
    let body = body_of(content);
    // body is a subslice of content, so pointer arithmetic is exact where
    // a substring search would not be
    let offset_bytes = body.as_ptr() as usize - content.as_ptr() as usize;
    let line_offset = content[..offset_bytes].matches('\n').count();
    (body, line_offset)
}

/// Word tokens of a text: split on whitespace, commas, and dots. Case and
/// surrounding markup are preserved.
pub(crate) fn unique_tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased tokens with emphasis and code markers stripped from both ends,
/// for matching configured words against prose.
pub(crate) fn lowercase_tokens(text: &str) -> HashSet<String> {
    unique_tokens(text)
        .into_iter()
        .map(|token| {
            token
                .to_lowercase()
                .trim_matches('*')
                .trim_matches('`')
                .to_string()
        })
        .collect()
}

static LIST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-*+]|\d+\.|\{\{%)\s+").expect("valid list pattern"));

/// Whether a line is a list item: unordered markers, ordered markers, or an
/// opening shortcode.
pub(crate) fn line_is_list(line: &str) -> bool {
    LIST_PATTERN.is_match(line)
}
