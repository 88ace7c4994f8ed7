//! Frontmatter parsing and the per-document metadata model.
//!
//! The frontmatter is parsed exactly once per run, before any check executes,
//! and stays immutable for the whole run. Checks that rewrite content never
//! cause a re-parse, even when the rewritten text looks like a header.

use std::collections::HashSet;
use std::fmt;

use serde_yaml::{Mapping, Value};

/// Errors that can occur while extracting frontmatter.
#[derive(Debug, Clone)]
pub enum FrontmatterError {
    /// The document does not start with a `---` delimiter line.
    NotAtStart,
    /// The opening delimiter is never closed.
    Unterminated,
    /// The block is not valid YAML, or not a key/value mapping.
    Yaml(String),
}

impl fmt::Display for FrontmatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAtStart => write!(f, "content does not start with frontmatter"),
            Self::Unterminated => write!(f, "can't find the end of the frontmatter block"),
            Self::Yaml(message) => write!(f, "invalid frontmatter: {message}"),
        }
    }
}

impl std::error::Error for FrontmatterError {}

/// A list-valued header field.
///
/// `tags` and `categories` need more than `Option<Vec<String>>`: several
/// checks report a missing field and a non-list field as two distinct,
/// unsuppressable findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringList {
    Missing,
    Malformed,
    Values(Vec<String>),
}

impl StringList {
    fn from_field(value: Option<&Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(Value::Sequence(seq)) => {
                let mut values = Vec::with_capacity(seq.len());
                for entry in seq {
                    match entry.as_str() {
                        Some(s) => values.push(s.to_string()),
                        None => return Self::Malformed,
                    }
                }
                Self::Values(values)
            }
            Some(_) => Self::Malformed,
        }
    }
}

/// Typed view over a document's header, parsed once per run.
///
/// Raw tag and category strings are retained as written; membership tests
/// normalize both sides (trim plus lowercase) so the format checks can still
/// see the original spelling.
#[derive(Debug, Clone)]
pub struct Frontmatter {
    tags: StringList,
    categories: StringList,
    suppressions: HashSet<String>,
    fields: Mapping,
}

impl Frontmatter {
    /// Parse the frontmatter block of `input`.
    pub fn parse(input: &str) -> Result<Self, FrontmatterError> {
        let (raw, _) = split_document(input)?;

        let value: Value =
            serde_yaml::from_str(raw).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
        let fields = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => {
                return Err(FrontmatterError::Yaml(
                    "frontmatter is not a key/value mapping".to_string(),
                ));
            }
        };

        let tags = StringList::from_field(fields.get("tags"));
        let categories = StringList::from_field(fields.get("categories"));
        let suppressions = match fields.get("suppresswarnings") {
            Some(Value::Sequence(seq)) => seq
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(flag)) => HashSet::from([flag.clone()]),
            _ => HashSet::new(),
        };

        Ok(Self {
            tags,
            categories,
            suppressions,
            fields,
        })
    }

    pub fn tags(&self) -> &StringList {
        &self.tags
    }

    pub fn categories(&self) -> &StringList {
        &self.categories
    }

    /// Case-insensitive, whitespace-trimmed tag membership.
    pub fn has_tag(&self, name: &str) -> bool {
        contains(&self.tags, name)
    }

    /// Case-insensitive, whitespace-trimmed category membership.
    pub fn has_category(&self, name: &str) -> bool {
        contains(&self.categories, name)
    }

    /// Exact-match suppression lookup; no prefix or wildcard matching.
    pub fn is_suppressed(&self, key: &str) -> bool {
        self.suppressions.contains(key)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Length of a header field: characters for strings, element count for
    /// lists, zero for anything else. `None` when the field is absent.
    pub fn field_len(&self, name: &str) -> Option<usize> {
        let value = self.fields.get(name)?;
        Some(match value {
            Value::String(s) => s.chars().count(),
            Value::Sequence(seq) => seq.len(),
            _ => 0,
        })
    }
}

fn contains(list: &StringList, name: &str) -> bool {
    let StringList::Values(values) = list else {
        return false;
    };
    let needle = normalize(name);
    values.iter().any(|value| normalize(value) == needle)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Split a document into its (trimmed) frontmatter and body texts.
///
/// The frontmatter must be the very first construct: a `---` line at byte
/// zero, closed by another `---` line.
pub fn split_document(input: &str) -> Result<(&str, &str), FrontmatterError> {
    let Some(rest) = input.strip_prefix("---\n") else {
        return Err(FrontmatterError::NotAtStart);
    };
    let Some(end) = rest.find("\n---\n") else {
        return Err(FrontmatterError::Unterminated);
    };
    Ok((rest[..end].trim(), rest[end + 5..].trim()))
}
