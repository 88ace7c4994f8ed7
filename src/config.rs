use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A word that, when found in a posting, requires the mapped tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordTag {
    pub word: String,
    pub tag: String,
}

/// A tag relation; for the "both ways" check the declaration order is the
/// canonical order used in suppression keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagPair {
    pub tag1: String,
    pub tag2: String,
}

/// A link rewrite: `orig` is a protocol-less site prefix, `replace` a full URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkRewrite {
    pub orig: String,
    pub replace: String,
}

/// Run configuration: one toggle per check plus the parameter blocks some
/// checks need. All toggles default to off.
///
/// The configuration is loaded and validated once at startup and treated as
/// immutable for the whole run; every enabled-but-unparameterized check is
/// rejected before any document is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub check_whitespaces_at_end: bool,
    pub check_find_more_separator: bool,
    pub check_find_3_headline: bool,
    pub check_find_4_headline: bool,
    pub check_find_5_headline: bool,
    pub check_missing_tags: bool,
    pub check_missing_words_as_tags: bool,
    pub check_lowercase_tags: bool,
    pub check_lowercase_categories: bool,
    pub check_missing_other_tags_one_way: bool,
    pub check_missing_other_tags_both_ways: bool,
    pub check_missing_cursive: bool,
    pub check_http_link: bool,
    pub check_i_i_am: bool,
    pub check_hugo_localhost: bool,
    pub check_changeme: bool,
    pub check_code_blocks: bool,
    pub check_psql_code_blocks: bool,
    pub check_image_inside_preview: bool,
    pub check_preview_thumbnail: bool,
    pub check_preview_description: bool,
    pub check_image_size: bool,
    pub check_image_exif_tags_forbidden: bool,
    pub check_dass: bool,
    pub check_empty_line_after_header: bool,
    pub check_empty_line_after_list: bool,
    pub check_empty_line_after_code: bool,
    pub check_forbidden_words: bool,
    pub check_forbidden_websites: bool,
    pub check_header_field_length: bool,
    pub check_double_brackets: bool,
    pub check_fixme: bool,
    pub do_remove_whitespaces_at_end: bool,
    pub do_replace_broken_links: bool,

    pub missing_tags: Vec<WordTag>,
    pub missing_tags_include: Option<PathBuf>,
    pub missing_words: Vec<String>,
    pub missing_words_include: Option<PathBuf>,
    pub missing_other_tags_one_way: Vec<TagPair>,
    pub missing_other_tags_both_ways: Vec<TagPair>,
    pub missing_cursive: Vec<String>,
    pub missing_cursive_include: Option<PathBuf>,
    pub forbidden_words: Vec<String>,
    pub forbidden_websites: Vec<String>,
    pub image_size: Option<u64>,
    pub forbidden_exif_tags: Vec<String>,
    pub header_field_length: Vec<BTreeMap<String, i64>>,
    pub broken_links: Vec<LinkRewrite>,
    pub content_dirs: Vec<String>,
}

/// Errors raised while loading or validating the configuration. All of them
/// abort the whole run before any document is read.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// No config file given and none found walking up from the start directory.
    NotFound,
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    /// A check is enabled but its parameters are absent or invalid.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => {
                write!(f, "no config file given, and none found in the standard locations")
            }
            Self::Read { path, message } => {
                write!(f, "can't read config {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Directories scanned for postings when no files are given on the command
/// line and the config does not override `content_dirs`.
const DEFAULT_CONTENT_DIRS: &[&str] = &[
    "content/post",
    "content/posts",
    "content/blog",
    "content/blogs",
    "content/businesses",
    "content/places",
    "content/restaurants",
    "content/trips",
    "content/events",
];

const CANDIDATE_NAMES: &[&str] = &[".postlint.yaml", "postlint.yaml"];

impl Config {
    /// Directories to scan when no files are named on the command line.
    pub fn content_dirs(&self) -> Vec<PathBuf> {
        if self.content_dirs.is_empty() {
            DEFAULT_CONTENT_DIRS.iter().map(PathBuf::from).collect()
        } else {
            self.content_dirs.iter().map(PathBuf::from).collect()
        }
    }

    /// The `{field: min_length}` entries, flattened.
    pub fn header_field_lengths(&self) -> impl Iterator<Item = (&str, i64)> {
        self.header_field_length
            .iter()
            .filter_map(|entry| entry.iter().next())
            .map(|(field, len)| (field.as_str(), *len))
    }

    /// Reject any enabled check whose required parameters are absent or
    /// malformed. Runs once at startup, before any document is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_missing_tags && self.missing_tags.is_empty() {
            return Err(required("check_missing_tags", "missing_tags"));
        }
        if self.check_missing_words_as_tags && self.missing_words.is_empty() {
            return Err(required("check_missing_words_as_tags", "missing_words"));
        }
        if self.check_missing_other_tags_one_way && self.missing_other_tags_one_way.is_empty() {
            return Err(required(
                "check_missing_other_tags_one_way",
                "missing_other_tags_one_way",
            ));
        }
        if self.check_missing_other_tags_both_ways && self.missing_other_tags_both_ways.is_empty() {
            return Err(required(
                "check_missing_other_tags_both_ways",
                "missing_other_tags_both_ways",
            ));
        }
        if self.check_missing_cursive && self.missing_cursive.is_empty() {
            return Err(required("check_missing_cursive", "missing_cursive"));
        }
        if self.check_forbidden_words && self.forbidden_words.is_empty() {
            return Err(required("check_forbidden_words", "forbidden_words"));
        }
        if self.check_forbidden_websites {
            if self.forbidden_websites.is_empty() {
                return Err(required("check_forbidden_websites", "forbidden_websites"));
            }
            for site in &self.forbidden_websites {
                if site.starts_with("http") || site.contains("://") {
                    return Err(ConfigError::Invalid(format!(
                        "forbidden website '{site}' must not include the protocol"
                    )));
                }
            }
        }
        if self.check_image_size {
            match self.image_size {
                None => return Err(required("check_image_size", "image_size")),
                Some(0) => {
                    return Err(ConfigError::Invalid(
                        "'image_size' must be greater than zero".to_string(),
                    ));
                }
                Some(_) => {}
            }
        }
        if self.check_image_exif_tags_forbidden && self.forbidden_exif_tags.is_empty() {
            return Err(required(
                "check_image_exif_tags_forbidden",
                "forbidden_exif_tags",
            ));
        }
        if self.check_header_field_length {
            if self.header_field_length.is_empty() {
                return Err(required("check_header_field_length", "header_field_length"));
            }
            for entry in &self.header_field_length {
                let Some((field, len)) = entry.iter().next() else {
                    return Err(ConfigError::Invalid(
                        "'header_field_length' entries must map a field to a length".to_string(),
                    ));
                };
                if *len < 0 {
                    return Err(ConfigError::Invalid(format!(
                        "length for header field '{field}' must not be negative"
                    )));
                }
            }
        }
        if self.do_replace_broken_links {
            if self.broken_links.is_empty() {
                return Err(required("do_replace_broken_links", "broken_links"));
            }
            for link in &self.broken_links {
                if link.orig.starts_with("http") || link.orig.contains("://") {
                    return Err(ConfigError::Invalid(format!(
                        "broken link '{}' must not include the protocol",
                        link.orig
                    )));
                }
                if !link.replace.contains("://") {
                    return Err(ConfigError::Invalid(format!(
                        "replacement link '{}' must include the protocol",
                        link.replace
                    )));
                }
            }
        }
        Ok(())
    }
}

fn required(check: &str, parameter: &str) -> ConfigError {
    ConfigError::Invalid(format!(
        "'{check}' is enabled, but '{parameter}' is not specified"
    ))
}

fn parse_config_str(s: &str, path: &Path) -> Result<Config, ConfigError> {
    serde_yaml::from_str::<Config>(s).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Search tree-upwards from `start_dir` for a config file, stopping at the
/// first directory containing `.git` (the repository boundary).
fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                log::debug!("Found config file: {}", candidate.display());
                return Some(candidate);
            }
        }
        if dir.join(".git").is_dir() {
            log::debug!(
                "Found .git in {}, stop searching for a config file",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn read_include_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    parse_include(&read_to_string(path)?, path)
}

fn parse_include<T: serde::de::DeserializeOwned>(s: &str, path: &Path) -> Result<T, ConfigError> {
    serde_yaml::from_str(s).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge the `*_include` companion files into the in-line lists. Include
/// paths are resolved relative to the config file itself.
fn apply_includes(config: &mut Config, config_dir: &Path) -> Result<(), ConfigError> {
    if let Some(include) = config.missing_tags_include.take() {
        let path = config_dir.join(include);
        let entries: Vec<WordTag> = parse_include(&read_to_string(&path)?, &path)?;
        config.missing_tags.extend(entries);
    }
    if let Some(include) = config.missing_words_include.take() {
        let path = config_dir.join(include);
        config.missing_words.extend(read_include_list(&path)?);
    }
    if let Some(include) = config.missing_cursive_include.take() {
        let path = config_dir.join(include);
        config.missing_cursive.extend(read_include_list(&path)?);
    }
    Ok(())
}

fn dedup(list: &mut Vec<String>) {
    list.sort();
    list.dedup();
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .postlint.yaml, postlint.yaml, stopping at .git
///
/// Finding no config file is an error: with every check defaulting to off,
/// a config-less run would be a silent no-op gate.
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> Result<(Config, PathBuf), ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => find_in_tree(start_dir).ok_or(ConfigError::NotFound)?,
    };

    let contents = read_to_string(&path)?;
    let mut config = parse_config_str(&contents, &path)?;

    let config_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    apply_includes(&mut config, &config_dir)?;

    dedup(&mut config.missing_words);
    dedup(&mut config.missing_cursive);
    dedup(&mut config.forbidden_words);
    dedup(&mut config.forbidden_websites);
    dedup(&mut config.forbidden_exif_tags);

    config.validate()?;
    log::info!("Loaded config from: {}", path.display());
    Ok((config, path))
}
