//! Checks on the sibling files of a posting (Hugo page bundles): oversized
//! assets and images carrying EXIF tags that must not be published.
//!
//! These are the only checks doing I/O beyond the document itself. Reads are
//! synchronous and local to one invocation; anything unreadable becomes a
//! diagnostic on this check, never a pipeline abort. Both checks early-return
//! on their whole-rule suppression key so a suppressed run skips the
//! directory scan and subprocess work entirely.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::checker::diagnostics::Diagnostic;
use crate::checker::rules::{Rule, RuleContext, RuleOutcome};
use crate::checker::suppress;
use crate::config::Config;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Files in the bundle directory, sorted for deterministic reporting.
fn bundle_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir).map_err(|e| e.to_string())?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        if entry.file_type().map_err(|e| e.to_string())?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// True when git ignores the file. Not a git repository, or any git error,
/// counts as not ignored.
fn ignored_in_git(path: &Path) -> bool {
    match Command::new("git").arg("check-ignore").arg(path).output() {
        Ok(output) => output.status.success() && output.stderr.is_empty(),
        Err(_) => false,
    }
}

pub struct ImageSize;

impl Rule for ImageSize {
    fn name(&self) -> &'static str {
        "image_size"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_image_size
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let key = suppress::rule_key("image_size");
        if ctx.frontmatter.is_suppressed(&key) {
            return RuleOutcome::clean();
        }
        let Some(max_size) = ctx.config.image_size else {
            return RuleOutcome::clean();
        };

        let dir = ctx.path.parent().unwrap_or(Path::new("."));
        let files = match bundle_files(dir) {
            Ok(files) => files,
            Err(message) => {
                return RuleOutcome::report(vec![Diagnostic::warning(
                    self.name(),
                    key,
                    format!("Can't scan {}: {message}", dir.display()),
                )]);
            }
        };

        let mut diagnostics = Vec::new();
        for file in files {
            let size = match fs::metadata(&file) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    diagnostics.push(Diagnostic::warning(
                        self.name(),
                        key.clone(),
                        format!("Can't read {}: {e}", file.display()),
                    ));
                    continue;
                }
            };
            if size > max_size && !ignored_in_git(&file) {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    key.clone(),
                    format!(
                        "Large file: {} ({size} > {max_size} bytes), resize it",
                        file.display()
                    ),
                ));
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

/// Images carrying any of the configured EXIF tags (camera serials, GPS
/// positions) must be cleaned before publishing. Uses `exiftool`.
pub struct ForbiddenExifTags;

impl Rule for ForbiddenExifTags {
    fn name(&self) -> &'static str {
        "image_exif_tags_forbidden"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.check_image_exif_tags_forbidden
    }

    fn check(&self, _content: &str, ctx: &RuleContext) -> RuleOutcome {
        let key = suppress::rule_key("image_exif_tags_forbidden");
        if ctx.frontmatter.is_suppressed(&key) {
            return RuleOutcome::clean();
        }

        let dir = ctx.path.parent().unwrap_or(Path::new("."));
        let images: Vec<PathBuf> = match bundle_files(dir) {
            Ok(files) => files
                .into_iter()
                .filter(|file| {
                    file.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                })
                .filter(|file| !ignored_in_git(file))
                .collect(),
            Err(message) => {
                return RuleOutcome::report(vec![Diagnostic::warning(
                    self.name(),
                    key,
                    format!("Can't scan {}: {message}", dir.display()),
                )]);
            }
        };
        if images.is_empty() {
            return RuleOutcome::clean();
        }

        let Ok(exiftool) = which::which("exiftool") else {
            return RuleOutcome::report(vec![Diagnostic::warning(
                self.name(),
                key,
                "exiftool not found, can't inspect image EXIF tags",
            )]);
        };

        let mut diagnostics = Vec::new();
        for image in images {
            match read_exif(&exiftool, &image) {
                Ok(exif) => {
                    let mut found: Vec<&str> = ctx
                        .config
                        .forbidden_exif_tags
                        .iter()
                        .filter(|tag| exif.contains_key(tag.as_str()))
                        .map(String::as_str)
                        .collect();
                    if !found.is_empty() {
                        found.sort_unstable();
                        diagnostics.push(Diagnostic::warning(
                            self.name(),
                            key.clone(),
                            format!(
                                "Found forbidden EXIF tags in {}: {}",
                                image.display(),
                                found.join(", ")
                            ),
                        ));
                    }
                }
                Err(message) => {
                    diagnostics.push(Diagnostic::warning(
                        self.name(),
                        key.clone(),
                        format!("Can't read EXIF data from {}: {message}", image.display()),
                    ));
                }
            }
        }
        RuleOutcome::report(diagnostics)
    }
}

/// All EXIF fields of one image, via `exiftool -json`.
fn read_exif(
    exiftool: &Path,
    image: &Path,
) -> Result<serde_json::Map<String, serde_json::Value>, String> {
    let output = Command::new(exiftool)
        .arg("-json")
        .arg(image)
        .output()
        .map_err(|e| e.to_string())?;
    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
    }

    // exiftool emits a one-element array per input file
    let mut parsed: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_slice(&output.stdout).map_err(|e| e.to_string())?;
    if parsed.is_empty() {
        return Err("empty exiftool output".to_string());
    }
    Ok(parsed.remove(0))
}
