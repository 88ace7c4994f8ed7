//! File selection: vetting command-line arguments and scanning the content
//! tree when none are given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ignore::WalkBuilder;

use crate::config::Config;

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

/// Vet the positional arguments: every entry must be a Markdown file, or a
/// page-bundle directory containing an `index.md`.
pub fn resolve_args(args: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(args.len());
    for arg in args {
        if arg.is_dir() {
            let index = arg.join("index.md");
            if index.is_file() {
                log::debug!("Using Markdown file: {}", index.display());
                files.push(index);
                continue;
            }
            return Err(invalid_input(format!(
                "{} is a directory without an index.md",
                arg.display()
            )));
        }
        if !arg.is_file() {
            return Err(invalid_input(format!("{} does not exist", arg.display())));
        }
        if arg.extension().and_then(|ext| ext.to_str()) != Some("md") {
            return Err(invalid_input(format!(
                "{} is not a Markdown file",
                arg.display()
            )));
        }
        files.push(arg.clone());
    }
    Ok(files)
}

/// Scan the configured content directories for postings to check.
///
/// Without `all`, only files newer than the config file are selected, plus
/// drafts: an old posting that still carries `draft: true` is about to be
/// edited and should be re-checked.
pub fn find_in_content_dirs(
    config: &Config,
    config_path: &Path,
    all: bool,
) -> io::Result<Vec<PathBuf>> {
    let config_mtime = fs::metadata(config_path)?.modified()?;

    let mut files = Vec::new();
    for dir in config.content_dirs() {
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkBuilder::new(&dir).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            if all || needs_check(path, config_mtime)? {
                files.push(path.to_path_buf());
            } else {
                log::debug!("Skipping file (too old): {}", path.display());
            }
        }
    }

    files.sort();
    Ok(files)
}

fn needs_check(path: &Path, config_mtime: SystemTime) -> io::Result<bool> {
    let mtime = fs::metadata(path)?.modified()?;
    if mtime >= config_mtime {
        return Ok(true);
    }
    // a cheap substring probe; parsing the header here would cost more than
    // it buys
    let contents = fs::read_to_string(path)?;
    Ok(contents.contains("draft: true"))
}
