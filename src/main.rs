use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use rayon::prelude::*;
use similar::{ChangeTag, TextDiff};

use postlint::{
    CheckRunner, Config, Diagnostic, FrontmatterError, RunResult, Severity, config, discover,
};

mod cli;
use cli::Cli;

/// What happened to one file.
enum Outcome {
    Checked { input: String, result: RunResult },
    BadFrontmatter(FrontmatterError),
    Unreadable(String),
}

struct FileReport {
    path: PathBuf,
    outcome: Outcome,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let start_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::error!("Can't determine current directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (config, config_path) = match config::load(cli.config.as_deref(), &start_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let files = if cli.files.is_empty() {
        discover::find_in_content_dirs(&config, &config_path, cli.all)
    } else {
        discover::resolve_args(&cli.files)
    };
    let files = match files {
        Ok(files) => files,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if files.is_empty() {
        log::info!("No files to check");
        return ExitCode::SUCCESS;
    }

    let runner = CheckRunner::new();
    // documents are independent; only the reporting below is sequential
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| check_file(&runner, &config, path))
        .collect();

    let mut failed = false;
    for report in &reports {
        failed |= handle_report(report, &cli);
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn check_file(runner: &CheckRunner, config: &Config, path: &Path) -> FileReport {
    log::debug!("Working on file: {}", path.display());
    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) => {
            return FileReport {
                path: path.to_path_buf(),
                outcome: Outcome::Unreadable(e.to_string()),
            };
        }
    };
    let outcome = match runner.run(config, &input, path) {
        Ok(result) => Outcome::Checked { input, result },
        Err(e) => Outcome::BadFrontmatter(e),
    };
    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Report one file's outcome and perform the rewrite if one is due.
/// Returns true when this file fails the gate.
fn handle_report(report: &FileReport, cli: &Cli) -> bool {
    let display_path = report
        .path
        .canonicalize()
        .unwrap_or_else(|_| report.path.clone());

    match &report.outcome {
        Outcome::Unreadable(message) => {
            log::error!("Can't read {}: {message}", report.path.display());
            true
        }
        Outcome::BadFrontmatter(e) => {
            println!("File: {}", display_path.display());
            println!("\x1b[31merror\x1b[0m: {e}");
            true
        }
        Outcome::Checked { input, result } => {
            if !result.diagnostics.is_empty() {
                println!("File: {}", display_path.display());
                print_diagnostics(&result.diagnostics);
            }

            let mut failed = result.has_errors();
            if result.changed {
                log::info!("File is CHANGED: {}", report.path.display());
                if cli.check {
                    print_diff(&display_path, input, &result.content);
                    failed = true;
                } else if cli.dry_run {
                    if cli.print {
                        print!("{}", result.content);
                    } else {
                        print_diff(&display_path, input, &result.content);
                    }
                } else {
                    log::info!("Write changed file: {}", report.path.display());
                    if let Err(e) = fs::write(&report.path, &result.content) {
                        log::error!("Can't write {}: {e}", report.path.display());
                        failed = true;
                    }
                }
            } else {
                log::debug!("File is unchanged: {}", report.path.display());
            }
            failed
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let severity_str = match diag.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",     // red
            Severity::Warning => "\x1b[33mwarning\x1b[0m", // yellow
        };

        match diag.line {
            Some(line) => println!("{severity_str}[{}]: {} (line {line})", diag.rule, diag.message),
            None => println!("{severity_str}[{}]: {}", diag.rule, diag.message),
        }

        if let Some(key) = &diag.suppress_key {
            // cyan
            println!("  \x1b[36mhelp\x1b[0m: use '{key}' in 'suppresswarnings' to silence this warning");
        }
    }
}

fn print_diff(file_path: &Path, original: &str, formatted: &str) {
    let diff = TextDiff::from_lines(original, formatted);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("---");
        }

        println!(
            "Diff in {}:{}:",
            file_path.display(),
            group[0].old_range().start + 1
        );

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", "\x1b[31m"), // red
                    ChangeTag::Insert => ("+", "\x1b[32m"), // green
                    ChangeTag::Equal => (" ", "\x1b[0m"),   // normal
                };

                print!("{}{}{}", style, sign, change.value());

                if change.tag() != ChangeTag::Equal {
                    print!("\x1b[0m");
                }
            }
        }
    }
}
