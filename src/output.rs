//! User-facing printing: prefixed status helpers plus one line per relocation
//! outcome. Colors are enabled only when stdout is a TTY; the outcome lines
//! keep a stable prefix (`Moved:` / `Skipped (exists):` / `Failed:`) that
//! users may script against.

use owo_colors::OwoColorize;

use crate::fs_ops::Outcome;
use crate::pipeline::FileReport;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// One line per file outcome. Failures go to stderr with their cause so the
/// operator can see exactly which files need manual attention.
pub fn print_outcome(report: &FileReport, dry_run: bool) {
    match &report.outcome {
        Outcome::Moved => {
            let label = if dry_run { "Would move:" } else { "Moved:" };
            if is_tty() {
                println!("{} {}", label.green().bold(), report.name);
            } else {
                println!("{} {}", label, report.name);
            }
        }
        Outcome::SkippedExists => {
            if is_tty() {
                println!("{} {}", "Skipped (exists):".yellow().bold(), report.name);
            } else {
                println!("Skipped (exists): {}", report.name);
            }
        }
        Outcome::Failed(e) => {
            if is_tty() {
                eprintln!("{} {}: {:#}", "Failed:".red().bold(), report.name, e);
            } else {
                eprintln!("Failed: {}: {:#}", report.name, e);
            }
        }
    }
}
