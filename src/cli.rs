//! CLI definition and parsing.
//! Direct mode takes three positionals; `-i` switches to interactive prompts;
//! invoking with no arguments at all lands in a small mode menu (see `app`).
//!
//! Notes:
//! - clap cannot express "exactly zero or exactly three positionals", so the
//!   positionals are optional here and the mode dispatch enforces the count.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// Move files whose names match a regex from one folder to another.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files whose names match a regex from one folder to another",
    after_help = "Examples:\n  file_mover ./source \".*\\.txt$\" ./target\n  file_mover -i"
)]
pub struct Args {
    /// Folder to take files from.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Regex matched anywhere inside each file name (e.g. `\.jpg$`).
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Folder to move matches into; created if missing.
    #[arg(value_name = "TARGET", value_hint = ValueHint::DirPath)]
    pub target: Option<PathBuf>,

    /// Prompt for source, pattern and target instead of reading arguments.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Report what would move, but do not touch the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location used by file_mover and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }

    /// True when the user passed no positionals at all (menu mode candidate).
    pub fn is_bare(&self) -> bool {
        self.source.is_none() && self.pattern.is_none() && self.target.is_none()
    }
}

pub fn parse() -> Args {
    Args::parse()
}
