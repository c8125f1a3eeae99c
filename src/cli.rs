//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Exactly one naming mode is used per run: --plan or --find/--replace.
//! - --debug is a shorthand for --log-level debug.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::config::{Config, LogLevel};
use crate::engine::CaseMode;

/// CLI wrapper for the batch_rename library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename many files at once without ever colliding on disk"
)]
pub struct Args {
    /// Directory containing the files to rename.
    #[arg(value_name = "DIRECTORY", value_hint = ValueHint::DirPath, default_value = ".")]
    pub directory: PathBuf,

    /// Plan file: one rename per line as `current<TAB>new`. Blank lines and
    /// lines starting with '#' are skipped.
    #[arg(long, short = 'p', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub plan: Option<PathBuf>,

    /// Rename by substring replacement: every file whose name contains this
    /// string gets a candidate with all occurrences replaced.
    #[arg(long, value_name = "TEXT", conflicts_with = "plan")]
    pub find: Option<String>,

    /// Replacement text for --find (defaults to removing the match).
    #[arg(long, value_name = "TEXT", requires = "find")]
    pub replace: Option<String>,

    /// Show what would be renamed, but do not modify the filesystem.
    #[arg(long, help = "Show what would be done, but do not modify files")]
    pub dry_run: bool,

    /// After renaming, ask whether to keep the result; answering no undoes
    /// the batch.
    #[arg(long, help = "Prompt to keep or undo the batch after it runs")]
    pub confirm: bool,

    /// Treat names differing only in case as distinct (Unix semantics).
    #[arg(long, help = "Use case-sensitive name comparison")]
    pub case_sensitive: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print the failure report as JSON and emit structured JSON logs.
    #[arg(long, help = "Emit the failure report and logs as JSON")]
    pub json: bool,

    /// Print where batch_rename will look for the config file (or
    /// BATCH_RENAME_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by batch_rename and exit"
    )]
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

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset
    /// flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.case_sensitive {
            cfg.case_mode = CaseMode::Sensitive;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
