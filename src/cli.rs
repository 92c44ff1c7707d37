// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Command-line arguments for `monrun`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "monrun",
    version,
    about = "Run a command whenever a file is modified.",
    long_about = "Polls the given files and runs COMMAND when one of them changes.\n\n\
                  Placeholders in COMMAND: @file (first watched file), @file-ext (same, \
                  without extension), @dir, @name, @{...} for the braced form, @@ for a \
                  literal @."
)]
pub struct CliArgs {
    /// Files to monitor. The first one seeds the command placeholders.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Command to run when a file changes.
    #[arg(short = 'c', long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// Also run the command once before monitoring starts.
    #[arg(short = 'b', long, overrides_with = "after")]
    pub before: bool,

    /// Only run the command after a change (default).
    #[arg(short = 'a', long, overrides_with = "before")]
    pub after: bool,

    /// Change into the first file's directory before running anything
    /// (default).
    #[arg(long, overrides_with = "no_change_workdir")]
    pub change_workdir: bool,

    /// Stay in the current working directory.
    #[arg(long, overrides_with = "change_workdir")]
    pub no_change_workdir: bool,

    /// Only compare modification times (never read file content).
    #[arg(short = 't', long, conflicts_with = "signals")]
    pub only_time: bool,

    /// Signals used to detect changes: timestamp, size, checksum.
    #[arg(long, value_name = "LIST", value_delimiter = ',', action = ArgAction::Append)]
    pub signals: Option<Vec<String>>,

    /// Polling interval in milliseconds.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Optional TOML config file; command-line flags take precedence.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MONRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate, resolve the command and print it, but don't monitor.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// `Some(true)` for `-b`, `Some(false)` for `-a`, `None` if neither.
    pub fn run_before(&self) -> Option<bool> {
        match (self.before, self.after) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// `Some(..)` only when one of the workdir switches was given.
    pub fn change_workdir(&self) -> Option<bool> {
        match (self.change_workdir, self.no_change_workdir) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::try_parse()`.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}
