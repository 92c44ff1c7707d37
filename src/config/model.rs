// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::types::SignalPolicy;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// command = "make"
/// files = ["main.c", "util.c"]
/// signals = ["timestamp", "size", "checksum"]
/// interval_ms = 1000
/// run_before = false
/// change_workdir = true
/// ```
///
/// Every key is optional; command-line flags are layered on top with
/// [`RawConfig::with_cli`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Command template to run on change.
    #[serde(default)]
    pub command: Option<String>,

    /// Files to monitor, in registration order.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Signal names; see [`Signal`](crate::types::Signal).
    #[serde(default)]
    pub signals: Option<Vec<String>>,

    /// Shorthand for `signals = ["timestamp"]`.
    #[serde(default)]
    pub only_time: Option<bool>,

    #[serde(default)]
    pub interval_ms: Option<u64>,

    #[serde(default)]
    pub run_before: Option<bool>,

    #[serde(default)]
    pub change_workdir: Option<bool>,
}

impl RawConfig {
    /// Overlay command-line values. Anything given on the command line wins;
    /// files from the command line replace the configured list.
    pub fn with_cli(mut self, args: &CliArgs) -> Self {
        if !args.files.is_empty() {
            self.files = args.files.clone();
        }
        if let Some(command) = &args.command {
            self.command = Some(command.clone());
        }
        if args.only_time {
            self.only_time = Some(true);
            self.signals = None;
        } else if let Some(signals) = &args.signals {
            self.signals = Some(signals.clone());
            self.only_time = None;
        }
        if let Some(ms) = args.interval_ms {
            self.interval_ms = Some(ms);
        }
        if let Some(before) = args.run_before() {
            self.run_before = Some(before);
        }
        if let Some(chdir) = args.change_workdir() {
            self.change_workdir = Some(chdir);
        }
        self
    }
}

/// Validated configuration the driver runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub files: Vec<PathBuf>,
    pub command: String,
    pub policy: SignalPolicy,
    pub interval: Duration,
    pub run_before: bool,
    pub change_workdir: bool,
}
