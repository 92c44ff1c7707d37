// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{RawConfig, RunConfig};
use crate::errors::{MonrunError, Result};
use crate::fs::FileSystem;
use crate::monitor::DEFAULT_INTERVAL;
use crate::types::SignalPolicy;

impl TryFrom<RawConfig> for RunConfig {
    type Error = MonrunError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        if raw.files.is_empty() {
            return Err(MonrunError::NoFile);
        }
        let command = validate_command(raw.command)?;
        let policy = validate_policy(raw.signals, raw.only_time)?;
        let interval = validate_interval(raw.interval_ms)?;

        Ok(RunConfig {
            files: raw.files,
            command,
            policy,
            interval,
            run_before: raw.run_before.unwrap_or(false),
            change_workdir: raw.change_workdir.unwrap_or(true),
        })
    }
}

/// Every path must name an existing regular file.
pub fn check_files(fs: &dyn FileSystem, files: &[PathBuf]) -> Result<()> {
    match files.iter().find(|file| !fs.is_file(file)) {
        Some(file) => Err(MonrunError::NotAFile(file.clone())),
        None => Ok(()),
    }
}

fn validate_command(command: Option<String>) -> Result<String> {
    match command {
        Some(cmd) if !cmd.trim().is_empty() => Ok(cmd),
        _ => Err(MonrunError::NoCommand),
    }
}

fn validate_policy(
    signals: Option<Vec<String>>,
    only_time: Option<bool>,
) -> Result<SignalPolicy> {
    match (signals, only_time.unwrap_or(false)) {
        (Some(_), true) => Err(MonrunError::ConfigError(
            "`only_time` and `signals` cannot both be set".to_string(),
        )),
        (Some(names), false) => SignalPolicy::parse_names(names),
        (None, true) => Ok(SignalPolicy::timestamp_only()),
        (None, false) => Ok(SignalPolicy::default()),
    }
}

fn validate_interval(interval_ms: Option<u64>) -> Result<Duration> {
    match interval_ms {
        None => Ok(DEFAULT_INTERVAL),
        Some(0) => Err(MonrunError::ConfigError(
            "interval_ms must be >= 1 (got 0)".to_string(),
        )),
        Some(ms) => Ok(Duration::from_millis(ms)),
    }
}
