// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawConfig, RunConfig};
use crate::config::validate::check_files;
use crate::errors::{MonrunError, Result};
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`resolve`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        MonrunError::ConfigError(format!("reading config file {:?}: {e}", path))
    })?;

    let config: RawConfig = toml::from_str(&contents)?;
    debug!(path = ?path, "loaded config file");

    Ok(config)
}

/// Build the validated run configuration from the command line.
///
/// - Reads the `--config` TOML file, if one was given.
/// - Layers the command-line flags on top.
/// - Applies defaults and checks startup invariants.
pub fn resolve(args: &CliArgs) -> Result<RunConfig> {
    RunConfig::try_from(layered(args)?)
}

/// [`resolve`], but every named file must already be a regular file.
///
/// That check runs before the rest of validation, so a missing file is
/// reported ahead of a missing command.
pub fn resolve_checked(fs: &dyn FileSystem, args: &CliArgs) -> Result<RunConfig> {
    let raw = layered(args)?;
    check_files(fs, &raw.files)?;
    RunConfig::try_from(raw)
}

fn layered(args: &CliArgs) -> Result<RawConfig> {
    let raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => RawConfig::default(),
    };
    Ok(raw.with_cli(args))
}
