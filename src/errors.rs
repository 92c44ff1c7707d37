// src/errors.rs

//! Crate-wide error type and exit status mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status for bad command-line usage (reported by `clap`).
pub const EXIT_USAGE: i32 = 1;

#[derive(Error, Debug)]
pub enum MonrunError {
    #[error("no file to monitor was given")]
    NoFile,

    #[error("not a regular file: {0:?}")]
    NotAFile(PathBuf),

    #[error("no command given (pass one with -c)")]
    NoCommand,

    #[error("invalid signal policy: {0}")]
    InvalidSignal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("cannot access watched file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MonrunError {
    /// Process exit status for this error kind.
    ///
    /// Startup errors each get their own status so wrapper scripts can tell
    /// them apart; runtime failures share one.
    pub fn exit_code(&self) -> i32 {
        match self {
            MonrunError::NoFile => 2,
            MonrunError::NotAFile(_) => 3,
            MonrunError::NoCommand => 4,
            MonrunError::InvalidSignal(_) => 5,
            MonrunError::ConfigError(_) | MonrunError::TomlError(_) => 6,
            MonrunError::FileAccess { .. }
            | MonrunError::IoError(_)
            | MonrunError::Other(_) => 7,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MonrunError>;
