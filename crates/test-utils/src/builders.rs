use std::path::PathBuf;

use monrun::config::{RawConfig, RunConfig};

/// Builder for `RawConfig` / `RunConfig` to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfig,
}

impl ConfigBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            config: RawConfig {
                command: Some(command.to_string()),
                ..RawConfig::default()
            },
        }
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.files.push(path.into());
        self
    }

    pub fn build(self) -> RunConfig {
        RunConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}
