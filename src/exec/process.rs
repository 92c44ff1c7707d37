// src/exec/process.rs

//! Shell process runner.

use anyhow::Context;
use tokio::process::Command;
use tracing::info;

use crate::errors::Result;

/// How a triggered command ended. Only logged, never acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failed(i32),
}

/// Run `command` through the platform shell and wait for it to exit.
///
/// The child inherits stdin/stdout/stderr so its output reaches the
/// terminal directly.
pub async fn run_shell(command: &str) -> Result<RunOutcome> {
    info!(cmd = %command, "running command");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    let status = cmd
        .status()
        .await
        .with_context(|| format!("running command '{command}'"))?;

    let code = status.code().unwrap_or(-1);
    info!(exit_code = code, success = status.success(), "command exited");

    Ok(if status.success() {
        RunOutcome::Success
    } else {
        RunOutcome::Failed(code)
    })
}
