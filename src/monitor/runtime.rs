// src/monitor/runtime.rs

use std::fmt;
use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::exec::{CommandRunner, RunOutcome};

use super::core::TargetSet;
use super::MonitorOptions;

/// Async shell around [`TargetSet`]: sleeps, polls, runs the command.
///
/// Everything happens on one task. A running command blocks polling until
/// it exits, and changes made meanwhile are seen on the next tick.
pub struct Monitor<R: CommandRunner> {
    targets: TargetSet,
    command: String,
    runner: R,
    options: MonitorOptions,
}

impl<R: CommandRunner> fmt::Debug for Monitor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("targets", &self.targets)
            .field("command", &self.command)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> Monitor<R> {
    pub fn new(
        targets: TargetSet,
        command: impl Into<String>,
        runner: R,
        options: MonitorOptions,
    ) -> Self {
        Self {
            targets,
            command: command.into(),
            runner,
            options,
        }
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Run the command once. Failures are logged, never returned.
    pub async fn run_command(&mut self) {
        match self.runner.run(&self.command).await {
            Ok(RunOutcome::Success) => debug!("command succeeded"),
            Ok(RunOutcome::Failed(code)) => warn!(exit_code = code, "command failed"),
            Err(err) => error!(error = %err, "could not run command"),
        }
    }

    /// Poll once and run the command if a target changed.
    ///
    /// Returns the index of the target that fired, if any.
    pub async fn tick(&mut self) -> Result<Option<usize>> {
        let fired = self.targets.poll()?;
        if let Some(index) = fired {
            let path = self.targets.targets()[index].path();
            info!(path = ?path, "change detected");
            self.run_command().await;
        }
        Ok(fired)
    }

    /// Main loop.
    ///
    /// Runs until `shutdown` resolves (normal exit, also mid-command) or a
    /// watched file becomes inaccessible (error).
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        if self.options.run_before {
            tokio::select! {
                _ = &mut shutdown => {
                    interrupted();
                    return Ok(());
                }
                _ = self.run_command() => {}
            }
        }

        info!(
            files = self.targets.len(),
            interval_ms = self.options.interval.as_millis() as u64,
            "monitoring for modifications"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    interrupted();
                    return Ok(());
                }
                _ = sleep(self.options.interval) => {}
            }

            tokio::select! {
                _ = &mut shutdown => {
                    interrupted();
                    return Ok(());
                }
                res = self.tick() => { res?; }
            }
        }
    }
}

fn interrupted() {
    info!("execution interrupted");
}
