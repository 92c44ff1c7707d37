// src/exec/backend.rs

//! Pluggable command runner abstraction.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::process::{run_shell, RunOutcome};

/// Trait abstracting how the resolved command is executed.
///
/// The returned future resolves once the command has finished; the monitor
/// awaits it before polling again.
pub trait CommandRunner: Send {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>>;
}

/// Real runner used in production: `sh -c` (or `cmd /C`), stdio inherited.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>> {
        Box::pin(run_shell(command))
    }
}
