use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use monrun::errors::Result;
use monrun::exec::{CommandRunner, RunOutcome};

type Hook = Box<dyn FnMut(usize) + Send>;

/// A fake runner that:
/// - records every command it was asked to run
/// - reports the configured outcome without spawning anything
/// - optionally calls a hook with the 1-based run count, e.g. to modify a
///   mock file "while the command runs".
/// - optionally never finishes, like a command that is still running.
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
    outcome: RunOutcome,
    hook: Option<Hook>,
    stall: bool,
}

impl FakeRunner {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            outcome: RunOutcome::Success,
            hook: None,
            stall: false,
        }
    }

    pub fn with_outcome(mut self, outcome: RunOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn on_run(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Record the command, then never complete.
    pub fn stalled(mut self) -> Self {
        self.stall = true;
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let count = {
                let mut guard = self.executed.lock().unwrap();
                guard.push(command.to_string());
                guard.len()
            };
            if let Some(hook) = self.hook.as_mut() {
                hook(count);
            }
            if self.stall {
                std::future::pending::<()>().await;
            }
            Ok(self.outcome)
        })
    }
}
