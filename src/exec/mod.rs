// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] runs one command string through the platform shell and
//!   waits for it.
//! - [`backend`] provides the `CommandRunner` trait the monitor talks to,
//!   with `ShellRunner` as the production implementation. Tests swap in a
//!   fake that records commands instead of spawning processes.

pub mod backend;
pub mod process;

pub use backend::{CommandRunner, ShellRunner};
pub use process::{run_shell, RunOutcome};
