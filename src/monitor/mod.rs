// src/monitor/mod.rs

//! The polling loop.
//!
//! The synchronous part lives in [`core`]: a [`TargetSet`] asks each
//! [`WatchTarget`](crate::detect::WatchTarget) in registration order whether
//! it changed and stops at the first one that did. The async shell in
//! [`runtime`] adds the sleep between ticks, runs the command through a
//! [`CommandRunner`](crate::exec::CommandRunner) and watches for shutdown.

use std::time::Duration;

pub mod core;
pub mod runtime;

pub use self::core::TargetSet;
pub use runtime::Monitor;

/// Default time between polling ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Options shared by the monitor loop.
#[derive(Debug, Clone, Copy)]
pub struct MonitorOptions {
    /// Sleep between ticks.
    pub interval: Duration,
    /// Run the command once before the first tick.
    pub run_before: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            run_before: false,
        }
    }
}
