// src/monitor/core.rs

//! Pure detection step, no Tokio and no processes.

use tracing::trace;

use crate::detect::WatchTarget;
use crate::errors::Result;

/// Watch targets in registration order.
#[derive(Debug)]
pub struct TargetSet {
    targets: Vec<WatchTarget>,
}

impl TargetSet {
    pub fn new(targets: Vec<WatchTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// One polling tick.
    ///
    /// Returns the index of the first target found modified. Targets after
    /// it are not consulted until the next tick. Any access error ends the
    /// tick and is returned as-is.
    pub fn poll(&mut self) -> Result<Option<usize>> {
        for (index, target) in self.targets.iter_mut().enumerate() {
            if target.is_modified()? {
                return Ok(Some(index));
            }
        }
        trace!(targets = self.targets.len(), "tick: nothing changed");
        Ok(None)
    }
}
