use std::path::Path;
use std::time::SystemTime;

use crate::detect::hash::{compute_checksum, Checksum};
use crate::fs::{FileStat, FileSystem};
use crate::types::{Signal, SignalPolicy};

/// Last observed state of a watched file.
///
/// Only the fields the policy needs are populated:
/// - `modified` when timestamp or size is enabled (one stat yields both),
/// - `size` when size is enabled,
/// - `checksum` when checksum is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub modified: Option<SystemTime>,
    pub size: Option<u64>,
    pub checksum: Option<Checksum>,
}

impl Signature {
    /// Read the file's current state under `policy`.
    pub fn capture(
        fs: &dyn FileSystem,
        path: &Path,
        policy: &SignalPolicy,
    ) -> std::io::Result<Self> {
        let mut signature = Signature {
            modified: None,
            size: None,
            checksum: None,
        };
        if policy.uses_stat() {
            signature.record_stat(fs.metadata(path)?, policy);
        }
        if policy.contains(Signal::Checksum) {
            signature.checksum = Some(compute_checksum(fs, path)?);
        }
        Ok(signature)
    }

    /// Store the stat fields the policy tracks.
    pub(crate) fn record_stat(&mut self, stat: FileStat, policy: &SignalPolicy) {
        self.modified = Some(stat.modified);
        if policy.contains(Signal::Size) {
            self.size = Some(stat.len);
        }
    }
}
