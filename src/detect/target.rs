use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::detect::hash::{compute_checksum, Checksum};
use crate::detect::signature::Signature;
use crate::errors::{MonrunError, Result};
use crate::fs::{FileStat, FileSystem};
use crate::types::{Signal, SignalPolicy};

/// One monitored file and its last committed [`Signature`].
#[derive(Debug)]
pub struct WatchTarget {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    policy: SignalPolicy,
    signature: Signature,
}

impl WatchTarget {
    /// Capture the initial signature of `path`.
    ///
    /// Fails with [`MonrunError::NotAFile`] unless `path` is an existing
    /// regular file.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        path: impl Into<PathBuf>,
        policy: SignalPolicy,
    ) -> Result<Self> {
        let path = path.into();
        if !fs.is_file(&path) {
            return Err(MonrunError::NotAFile(path));
        }
        let signature =
            Signature::capture(fs.as_ref(), &path, &policy).map_err(|e| access_error(&path, e))?;
        debug!(path = ?path, %policy, "captured initial signature");
        Ok(Self {
            fs,
            path,
            policy,
            signature,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &SignalPolicy {
        &self.policy
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Has the file changed since the last committed signature?
    ///
    /// A `true` answer commits the new signature in the same call, so a
    /// second call without an intervening change returns `false`. Nothing is
    /// committed on a `false` answer.
    pub fn is_modified(&mut self) -> Result<bool> {
        let use_time = self.policy.contains(Signal::Timestamp);
        let use_size = self.policy.contains(Signal::Size);
        let use_checksum = self.policy.contains(Signal::Checksum);

        let mut stat = None;
        if self.policy.uses_stat() {
            let current = self
                .fs
                .metadata(&self.path)
                .map_err(|e| access_error(&self.path, e))?;

            let time_changed = Some(current.modified) != self.signature.modified;
            let size_changed = Some(current.len) != self.signature.size;

            if use_time && !time_changed {
                if !use_checksum {
                    trace!(path = ?self.path, "mtime unchanged");
                    return Ok(false);
                }
            } else if use_time && !use_size && !use_checksum {
                return self.commit(Some(current), None, "mtime");
            } else if use_size {
                if size_changed {
                    return self.commit(Some(current), None, "size");
                }
                if !use_checksum {
                    trace!(path = ?self.path, "size unchanged");
                    return Ok(false);
                }
            }
            stat = Some(current);
        }

        if use_checksum {
            let current = compute_checksum(self.fs.as_ref(), &self.path)
                .map_err(|e| access_error(&self.path, e))?;
            if Some(current) != self.signature.checksum {
                return self.commit(stat, Some(current), "checksum");
            }
            trace!(path = ?self.path, "checksum unchanged");
            return Ok(false);
        }

        Ok(false)
    }

    /// Store the new state and report the change.
    ///
    /// Under a checksum policy the digest is always refreshed, otherwise a
    /// size-triggered commit would leave a stale digest behind and the next
    /// poll would report the same change again.
    fn commit(
        &mut self,
        stat: Option<FileStat>,
        checksum: Option<Checksum>,
        signal: &'static str,
    ) -> Result<bool> {
        let checksum = match checksum {
            Some(c) => Some(c),
            None if self.policy.contains(Signal::Checksum) => Some(
                compute_checksum(self.fs.as_ref(), &self.path)
                    .map_err(|e| access_error(&self.path, e))?,
            ),
            None => None,
        };
        if let Some(stat) = stat {
            self.signature.record_stat(stat, &self.policy);
        }
        if checksum.is_some() {
            self.signature.checksum = checksum;
        }
        debug!(path = ?self.path, signal, "file modified");
        Ok(true)
    }
}

fn access_error(path: &Path, source: std::io::Error) -> MonrunError {
    MonrunError::FileAccess {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    const FILE: &str = "/w/a.txt";

    fn policy(signals: &[Signal]) -> SignalPolicy {
        SignalPolicy::new(signals.iter().copied()).unwrap()
    }

    /// Every non-empty combination of signals.
    fn all_policies() -> Vec<SignalPolicy> {
        let mut out = Vec::new();
        for mask in 1u8..8 {
            let signals: Vec<Signal> = Signal::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| *s)
                .collect();
            out.push(policy(&signals));
        }
        out
    }

    fn target(fs: &MockFileSystem, policy: SignalPolicy) -> WatchTarget {
        WatchTarget::new(Arc::new(fs.clone()), FILE, policy).unwrap()
    }

    fn setup(content: &str) -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file(FILE, content.as_bytes().to_vec());
        fs
    }

    #[test]
    fn untouched_file_is_not_modified_under_any_policy() {
        for p in all_policies() {
            let fs = setup("abc");
            let mut t = target(&fs, p.clone());
            assert!(!t.is_modified().unwrap(), "policy {p}");
            assert!(!t.is_modified().unwrap(), "policy {p}");
        }
    }

    #[test]
    fn same_mtime_and_size_change_is_detected_only_with_checksum() {
        for p in all_policies() {
            let fs = setup("abc");
            let mut t = target(&fs, p.clone());
            fs.overwrite_keep_mtime(FILE, b"xyz".to_vec());

            let expected = p.contains(Signal::Checksum);
            assert_eq!(t.is_modified().unwrap(), expected, "policy {p}");
        }
    }

    #[test]
    fn detected_change_is_consumed() {
        for p in all_policies() {
            let fs = setup("abc");
            let mut t = target(&fs, p.clone());
            fs.add_file(FILE, b"abcdef".to_vec());

            assert!(t.is_modified().unwrap(), "policy {p}");
            assert!(!t.is_modified().unwrap(), "policy {p}");
            assert!(!t.is_modified().unwrap(), "policy {p}");
        }
    }

    #[test]
    fn timestamp_only_reports_touch_without_reading_content() {
        let fs = setup("abc");
        let mut t = target(&fs, SignalPolicy::timestamp_only());
        fs.touch(FILE);

        assert!(t.is_modified().unwrap());
        assert_eq!(fs.reads(), 0);
    }

    #[test]
    fn unchanged_mtime_fast_path_skips_hashing_without_checksum() {
        let fs = setup("abc");
        let mut t = target(&fs, policy(&[Signal::Timestamp, Signal::Size]));
        let calls = fs.metadata_calls();

        assert!(!t.is_modified().unwrap());
        assert_eq!(fs.metadata_calls(), calls + 1);
        assert_eq!(fs.reads(), 0);
    }

    #[test]
    fn one_stat_per_poll_for_time_and_size() {
        let fs = setup("abc");
        let mut t = target(&fs, SignalPolicy::default());
        let calls = fs.metadata_calls();
        fs.add_file(FILE, b"abcd".to_vec());

        assert!(t.is_modified().unwrap());
        assert_eq!(fs.metadata_calls(), calls + 1);
    }

    #[test]
    fn size_change_refreshes_checksum_on_commit() {
        let fs = setup("abc");
        let mut t = target(&fs, SignalPolicy::default());
        fs.add_file(FILE, b"abcd".to_vec());

        assert!(t.is_modified().unwrap());
        assert_eq!(t.signature().size, Some(4));
        assert_eq!(t.signature().checksum, Some(blake3::hash(b"abcd")));
        assert!(!t.is_modified().unwrap());
    }

    #[test]
    fn time_and_size_treat_equal_size_as_unmodified() {
        let fs = setup("abc");
        let mut t = target(&fs, policy(&[Signal::Timestamp, Signal::Size]));
        fs.add_file(FILE, b"xyz".to_vec());

        assert!(!t.is_modified().unwrap());
    }

    #[test]
    fn size_only_with_equal_size_is_unmodified() {
        let fs = setup("abc");
        let mut t = target(&fs, policy(&[Signal::Size]));
        fs.add_file(FILE, b"xyz".to_vec());
        assert!(!t.is_modified().unwrap());

        fs.add_file(FILE, b"wxyz".to_vec());
        assert!(t.is_modified().unwrap());
        assert!(!t.is_modified().unwrap());
    }

    #[test]
    fn touch_with_same_content_is_not_a_change_under_checksum() {
        let fs = setup("abc");
        let mut t = target(&fs, SignalPolicy::default());
        let before = t.signature().clone();
        fs.touch(FILE);

        assert!(!t.is_modified().unwrap());
        // Nothing is committed on a negative answer.
        assert_eq!(t.signature(), &before);
    }

    #[test]
    fn checksum_commit_also_records_stat() {
        let fs = setup("abc");
        let mut t = target(&fs, policy(&[Signal::Timestamp, Signal::Checksum]));
        fs.add_file(FILE, b"xyz".to_vec());

        assert!(t.is_modified().unwrap());
        let stat = fs.metadata(Path::new(FILE)).unwrap();
        assert_eq!(t.signature().modified, Some(stat.modified));
        assert_eq!(t.signature().checksum, Some(blake3::hash(b"xyz")));
        assert!(!t.is_modified().unwrap());
    }

    #[test]
    fn vanished_file_is_an_access_error() {
        for p in all_policies() {
            let fs = setup("abc");
            let mut t = target(&fs, p.clone());
            fs.remove(FILE);

            match t.is_modified() {
                Err(MonrunError::FileAccess { path, .. }) => {
                    assert_eq!(path, PathBuf::from(FILE))
                }
                other => panic!("policy {p}: expected FileAccess, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_path_is_not_a_file() {
        let fs = MockFileSystem::new();
        let err = WatchTarget::new(Arc::new(fs), "/w/missing", SignalPolicy::default())
            .unwrap_err();
        assert!(matches!(err, MonrunError::NotAFile(_)));
    }
}
