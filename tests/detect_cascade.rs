// tests/detect_cascade.rs

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use monrun::detect::WatchTarget;
use monrun::errors::MonrunError;
use monrun::fs::RealFileSystem;
use monrun::prepare;
use monrun::template::shell_quote;
use monrun::types::{Signal, SignalPolicy};
use monrun_test_utils::builders::ConfigBuilder;
use monrun_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

/// Pin the modification time so the test does not depend on the
/// filesystem's timestamp granularity.
fn set_mtime(path: &Path, secs: u64) -> std::io::Result<()> {
    let file = File::options().write(true).open(path)?;
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}

fn write_at(path: &Path, content: &str, secs: u64) -> std::io::Result<()> {
    fs::write(path, content)?;
    set_mtime(path, secs)
}

#[test]
fn full_policy_lets_checksum_arbitrate() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("a.txt");
    write_at(&path, "abc", 1_000_000)?;

    let mut target = WatchTarget::new(Arc::new(RealFileSystem), &path, SignalPolicy::default())?;
    assert!(!target.is_modified()?, "no false positive right after construction");

    // Size and mtime change.
    write_at(&path, "abcd", 1_000_010)?;
    assert!(target.is_modified()?);

    // Same content, newer mtime: checksum says nothing changed.
    write_at(&path, "abcd", 1_000_020)?;
    assert!(!target.is_modified()?);
    assert!(!target.is_modified()?);

    Ok(())
}

#[test]
fn same_size_same_mtime_rewrite() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("b.txt");

    for (signals, expected) in [
        (vec![Signal::Timestamp, Signal::Size, Signal::Checksum], true),
        (vec![Signal::Checksum], true),
        (vec![Signal::Timestamp, Signal::Size], false),
        (vec![Signal::Timestamp], false),
        (vec![Signal::Size], false),
    ] {
        write_at(&path, "abc", 2_000_000)?;
        let policy = SignalPolicy::new(signals)?;
        let mut target = WatchTarget::new(Arc::new(RealFileSystem), &path, policy.clone())?;

        write_at(&path, "xyz", 2_000_000)?;
        assert_eq!(target.is_modified()?, expected, "policy {policy}");
    }

    Ok(())
}

#[test]
fn timestamp_only_fires_on_touch_and_consumes_it() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("c.txt");
    write_at(&path, "abc", 3_000_000)?;

    let mut target =
        WatchTarget::new(Arc::new(RealFileSystem), &path, SignalPolicy::timestamp_only())?;
    set_mtime(&path, 3_000_005)?;

    assert!(target.is_modified()?);
    assert!(!target.is_modified()?);
    Ok(())
}

#[test]
fn deleted_file_is_fatal() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("d.txt");
    fs::write(&path, "abc")?;

    let mut target = WatchTarget::new(Arc::new(RealFileSystem), &path, SignalPolicy::default())?;
    fs::remove_file(&path)?;

    let err = target.is_modified().unwrap_err();
    assert!(matches!(err, MonrunError::FileAccess { .. }));
    assert_eq!(err.exit_code(), 7);
    Ok(())
}

#[test]
fn directories_are_not_watchable() -> TestResult {
    let dir = tempdir()?;
    let err = WatchTarget::new(Arc::new(RealFileSystem), dir.path(), SignalPolicy::default())
        .unwrap_err();
    assert!(matches!(err, MonrunError::NotAFile(_)));
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlink_is_watched_under_the_name_given() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::create_dir(dir.path().join("real"))?;
    let first = dir.path().join("real").join("x.c");
    let second = dir.path().join("real").join("y.c");
    write_at(&first, "int x;", 1_000_000)?;
    write_at(&second, "int y = 1;", 1_000_000)?;
    let link = dir.path().join("link.c");
    std::os::unix::fs::symlink(&first, &link)?;

    let cfg = ConfigBuilder::new("cc @file @dir").file(link.clone()).build();
    let (mut targets, template) = prepare(Arc::new(RealFileSystem), &cfg)?;

    assert_eq!(targets.targets()[0].path(), link.as_path());
    let expected = format!(
        "cc {} {}",
        shell_quote(&link.to_string_lossy()),
        shell_quote(&dir.path().to_string_lossy())
    );
    assert_eq!(template.command(), expected);

    // Repointing the link is a change to the watched name.
    fs::remove_file(&link)?;
    std::os::unix::fs::symlink(&second, &link)?;
    assert_eq!(targets.poll()?, Some(0));
    assert_eq!(targets.poll()?, None);
    Ok(())
}
