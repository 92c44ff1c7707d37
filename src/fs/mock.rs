// src/fs/mock.rs

use super::{FileStat, FileSystem};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
struct MockFile {
    content: Vec<u8>,
    modified: SystemTime,
}

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<PathBuf, MockFile>,
    /// Logical clock; every write or touch advances it by one second.
    ticks: u64,
    metadata_calls: usize,
    reads: usize,
}

impl MockState {
    fn next_mtime(&mut self) -> SystemTime {
        self.ticks += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + self.ticks)
    }
}

/// In-memory filesystem with a controllable modification clock.
///
/// Clones share state, so a test can keep one handle and give another to
/// the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Create or overwrite a file, advancing its modification time.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let mut state = self.lock();
        let modified = state.next_mtime();
        state.files.insert(
            path.as_ref().to_path_buf(),
            MockFile {
                content: content.into(),
                modified,
            },
        );
    }

    /// Replace the content while keeping the current modification time,
    /// like a write that lands inside the filesystem's mtime granularity.
    pub fn overwrite_keep_mtime(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let mut state = self.lock();
        if let Some(file) = state.files.get_mut(path.as_ref()) {
            file.content = content.into();
        }
    }

    /// Advance the modification time without touching content.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        let modified = state.next_mtime();
        if let Some(file) = state.files.get_mut(path.as_ref()) {
            file.modified = modified;
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.lock().files.remove(path.as_ref());
    }

    /// Number of `metadata` calls served so far.
    pub fn metadata_calls(&self) -> usize {
        self.lock().metadata_calls
    }

    /// Number of `open_read` calls served so far.
    pub fn reads(&self) -> usize {
        self.lock().reads
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("File not found: {:?}", path),
    )
}

impl FileSystem for MockFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileStat> {
        let mut state = self.lock();
        state.metadata_calls += 1;
        let file = state.files.get(path).ok_or_else(|| not_found(path))?;
        Ok(FileStat {
            modified: file.modified,
            len: file.content.len() as u64,
        })
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let mut state = self.lock();
        state.reads += 1;
        let file = state.files.get(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(Cursor::new(file.content.clone())))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    /// Relative paths are anchored at `/`; nothing is resolved.
    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(Path::new("/").join(path))
    }
}
