use std::io::Read;
use std::path::Path;

use blake3::Hasher;
use tracing::trace;

use crate::fs::FileSystem;

/// Content digest stored in a signature.
pub type Checksum = blake3::Hash;

/// Files are hashed in blocks of this many bytes, so memory use does not
/// depend on file size.
pub const HASH_BLOCK_SIZE: usize = 8192;

/// Compute the digest of a single file's full content.
pub fn compute_checksum(fs: &dyn FileSystem, path: &Path) -> std::io::Result<Checksum> {
    let mut hasher = Hasher::new();
    let mut reader = fs.open_read(path)?;
    let mut buf = [0u8; HASH_BLOCK_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        total += n as u64;
    }
    let hash = hasher.finalize();
    trace!(path = ?path, bytes = total, hash = %hash.to_hex(), "computed file checksum");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn mock_fs_hashing_matches_blake3() {
        let fs = MockFileSystem::new();
        fs.add_file("/w/test.txt", b"hello world".to_vec());

        let hash = compute_checksum(&fs, Path::new("/w/test.txt")).unwrap();
        // blake3 hash of "hello world"
        assert_eq!(
            hash.to_hex().as_str(),
            "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
        );
    }

    #[test]
    fn content_larger_than_one_block_is_fully_hashed() {
        let fs = MockFileSystem::new();
        let mut big = vec![b'x'; HASH_BLOCK_SIZE * 3 + 17];
        fs.add_file("/w/big.bin", big.clone());
        let before = compute_checksum(&fs, Path::new("/w/big.bin")).unwrap();
        assert_eq!(before, blake3::hash(&big));

        // A change in the trailing partial block must show up.
        *big.last_mut().unwrap() = b'y';
        fs.add_file("/w/big.bin", big);
        let after = compute_checksum(&fs, Path::new("/w/big.bin")).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn missing_file_is_an_error() {
        let fs = MockFileSystem::new();
        assert!(compute_checksum(&fs, Path::new("/w/nope")).is_err());
    }
}
