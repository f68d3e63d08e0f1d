//! SHA-256 digests of written artifacts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{OutputError, Result};

const BUFFER_SIZE: usize = 65536;

/// Compute the lowercase hex SHA-256 of a file.
pub fn compute_file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| OutputError::io(path, source))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|source| OutputError::io(path, source))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %digest, "artifact hashed");
    Ok(digest)
}

/// A file written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Short name such as `forecast` or `correlation_matrix`.
    pub kind: String,
    pub path: PathBuf,
    /// Data rows, excluding the header.
    pub rows: usize,
    pub sha256: String,
}

impl Artifact {
    /// Describe an already-written file, hashing its contents.
    pub fn from_file(kind: impl Into<String>, path: &Path, rows: usize) -> Result<Self> {
        Ok(Self {
            kind: kind.into(),
            path: path.to_path_buf(),
            rows,
            sha256: compute_file_sha256(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_content() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, "abc").expect("write");
        assert_eq!(
            compute_file_sha256(&path).expect("hash"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let err = compute_file_sha256(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
