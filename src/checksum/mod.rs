//! Streaming SHA-256 of release binaries

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read buffer size for hashing
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Errors for checksum computation
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("executable not found at {0}")]
    NotFound(PathBuf),

    #[error("error calculating checksum of {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Hash everything `reader` yields, returning lowercase hex
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of the file at `path`, read in fixed-size chunks
pub fn sha256_file(path: &Path) -> Result<String, ChecksumError> {
    let io_err = |e: io::Error| match e.kind() {
        io::ErrorKind::NotFound => ChecksumError::NotFound(path.to_path_buf()),
        _ => ChecksumError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    };

    let file = File::open(path).map_err(io_err)?;
    sha256_reader(file).map_err(io_err)
}

/// Size of the file at `path` in bytes
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Human-readable size, e.g. `12,345,678 bytes (11.77 MB)`
pub fn format_size(size: u64) -> String {
    let digits = size.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{} bytes ({:.2} MB)", grouped, size as f64 / (1024.0 * 1024.0))
}
