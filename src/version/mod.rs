//! Version extraction from a source file
//!
//! The version is the first string literal returned in the file, e.g.
//! `return "1.2.3.0"` inside a `getVersion()` function. The string is not
//! checked for shape.

use regex_lite::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Pattern for `return "<version>"`
pub const VERSION_PATTERN: &str = r#"return\s*"([^"]+)""#;

/// Errors for version extraction
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("version file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("could not find a `return \"<version>\"` string in {0}")]
    PatternNotFound(PathBuf),

    #[error("error reading version from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Find the first returned string literal in `contents`
pub fn extract_version(contents: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| Regex::new(VERSION_PATTERN).unwrap());
    re.captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read `path` and extract its version string
pub fn read_version(path: &Path) -> Result<String, VersionError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => VersionError::FileNotFound(path.to_path_buf()),
        _ => VersionError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    extract_version(&contents).ok_or_else(|| VersionError::PatternNotFound(path.to_path_buf()))
}
