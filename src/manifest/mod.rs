//! Update manifest (update-manifest.json)
//!
//! The manifest is the only artifact this tool persists. It is written fresh
//! on every run and replaces any earlier file at the same path.

mod validate;

pub use validate::{
    is_empty_value, validate_file, validate_value, ValidationError, REQUIRED_FIELDS,
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Release description consumed by the update client.
///
/// Field order here is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    pub version: String,
    pub download_url: String,

    /// Lowercase hex SHA-256 of the executable
    pub checksum: String,

    /// ISO-8601 UTC generation time
    pub release_date: String,

    pub critical: bool,
}

/// Errors for manifest persistence
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error writing manifest file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Format a release timestamp, e.g. `2026-10-18T09:30:00.123456Z`
pub fn format_release_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl ReleaseManifest {
    pub fn new(
        version: String,
        download_url: String,
        checksum: String,
        released_at: DateTime<Utc>,
        critical: bool,
    ) -> Self {
        Self {
            version,
            download_url,
            checksum,
            release_date: format_release_date(released_at),
            critical,
        }
    }

    /// Serialize to pretty JSON (two-space indent, non-ASCII unescaped)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to `path`, replacing any existing file
    pub fn write_to_file(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))
    }
}
