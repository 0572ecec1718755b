//! Required-field validation of a written manifest
//!
//! Works on the raw JSON rather than [`super::ReleaseManifest`] so that a
//! manifest edited by hand, or produced by another tool, gets a precise
//! diagnostic naming the offending field.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fields every manifest must carry, in the order they are checked
pub const REQUIRED_FIELDS: &[&str] = &[
    "version",
    "download_url",
    "checksum",
    "release_date",
    "critical",
];

/// Fields allowed to hold an empty value (`critical` may be `false`)
const MAY_BE_EMPTY: &[&str] = &["critical"];

/// Errors for manifest validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Empty value for field: {0}")]
    EmptyField(&'static str),
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as empty
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Check a parsed manifest, stopping at the first bad field
pub fn validate_value(manifest: &Value) -> Result<(), ValidationError> {
    let object = manifest.as_object().ok_or(ValidationError::NotAnObject)?;

    for &field in REQUIRED_FIELDS {
        let value = object.get(field).ok_or(ValidationError::MissingField(field))?;

        if !MAY_BE_EMPTY.contains(&field) && is_empty_value(value) {
            return Err(ValidationError::EmptyField(field));
        }
    }

    Ok(())
}

/// Re-read the manifest at `path` and validate it
pub fn validate_file(path: &Path) -> Result<(), ValidationError> {
    let contents = fs::read_to_string(path).map_err(|e| ValidationError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&contents)?;
    validate_value(&value)
}
