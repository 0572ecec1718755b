//! Effective configuration with provenance
//!
//! Loading never fails: a missing, unreadable or malformed config file is
//! replaced wholesale by the built-in defaults in a single fallback step.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use super::defaults::ManifestConfig;

/// Origin of the effective configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// Config file path that was consulted
    pub path: String,

    /// SHA-256 digest of raw file bytes (None for builtin)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Why the defaults were used instead of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Configuration plus its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub config: ManifestConfig,
    pub source: ConfigSource,
}

impl EffectiveConfig {
    /// Load the config file at `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let path_str = path.display().to_string();

        match Self::read_config_file(path) {
            Ok((config, digest)) => {
                tracing::info!("Configuration loaded from {}", path_str);
                Self {
                    config,
                    source: ConfigSource {
                        origin: ConfigOrigin::File,
                        path: path_str,
                        digest: Some(digest),
                        fallback_reason: None,
                    },
                }
            }
            Err(ConfigError::NotFound) => {
                tracing::warn!("Using default configuration ({} not found)", path_str);
                Self::builtin(path_str, "config file not found".to_string())
            }
            Err(e) => {
                tracing::warn!("Error loading config, using defaults: {}", e);
                Self::builtin(path_str, e.to_string())
            }
        }
    }

    fn builtin(path: String, reason: String) -> Self {
        Self {
            config: ManifestConfig::default(),
            source: ConfigSource {
                origin: ConfigOrigin::Builtin,
                path,
                digest: None,
                fallback_reason: Some(reason),
            },
        }
    }

    /// Read and parse a config file, returning the config and raw-byte digest
    fn read_config_file(path: &Path) -> Result<(ManifestConfig, String), ConfigError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigError::NotFound),
            Err(e) => return Err(ConfigError::IoError(e)),
        };

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("invalid UTF-8: {}", e)))?;

        let config = ManifestConfig::from_json(&contents)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?;

        Ok((config, digest))
    }

    /// Whether the built-in defaults are in effect
    pub fn is_builtin(&self) -> bool {
        self.source.origin == ConfigOrigin::Builtin
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration load failures. Recovered inside [`EffectiveConfig::load`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found")]
    NotFound,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}
