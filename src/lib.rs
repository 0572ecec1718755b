//! Release manifest generator
//!
//! Builds the `update-manifest.json` consumed by an auto-updating client:
//! reads the release version from a source file, hashes the compiled
//! executable, derives the download URL and criticality from
//! `manifest_config.json`, then writes and re-validates the manifest.

pub mod checksum;
pub mod config;
pub mod criticality;
pub mod download;
pub mod manifest;
pub mod pipeline;
pub mod signal;
pub mod version;

pub use config::{EffectiveConfig, ManifestConfig};
pub use manifest::ReleaseManifest;
pub use pipeline::{GenerateError, GenerateReport, ManifestBuilder, Stage};
