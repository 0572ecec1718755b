//! Manifest generation pipeline
//!
//! Runs the stages in a fixed order:
//! - Load configuration (done before the builder is created)
//! - Check the executable exists
//! - Read the version
//! - Compute the checksum (and report the file size)
//! - Generate the download URL
//! - Decide criticality
//! - Write the manifest
//! - Re-read and validate it
//!
//! Any failure halts the pipeline. Nothing is rolled back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::checksum::{self, ChecksumError};
use crate::config::{ConfigSource, EffectiveConfig, FileSettings, ManifestConfig, CONFIG_FILE_NAME};
use crate::criticality::{Classification, CriticalityClassifier};
use crate::download;
use crate::manifest::{self, ManifestError, ReleaseManifest, ValidationError};
use crate::signal::SignalState;
use crate::version::{self, VersionError};

/// Generation errors
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("executable not found at {0}; compile the application first")]
    ExecutableNotFound(PathBuf),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error(transparent)]
    ManifestWrite(#[from] ManifestError),

    #[error("Manifest validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Operation cancelled by user")]
    Interrupted,
}

/// Result type for pipeline operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Pipeline progress. Each successful step advances exactly one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    ConfigLoaded,
    ExeChecked,
    VersionRead,
    ChecksumComputed,
    UrlGenerated,
    CriticalityDecided,
    ManifestWritten,
    Validated,
    Done,
}

/// Input and output paths resolved against the base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePaths {
    pub executable: PathBuf,
    pub version_file: PathBuf,
    pub manifest: PathBuf,
}

impl ReleasePaths {
    pub fn resolve(base_dir: &Path, files: &FileSettings) -> Self {
        Self {
            executable: base_dir.join(&files.executable_name),
            version_file: base_dir.join(&files.version_file),
            manifest: base_dir.join(&files.manifest_name),
        }
    }
}

/// Default config path for a base directory
pub fn default_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILE_NAME)
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub manifest: ReleaseManifest,
    pub manifest_path: PathBuf,

    /// Executable size in bytes (0 if it could not be read)
    pub executable_size: u64,

    pub classification: Classification,
    pub config_source: ConfigSource,
}

/// Builds and validates the update manifest for one release
pub struct ManifestBuilder {
    config: EffectiveConfig,
    paths: ReleasePaths,
    signals: Option<Arc<SignalState>>,
    released_at: Option<DateTime<Utc>>,
    stage: Stage,
}

impl ManifestBuilder {
    /// Create a builder for an already loaded configuration
    pub fn new(base_dir: &Path, config: EffectiveConfig) -> Self {
        let paths = ReleasePaths::resolve(base_dir, &config.config.file_settings);
        Self {
            config,
            paths,
            signals: None,
            released_at: None,
            stage: Stage::Start,
        }
    }

    /// Load `manifest_config.json` from `base_dir` and create a builder
    pub fn from_dir(base_dir: &Path) -> Self {
        let config = EffectiveConfig::load(&default_config_path(base_dir));
        Self::new(base_dir, config)
    }

    /// Stop between stages once `state` reports an interrupt
    pub fn with_signal_state(mut self, state: Arc<SignalState>) -> Self {
        self.signals = Some(state);
        self
    }

    /// Fix the release timestamp instead of using the current time
    pub fn with_release_time(mut self, at: DateTime<Utc>) -> Self {
        self.released_at = Some(at);
        self
    }

    pub fn config(&self) -> &ManifestConfig {
        &self.config.config
    }

    pub fn paths(&self) -> &ReleasePaths {
        &self.paths
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) -> GenerateResult<()> {
        self.stage = next;
        tracing::debug!(stage = ?next, "stage complete");

        if next != Stage::Done
            && self
                .signals
                .as_ref()
                .is_some_and(|s| s.is_interrupt_requested())
        {
            return Err(GenerateError::Interrupted);
        }
        Ok(())
    }

    fn check_executable(&self) -> GenerateResult<()> {
        if !self.paths.executable.exists() {
            return Err(GenerateError::ExecutableNotFound(self.paths.executable.clone()));
        }
        Ok(())
    }

    fn read_executable_size(&self) -> u64 {
        match checksum::file_size(&self.paths.executable) {
            Ok(size) => {
                tracing::info!("File size: {}", checksum::format_size(size));
                size
            }
            Err(e) => {
                tracing::warn!("Could not get file size: {}", e);
                0
            }
        }
    }

    /// Run all remaining stages
    pub fn run(&mut self) -> GenerateResult<GenerateReport> {
        tracing::info!("Generating update manifest...");
        self.advance(Stage::ConfigLoaded)?;

        self.check_executable()?;
        self.advance(Stage::ExeChecked)?;

        let version = version::read_version(&self.paths.version_file)?;
        tracing::info!("Found version: {}", version);
        self.advance(Stage::VersionRead)?;

        let checksum = checksum::sha256_file(&self.paths.executable)?;
        tracing::info!("Calculated SHA256: {}", checksum);
        let executable_size = self.read_executable_size();
        self.advance(Stage::ChecksumComputed)?;

        let download_url = download::download_url(&version, &self.config.config);
        tracing::info!("Generated download URL: {}", download_url);
        self.advance(Stage::UrlGenerated)?;

        let classifier = CriticalityClassifier::new(&self.config.config.critical_update_rules);
        let classification = classifier.classify(&version);
        tracing::debug!(
            rules = ?classifier.rule_names(),
            matched = ?classification.matched_rule,
            "criticality decided"
        );
        self.advance(Stage::CriticalityDecided)?;

        let released_at = self.released_at.unwrap_or_else(Utc::now);
        let manifest = ReleaseManifest::new(
            version,
            download_url,
            checksum,
            released_at,
            classification.critical,
        );
        manifest.write_to_file(&self.paths.manifest)?;
        tracing::info!("Wrote {}", self.paths.manifest.display());
        self.advance(Stage::ManifestWritten)?;

        manifest::validate_file(&self.paths.manifest)?;
        tracing::info!("Manifest validation passed");
        self.advance(Stage::Validated)?;

        self.advance(Stage::Done)?;

        Ok(GenerateReport {
            manifest,
            manifest_path: self.paths.manifest.clone(),
            executable_size,
            classification,
            config_source: self.config.source.clone(),
        })
    }
}
