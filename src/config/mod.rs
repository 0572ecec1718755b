//! Generator configuration
//!
//! `manifest_config.json` holds three groups: download settings, file
//! settings and critical-update rules. Every key is optional.

mod defaults;
mod effective;

pub use defaults::{
    CriticalUpdateRules, DownloadSettings, FileSettings, ManifestConfig, CONFIG_FILE_NAME,
};
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
