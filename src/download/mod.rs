//! Download URL generation
//!
//! No well-formedness or reachability check is made; the URL is plain string
//! interpolation of config values.

use crate::config::ManifestConfig;

/// URL strategy selected by `use_github_releases`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// Binary attached to a `v<version>` tagged release
    HostedRelease,
    /// Binary served from a static file server
    Direct,
}

impl UrlMode {
    pub fn from_config(config: &ManifestConfig) -> Self {
        if config.download_settings.use_github_releases {
            UrlMode::HostedRelease
        } else {
            UrlMode::Direct
        }
    }
}

/// Download URL for `version` under `config`
pub fn download_url(version: &str, config: &ManifestConfig) -> String {
    let download = &config.download_settings;
    let executable = &config.file_settings.executable_name;

    match UrlMode::from_config(config) {
        UrlMode::HostedRelease => format!(
            "https://{}/{}/releases/download/v{}/{}",
            download.release_host, download.github_repo, version, executable
        ),
        UrlMode::Direct => format!("{}/{}", download.base_download_url, executable),
    }
}
