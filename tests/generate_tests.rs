//! End-to-end manifest generation tests
//!
//! Each test builds a scratch release directory and runs the full pipeline
//! against it.

mod fixtures;

use std::fs;

use fixtures::ReleaseDir;
use release_manifest::config::ConfigOrigin;
use release_manifest::manifest::{validate_file, ReleaseManifest, REQUIRED_FIELDS};
use release_manifest::pipeline::Stage;
use release_manifest::version::VersionError;
use release_manifest::{GenerateError, ManifestBuilder};
use sha2::{Digest, Sha256};

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn test_generate_with_default_config() {
    let exe: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();
    let release = ReleaseDir::new("1.4.2.7", &exe);

    let report = ManifestBuilder::from_dir(release.path()).run().unwrap();

    assert_eq!(report.config_source.origin, ConfigOrigin::Builtin);
    assert_eq!(report.manifest_path, release.join("update-manifest.json"));

    let written = release.read_manifest("update-manifest.json");
    assert_eq!(written["version"], "1.4.2.7");
    assert_eq!(
        written["download_url"],
        "https://github.com/shomratamin/cloud-print-client/releases/download/v1.4.2.7/main.exe"
    );
    assert_eq!(written["checksum"], hex::encode(Sha256::digest(&exe)));
    assert_eq!(written["critical"], false);
    assert!(written["release_date"].as_str().unwrap().ends_with('Z'));
    assert_eq!(written.as_object().unwrap().len(), REQUIRED_FIELDS.len());
}

#[test]
fn test_generate_direct_mode_with_config_file() {
    let release = ReleaseDir::new("2.0.0.0", b"payload");
    release.write_config(
        r#"{
            "download_settings": {
                "use_github_releases": false,
                "github_repo": "ignored/repo",
                "base_download_url": "https://h/files"
            },
            "file_settings": {
                "executable_name": "main.exe",
                "manifest_name": "latest.json",
                "version_file": "version.go"
            },
            "critical_update_rules": { "patch_versions_critical": true }
        }"#,
    );

    let report = ManifestBuilder::from_dir(release.path()).run().unwrap();

    assert_eq!(report.config_source.origin, ConfigOrigin::File);
    assert!(report.config_source.digest.is_some());
    assert_eq!(report.manifest.download_url, "https://h/files/main.exe");
    assert!(report.manifest.critical);
    assert_eq!(report.classification.matched_rule, Some("patch_versions_critical"));
    assert!(release.join("latest.json").exists());
    assert!(!release.join("update-manifest.json").exists());
}

#[test]
fn test_written_manifest_always_validates() {
    for version in ["1.2.3.0", "1.2.3.1", "1.0", "beta", "টেস্ট-১"] {
        let release = ReleaseDir::new(version, b"x");
        let report = ManifestBuilder::from_dir(release.path()).run().unwrap();

        assert!(validate_file(&report.manifest_path).is_ok(), "{}", version);
        let loaded = ReleaseManifest::from_file(&report.manifest_path).unwrap();
        assert_eq!(loaded, report.manifest);
    }
}

#[test]
fn test_regeneration_overwrites_previous_manifest() {
    let release = ReleaseDir::new("1.0.0.1", b"first build");
    ManifestBuilder::from_dir(release.path()).run().unwrap();

    fs::write(release.join("main.exe"), b"second build").unwrap();
    fs::write(release.join("version.go"), fixtures::version_go("1.0.0.2")).unwrap();
    ManifestBuilder::from_dir(release.path()).run().unwrap();

    let written = release.read_manifest("update-manifest.json");
    assert_eq!(written["version"], "1.0.0.2");
    assert_eq!(written["checksum"], hex::encode(Sha256::digest(b"second build")));
}

// =============================================================================
// Configuration fallback
// =============================================================================

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let release = ReleaseDir::new("3.1.4.1", b"exe");
    release.write_config(r#"{ "file_settings": { "manifest_name": "other.json" "#);

    let report = ManifestBuilder::from_dir(release.path()).run().unwrap();

    assert_eq!(report.config_source.origin, ConfigOrigin::Builtin);
    assert!(release.join("update-manifest.json").exists());
    assert!(!release.join("other.json").exists());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_executable_leaves_manifest_untouched() {
    let release = ReleaseDir::empty();
    fs::write(release.join("version.go"), fixtures::version_go("1.0.0.0")).unwrap();
    fs::write(release.join("update-manifest.json"), "previous").unwrap();

    let mut builder = ManifestBuilder::from_dir(release.path());
    let err = builder.run().unwrap_err();

    assert!(matches!(err, GenerateError::ExecutableNotFound(_)));
    assert_eq!(fs::read_to_string(release.join("update-manifest.json")).unwrap(), "previous");
}

#[test]
fn test_missing_version_file() {
    let release = ReleaseDir::empty();
    fs::write(release.join("main.exe"), b"exe").unwrap();

    let mut builder = ManifestBuilder::from_dir(release.path());
    let err = builder.run().unwrap_err();

    assert!(matches!(err, GenerateError::Version(VersionError::FileNotFound(_))));
    assert_eq!(builder.stage(), Stage::ExeChecked);
    assert!(!release.join("update-manifest.json").exists());
}

#[test]
fn test_version_pattern_not_found() {
    let release = ReleaseDir::empty();
    fs::write(release.join("main.exe"), b"exe").unwrap();
    fs::write(release.join("version.go"), "package main\n\nconst v = 1\n").unwrap();

    let err = ManifestBuilder::from_dir(release.path()).run().unwrap_err();

    assert!(matches!(err, GenerateError::Version(VersionError::PatternNotFound(_))));
}

#[test]
fn test_unwritable_manifest_path() {
    let release = ReleaseDir::new("1.0.0.0", b"exe");
    release.write_config(
        r#"{ "file_settings": { "manifest_name": "missing/dir/manifest.json" } }"#,
    );

    let mut builder = ManifestBuilder::from_dir(release.path());
    let err = builder.run().unwrap_err();

    assert!(matches!(err, GenerateError::ManifestWrite(_)));
    assert_eq!(builder.stage(), Stage::CriticalityDecided);
}
