//! Release directory fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Version source the way the client ships it
pub fn version_go(version: &str) -> String {
    format!(
        "package main\n\n// getVersion returns the client version.\nfunc getVersion() string {{\n\treturn \"{}\"\n}}\n",
        version
    )
}

/// A scratch release directory with an executable and version file
pub struct ReleaseDir {
    pub dir: TempDir,
}

impl ReleaseDir {
    pub fn new(version: &str, exe: &[u8]) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("version.go"), version_go(version)).unwrap();
        fs::write(dir.path().join("main.exe"), exe).unwrap();
        Self { dir }
    }

    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_config(&self, json: &str) {
        fs::write(self.join("manifest_config.json"), json).unwrap();
    }

    pub fn read_manifest(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.join(name)).unwrap()).unwrap()
    }
}
