// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Sets up release directories with artifacts, checksums files and manifest templates

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANIFEST_TEMPLATE: &str = r#"apiVersion: krew.googlecontainertools.github.com/v1alpha2
kind: Plugin
metadata:
  name: {{name}}
spec:
  version: {{tag}}
  platforms:
  - selector:
      matchLabels:
        os: linux
        arch: amd64
    uri: https://github.com/example/exec/releases/download/{{tag}}/exec_linux_amd64.tar.gz
    sha256: {{sha256 "exec_linux_amd64.tar.gz"}}
  - selector:
      matchLabels:
        os: darwin
        arch: arm64
    uri: https://github.com/example/exec/releases/download/{{tag}}/exec_darwin_arm64.tar.gz
    sha256: {{sha256 "exec_darwin_arm64.tar.gz"}}
"#;

pub const CHECKSUMS: &str = "\
1a2b3c exec_darwin_arm64.tar.gz
4d5e6f exec_linux_amd64.tar.gz
";

/// A scratch release directory laid out like a project after `dist/` is built
pub struct ReleaseDir {
    pub temp_dir: TempDir,
}

impl ReleaseDir {
    pub fn new() -> Self {
        let release = Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fs::create_dir_all(release.path().join("dist")).expect("Failed to create dist");
        release
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_checksums(self, contents: &str) -> Self {
        fs::write(self.checksums_file(), contents).expect("Failed to write checksums");
        self
    }

    pub fn with_template(self, name: &str, contents: &str) -> Self {
        fs::write(self.path().join(name), contents).expect("Failed to write template");
        self
    }

    pub fn with_artifact(self, name: &str, contents: &str) -> Self {
        fs::write(self.path().join("dist").join(name), contents)
            .expect("Failed to write artifact");
        self
    }

    pub fn checksums_file(&self) -> PathBuf {
        self.path().join("dist").join("checksums.txt")
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read file")
    }

    /// The binary, run inside the release directory with a clean environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("krew-manifest").expect("binary should build");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("GITHUB_REF_NAME")
            .env_remove("RUST_LOG")
            .env_remove("KREW_MANIFEST_CHECKSUMS")
            .env_remove("KREW_MANIFEST_TAG_ENV")
            .env_remove("KREW_MANIFEST_MATCH_MODE")
            .env_remove("KREW_MANIFEST_LOG_LEVEL")
            .env_remove("KREW_MANIFEST_LOG_FORMAT")
            .arg("--no-color");
        cmd
    }
}
