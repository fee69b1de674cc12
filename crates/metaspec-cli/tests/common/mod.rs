//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with temporary working directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `.metaspec/config.yaml` in the working directory
    pub fn with_config(self, config: &str) -> Self {
        let path = self.path().join(".metaspec/config.yaml");
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        std::fs::write(path, config).expect("Failed to write config");
        self
    }

    /// Write a file relative to the working directory
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("metaspec").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("METASPEC_CONFIG")
            .env_remove("METASPEC_TEMPLATES_DIR")
            .env_remove("METASPEC_LIBRARY_DIR")
            .env_remove("RUST_LOG")
            .env("METASPEC_LOG_LEVEL", "error")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A meta-spec that passes validation.
pub const VALID_META_SPEC: &str = r#"
name: api-spec-kit
version: 0.2.0
domain: web
lifecycle: greenfield
description: Specs for HTTP APIs
entity:
  name: Endpoint
  fields:
    - name: path
      type: str
      required: true
    - name: method
      type: str
commands:
  - name: validate
    description: Validate endpoint specs
dependencies:
  - typer>=0.9.0
"#;

/// Parse JSON written to stdout.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}
