//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upstream repository for spec-kit templates.
pub const DEFAULT_SPEC_KIT_REPO: &str = "https://github.com/github/spec-kit.git";
/// Upstream repository for OpenSpec templates.
pub const DEFAULT_OPENSPEC_REPO: &str = "https://github.com/Fission-AI/OpenSpec.git";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaspecConfig {
    /// Template lookup configuration.
    pub templates: TemplatesConfig,
    /// Upstream template sync configuration.
    pub sync: SyncConfig,
    /// Additional spec toolkits available to `metaspec spec`.
    pub toolkits: Vec<ToolkitConfig>,
}

/// Template lookup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory whose templates take precedence over the built-in set.
    pub custom_dir: Option<PathBuf>,
    /// Where synced third-party templates are written.
    pub library_dir: PathBuf,
    /// Specs directory name exposed to templates as `specs_dir`.
    pub specs_dir: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            custom_dir: None,
            library_dir: PathBuf::from(".metaspec/library"),
            specs_dir: "specs".to_string(),
        }
    }
}

/// Upstream repositories used by `metaspec sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub spec_kit_repo: String,
    pub openspec_repo: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            spec_kit_repo: DEFAULT_SPEC_KIT_REPO.to_string(),
            openspec_repo: DEFAULT_OPENSPEC_REPO.to_string(),
        }
    }
}

/// A custom spec toolkit declared by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Name used on the `metaspec spec` command line.
    pub name: String,
    /// Binary to execute.
    pub command: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Commands the toolkit understands.
    #[serde(default)]
    pub commands: Vec<String>,
    /// How to install the binary when it is missing.
    #[serde(default)]
    pub install_hint: Option<String>,
}
