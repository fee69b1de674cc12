//! Sync third-party command templates into the MetaSpec template library.
//!
//! Each [`SyncSource`] is cloned fresh into a temporary directory, its
//! templates are rewritten so that project-specific names become template
//! variables (`cli_name`, `cli_prefix`, `specs_dir`, `toolkit_name`), and the
//! results land under `<library>/<source subdir>/{commands,templates}`.

pub mod git;
pub mod index;
pub mod openspec;
pub mod speckit;
pub mod typescript;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use metaspec_common_config::SyncConfig;
use thiserror::Error;

pub use index::write_index;
pub use openspec::generalize_openspec;
pub use speckit::generalize_spec_kit;

/// Header prepended to synced templates that lack a title of their own.
pub const GENERATED_HEADER: &str = "# Generated Template\n\n\
**Project**: {{ name }}\n\
**Version**: {{ version }}\n\
**Domain**: {{ domain }}\n\
**Date**: {{ date }}\n\n\
---\n\n";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("git is not installed or not on PATH")]
    GitMissing,

    #[error("git clone of {url} failed: {stderr}")]
    Git { url: String, stderr: String },

    #[error("template source not found in clone: {}", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A third-party template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSource {
    SpecKit,
    OpenSpec,
}

impl SyncSource {
    pub const ALL: [SyncSource; 2] = [SyncSource::SpecKit, SyncSource::OpenSpec];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SpecKit => "spec-kit",
            Self::OpenSpec => "openspec",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SpecKit => "Spec-Kit",
            Self::OpenSpec => "OpenSpec",
        }
    }

    /// Repository to clone, as configured.
    pub fn repository<'a>(&self, config: &'a SyncConfig) -> &'a str {
        match self {
            Self::SpecKit => &config.spec_kit_repo,
            Self::OpenSpec => &config.openspec_repo,
        }
    }

    pub fn homepage(&self) -> &'static str {
        match self {
            Self::SpecKit => "https://github.com/github/spec-kit",
            Self::OpenSpec => "https://github.com/Fission-AI/OpenSpec",
        }
    }

    /// Template location inside the cloned repository.
    pub fn template_path(&self) -> &'static str {
        match self {
            Self::SpecKit => "templates",
            Self::OpenSpec => "src/core/templates",
        }
    }

    /// Destination below the library directory.
    pub fn library_subdir(&self) -> &'static str {
        match self {
            Self::SpecKit => "sdd/spec-kit",
            Self::OpenSpec => "sdd/openspec",
        }
    }

    pub fn lifecycle(&self) -> &'static str {
        match self {
            Self::SpecKit => "Greenfield (0->1)",
            Self::OpenSpec => "Brownfield (1->n)",
        }
    }

    pub fn best_for(&self) -> &'static str {
        match self {
            Self::SpecKit => "Creating new features and projects from scratch",
            Self::OpenSpec => "Collaborative specification evolution",
        }
    }
}

impl fmt::Display for SyncSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyncSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|src| src.name() == s)
            .ok_or_else(|| format!("unknown template source '{s}' (expected spec-kit or openspec)"))
    }
}

/// Outcome of syncing one source.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub source: SyncSource,
    pub target_dir: PathBuf,
    pub commands: Vec<String>,
    pub templates: Vec<String>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.commands.len() + self.templates.len()
    }
}

/// Syncs sources into a template library directory.
pub struct Syncer {
    library_dir: PathBuf,
    config: SyncConfig,
}

impl Syncer {
    pub fn new(library_dir: impl Into<PathBuf>, config: SyncConfig) -> Self {
        Self {
            library_dir: library_dir.into(),
            config,
        }
    }

    pub fn target_dir(&self, source: SyncSource) -> PathBuf {
        self.library_dir.join(source.library_subdir())
    }

    /// Clone `source` and sync its templates into the library.
    pub async fn sync(&self, source: SyncSource) -> Result<SyncReport, SyncError> {
        let clone_dir = tempfile::tempdir().map_err(|e| SyncError::Io {
            path: std::env::temp_dir(),
            source: e,
        })?;
        let checkout = clone_dir.path().join("repo");
        git::shallow_clone(source.repository(&self.config), &checkout).await?;

        self.sync_from_checkout(source, &checkout)
    }

    /// Sync from an existing checkout of `source`.
    pub fn sync_from_checkout(
        &self,
        source: SyncSource,
        checkout: &Path,
    ) -> Result<SyncReport, SyncError> {
        let source_dir = checkout.join(source.template_path());
        let target_dir = self.target_dir(source);

        let (commands, templates) = match source {
            SyncSource::SpecKit => {
                let synced = speckit::sync_spec_kit(&source_dir, &target_dir)?;
                (synced.commands, synced.templates)
            }
            SyncSource::OpenSpec => (openspec::sync_openspec(&source_dir, &target_dir)?, Vec::new()),
        };

        write_index(&target_dir, source)?;

        tracing::info!(
            commands = commands.len(),
            templates = templates.len(),
            target = %target_dir.display(),
            "sync complete"
        );

        Ok(SyncReport {
            source,
            target_dir,
            commands,
            templates,
        })
    }
}

/// Write a template, creating parent directories.
pub(crate) fn write_template(path: &Path, content: &str) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SyncError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })
}
