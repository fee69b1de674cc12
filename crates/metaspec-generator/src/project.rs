//! Generated project tree.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::TemplateError;

/// A generated toolkit project, held in memory until written.
#[derive(Debug, Clone, Default)]
pub struct ToolkitProject {
    pub root_path: PathBuf,
    /// Relative path to file content.
    pub files: BTreeMap<PathBuf, String>,
    /// Relative directories to create, including empty ones.
    pub directories: BTreeSet<PathBuf>,
    /// Relative paths marked executable after writing.
    pub executable_files: Vec<PathBuf>,
}

impl ToolkitProject {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    /// Add a file and record its parent directory.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if parent != Path::new("") {
                self.directories.insert(parent.to_path_buf());
            }
        }
        self.files.insert(path, content);
    }

    pub fn add_executable(&mut self, path: impl Into<PathBuf>, content: String) {
        let path = path.into();
        self.add_file(path.clone(), content);
        self.executable_files.push(path);
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.directories.insert(path.into());
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Relative file paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Write the project under `root_path`.
    ///
    /// Writes go straight to their final paths; a failure part way through
    /// leaves the files written so far in place.
    pub fn write_to_disk(&self, force: bool) -> Result<(), TemplateError> {
        if self.root_path.exists() && !force {
            return Err(TemplateError::AlreadyExists {
                path: self.root_path.clone(),
            });
        }

        std::fs::create_dir_all(&self.root_path).map_err(TemplateError::io(&self.root_path))?;

        for dir in &self.directories {
            let path = self.root_path.join(dir);
            std::fs::create_dir_all(&path).map_err(TemplateError::io(&path))?;
        }

        for (relative, content) in &self.files {
            let path = self.root_path.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(TemplateError::io(parent))?;
            }
            std::fs::write(&path, content).map_err(TemplateError::io(&path))?;
        }

        #[cfg(unix)]
        for relative in &self.executable_files {
            use std::os::unix::fs::PermissionsExt;

            let path = self.root_path.join(relative);
            if path.exists() {
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                    .map_err(TemplateError::io(&path))?;
            }
        }

        tracing::info!(
            root = %self.root_path.display(),
            files = self.files.len(),
            directories = self.directories.len(),
            "wrote toolkit project"
        );
        Ok(())
    }
}
