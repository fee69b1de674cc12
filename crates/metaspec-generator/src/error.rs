//! Generation errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {key}")]
    NotFound { key: String },

    #[error("invalid template key '{key}': expected <group>/<file>.hbs inside the template directory")]
    InvalidKey { key: String },

    #[error("failed to render template {key}: {message}")]
    Render { key: String, message: String },

    #[error("output directory already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
