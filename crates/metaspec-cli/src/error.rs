//! CLI error handling and formatting.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use metaspec_common_config::ConfigError;
use metaspec_definition::DefinitionError;
use metaspec_generator::TemplateError;
use metaspec_sync::SyncError;
use metaspec_toolkit::ToolkitError;
use thiserror::Error;

use crate::cli::OutputFormat;

pub mod formatter;

pub use formatter::ErrorFormatter;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        hint: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    Command {
        message: String,
        command: String,
        hint: Option<String>,
    },

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    /// A child process exited unsuccessfully; its code is passed through.
    #[error("process exited with status {code}")]
    Exit { code: u8 },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Command { .. } => "E007",
            Self::Toolkit(_) => "E009",
            Self::User { .. } => "E010",
            Self::Exit { .. } => "E011",
            Self::Other(_) => "E999",
        }
    }

    /// Get the process exit status for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::Command { .. } => 8,
            Self::Toolkit(e) => u8::try_from(e.exit_code()).unwrap_or(1),
            Self::Exit { code } => *code,
            Self::User { .. } => 1,
            Self::Other(_) => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::Command { hint, .. }
            | Self::User { hint, .. } => hint.clone(),
            Self::Toolkit(e) => e.hint(),
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Whether the error carries anything worth printing.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    pub fn not_found(resource_type: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self::not_found_with_suggestions(resource_type, resource_name, Vec::new())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a failed external command error
    pub fn command(
        message: impl Into<String>,
        command: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self::Command {
            message: message.into(),
            command: command.into(),
            hint,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Pass a child's exit code through. Codes outside `1..=255` become 1.
    pub fn exit(code: i32) -> Self {
        Self::Exit {
            code: u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1),
        }
    }
}

/// Print an error (if any) in the requested format and map it to an exit code.
pub fn handle_result<T>(result: Result<T, CliError>, format: OutputFormat, verbose: bool) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            if !error.is_silent() {
                let formatter = ErrorFormatter::new().verbose(verbose);
                match format {
                    OutputFormat::Json => eprintln!("{}", formatter.format_json(&error)),
                    OutputFormat::Text => formatter.print(&error),
                }
            }
            error.exit_code()
        }
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .metaspec/config.yaml or the file passed with --config".to_string()),
        }
    }
}

impl From<DefinitionError> for CliError {
    fn from(err: DefinitionError) -> Self {
        match err {
            DefinitionError::NotFound { path } => {
                Self::not_found("meta-spec file", path.display().to_string())
            }
            DefinitionError::Io { path, source } => Self::Io {
                message: format!("failed to read {}", path.display()),
                source,
                path: Some(path),
            },
            err @ (DefinitionError::Yaml { .. } | DefinitionError::Validation { .. }) => {
                Self::Validation {
                    message: err.to_string(),
                    hint: Some("Run `metaspec validate <file>` for a full report".to_string()),
                }
            }
        }
    }
}

impl From<TemplateError> for CliError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::AlreadyExists { path } => Self::user_with_hint(
                format!("Directory '{}' already exists", path.display()),
                "Use --force to overwrite or choose a different name",
            ),
            TemplateError::NotFound { key } => Self::not_found("template", key),
            TemplateError::Io { path, source } => Self::Io {
                message: format!("failed to write {}", path.display()),
                source,
                path: Some(path),
            },
            err @ (TemplateError::InvalidKey { .. } | TemplateError::Render { .. }) => {
                Self::Validation {
                    message: err.to_string(),
                    hint: Some("Check the template keys listed under templates.custom".to_string()),
                }
            }
        }
    }
}

impl From<SyncError> for CliError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::GitMissing => Self::command(
                err.to_string(),
                "git",
                Some("Install git and make sure it is on PATH".to_string()),
            ),
            SyncError::Git { ref url, .. } => Self::command(
                err.to_string(),
                format!("git clone {url}"),
                Some("Check the repository URL under sync in the config".to_string()),
            ),
            SyncError::SourceMissing { path } => {
                Self::not_found("template source", path.display().to_string())
            }
            SyncError::Io { path, source } => Self::Io {
                message: format!("failed to sync into {}", path.display()),
                source,
                path: Some(path),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("JSON serialization failed: {err}"))
    }
}
