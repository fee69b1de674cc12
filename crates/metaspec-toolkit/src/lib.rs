//! Spec toolkits: independently installed tools such as spec-kit and
//! OpenSpec that MetaSpec can discover and dispatch commands to.
//!
//! Every toolkit wraps an external binary. [`ToolkitRegistry`] knows the
//! builtins plus any toolkits declared in `.metaspec/config.yaml`, and falls
//! back to running unknown names directly as `<name> <command> [args...]`.

pub mod builtin;
pub mod probe;
pub mod registry;

use async_trait::async_trait;
use thiserror::Error;

pub use builtin::{builtins, BuiltinToolkit};
pub use registry::{ToolkitRegistry, ToolkitStatus};

/// Exit code reported when a toolkit binary cannot be started.
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("'{binary}' command not found")]
    NotInstalled {
        name: String,
        binary: String,
        hint: Option<String>,
    },

    #[error("toolkit '{name}' not found")]
    Unknown { name: String },
}

impl ToolkitError {
    /// Process exit code matching a shell's "command not found".
    pub fn exit_code(&self) -> i32 {
        EXIT_NOT_FOUND
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInstalled { name, hint, .. } => Some(match hint {
                Some(hint) => format!("Install {name} first: {hint}"),
                None => format!("Install {name} and make sure it is on PATH"),
            }),
            Self::Unknown { name } => Some(format!(
                "Install the toolkit (e.g. pip install {name}) or run `metaspec spec --list`"
            )),
        }
    }
}

/// A spec toolkit MetaSpec can drive.
#[async_trait]
pub trait SpecToolkit: Send + Sync {
    /// Name used on the `metaspec spec` command line.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> &str;

    /// Commands the toolkit advertises.
    fn commands(&self) -> &[String];

    /// Binary the toolkit runs.
    fn binary(&self) -> &str;

    fn install_hint(&self) -> Option<&str> {
        None
    }

    /// Whether the binary is installed and answers `--version`.
    async fn is_available(&self) -> bool {
        probe::is_available(self.binary()).await
    }

    /// Run `command` with `args` and return the process exit code.
    async fn execute(&self, command: &str, args: &[String]) -> i32;
}
