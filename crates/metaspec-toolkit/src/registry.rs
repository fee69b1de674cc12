//! Toolkit discovery and dispatch.

use metaspec_common_config::ToolkitConfig;
use serde::Serialize;

use crate::{builtins, probe, BuiltinToolkit, SpecToolkit, ToolkitError, EXIT_NOT_FOUND};

/// Listing entry for one known toolkit.
#[derive(Debug, Clone, Serialize)]
pub struct ToolkitStatus {
    pub name: String,
    pub description: String,
    pub binary: String,
    pub commands: Vec<String>,
    pub builtin: bool,
    pub available: bool,
}

struct Entry {
    toolkit: Box<dyn SpecToolkit>,
    builtin: bool,
}

/// Builtin toolkits plus those declared in configuration.
pub struct ToolkitRegistry {
    entries: Vec<Entry>,
}

impl ToolkitRegistry {
    /// Registry of the builtins and `custom` toolkits. A custom toolkit with
    /// a builtin's name replaces the builtin.
    pub fn new(custom: &[ToolkitConfig]) -> Self {
        let mut entries: Vec<Entry> = builtins()
            .into_iter()
            .filter(|b| !custom.iter().any(|c| c.name == b.name()))
            .map(|toolkit| Entry {
                toolkit: Box::new(toolkit),
                builtin: true,
            })
            .collect();

        entries.extend(custom.iter().map(|config| Entry {
            toolkit: Box::new(BuiltinToolkit::from(config)),
            builtin: false,
        }));

        Self { entries }
    }

    /// Register an additional toolkit, replacing any with the same name.
    pub fn register(&mut self, toolkit: Box<dyn SpecToolkit>) {
        self.entries.retain(|e| e.toolkit.name() != toolkit.name());
        self.entries.push(Entry {
            toolkit,
            builtin: false,
        });
    }

    pub fn get(&self, name: &str) -> Option<&dyn SpecToolkit> {
        self.entries
            .iter()
            .find(|e| e.toolkit.name() == name)
            .map(|e| e.toolkit.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.toolkit.name()).collect()
    }

    /// Every known toolkit with its availability, builtins first.
    pub async fn list(&self) -> Vec<ToolkitStatus> {
        let mut statuses = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let toolkit = entry.toolkit.as_ref();
            statuses.push(ToolkitStatus {
                name: toolkit.name().to_string(),
                description: toolkit.description().to_string(),
                binary: toolkit.binary().to_string(),
                commands: toolkit.commands().to_vec(),
                builtin: entry.builtin,
                available: toolkit.is_available().await,
            });
        }
        statuses
    }

    /// Run `command` in the toolkit called `name` and return its exit code.
    ///
    /// Names the registry does not know are run directly as
    /// `<name> <command> [args...]`.
    pub async fn dispatch(
        &self,
        name: &str,
        command: &str,
        args: &[String],
    ) -> Result<i32, ToolkitError> {
        if let Some(toolkit) = self.get(name) {
            if !toolkit.is_available().await {
                return Err(ToolkitError::NotInstalled {
                    name: name.to_string(),
                    binary: toolkit.binary().to_string(),
                    hint: toolkit.install_hint().map(str::to_string),
                });
            }
            return Ok(toolkit.execute(command, args).await);
        }

        tracing::info!(toolkit = name, command, "trying unregistered toolkit");
        let argv: Vec<String> = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect();

        match probe::run(name, &argv).await {
            EXIT_NOT_FOUND if which::which(name).is_err() => Err(ToolkitError::Unknown {
                name: name.to_string(),
            }),
            code => Ok(code),
        }
    }
}

impl Default for ToolkitRegistry {
    fn default() -> Self {
        Self::new(&[])
    }
}
