//! Toolkits backed by an external binary.

use async_trait::async_trait;
use metaspec_common_config::ToolkitConfig;

use crate::{probe, SpecToolkit};

const UNKNOWN_VERSION: &str = "unknown";

/// A toolkit that forwards `<command> [args...]` to its binary.
///
/// The builtins and toolkits declared in configuration are both this type.
#[derive(Debug, Clone)]
pub struct BuiltinToolkit {
    name: String,
    version: String,
    description: String,
    binary: String,
    commands: Vec<String>,
    install_hint: Option<String>,
}

impl BuiltinToolkit {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        binary: impl Into<String>,
        commands: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            version: UNKNOWN_VERSION.to_string(),
            description: description.into(),
            binary: binary.into(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
            install_hint: None,
        }
    }

    pub fn with_install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = Some(hint.into());
        self
    }

    /// spec-kit: greenfield spec-driven development.
    pub fn spec_kit() -> Self {
        Self::new(
            "spec-kit",
            "Spec-driven development (greenfield)",
            "specify",
            &["init", "spec", "plan", "tasks"],
        )
        .with_install_hint("pip install git+https://github.com/github/spec-kit.git")
    }

    /// OpenSpec: brownfield specification updates.
    pub fn openspec() -> Self {
        Self::new(
            "openspec",
            "Spec-driven updates (brownfield)",
            "openspec",
            &["init", "analyze", "plan", "implement"],
        )
        .with_install_hint("pip install git+https://github.com/Fission-AI/OpenSpec.git")
    }
}

impl From<&ToolkitConfig> for BuiltinToolkit {
    fn from(config: &ToolkitConfig) -> Self {
        Self {
            name: config.name.clone(),
            version: UNKNOWN_VERSION.to_string(),
            description: config.description.clone(),
            binary: config.command.clone(),
            commands: config.commands.clone(),
            install_hint: config.install_hint.clone(),
        }
    }
}

#[async_trait]
impl SpecToolkit for BuiltinToolkit {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn commands(&self) -> &[String] {
        &self.commands
    }

    fn binary(&self) -> &str {
        &self.binary
    }

    fn install_hint(&self) -> Option<&str> {
        self.install_hint.as_deref()
    }

    async fn execute(&self, command: &str, args: &[String]) -> i32 {
        let argv: Vec<String> = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect();
        tracing::info!(toolkit = %self.name, binary = %self.binary, command, "executing");
        probe::run(&self.binary, &argv).await
    }
}

/// The toolkits MetaSpec knows without configuration.
pub fn builtins() -> Vec<BuiltinToolkit> {
    vec![BuiltinToolkit::spec_kit(), BuiltinToolkit::openspec()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXIT_NOT_FOUND;

    #[test]
    fn test_builtin_definitions() {
        let spec_kit = BuiltinToolkit::spec_kit();
        assert_eq!(spec_kit.binary(), "specify");
        assert_eq!(spec_kit.commands(), ["init", "spec", "plan", "tasks"]);
        assert_eq!(spec_kit.version(), "unknown");

        let openspec = BuiltinToolkit::openspec();
        assert_eq!(openspec.binary(), "openspec");
        assert_eq!(openspec.commands(), ["init", "analyze", "plan", "implement"]);
        assert!(openspec.install_hint().unwrap().contains("Fission-AI/OpenSpec"));
    }

    #[test]
    fn test_from_config() {
        let config = ToolkitConfig {
            name: "acme".to_string(),
            command: "acme-cli".to_string(),
            description: "Acme specs".to_string(),
            commands: vec!["check".to_string()],
            install_hint: None,
        };

        let toolkit = BuiltinToolkit::from(&config);
        assert_eq!(toolkit.name(), "acme");
        assert_eq!(toolkit.binary(), "acme-cli");
        assert_eq!(toolkit.commands(), ["check"]);
        assert!(toolkit.install_hint().is_none());
    }

    #[tokio::test]
    async fn test_execute_missing_binary() {
        let toolkit = BuiltinToolkit::new("ghost", "", "metaspec-no-such-binary", &[]);
        assert!(!toolkit.is_available().await);
        assert_eq!(toolkit.execute("init", &[]).await, EXIT_NOT_FOUND);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_passes_command_first() {
        let toolkit = BuiltinToolkit::new("shell", "", "sh", &[]);
        let code = toolkit.execute("-c", &["exit 4".to_string()]).await;
        assert_eq!(code, 4);
    }
}
