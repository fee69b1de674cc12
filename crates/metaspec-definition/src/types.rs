//! Meta-spec model types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Toolkit domain. Selects the domain template group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Generic,
    Mcp,
    Web,
    Ai,
}

impl Domain {
    /// All supported domains, in display order.
    pub const ALL: [Domain; 4] = [Domain::Generic, Domain::Mcp, Domain::Web, Domain::Ai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Mcp => "mcp",
            Self::Web => "web",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown domain '{s}'"))
    }
}

/// Whether the toolkit starts from scratch or is added to an existing project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Greenfield,
    Brownfield,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 2] = [Lifecycle::Greenfield, Lifecycle::Brownfield];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greenfield => "greenfield",
            Self::Brownfield => "brownfield",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field of the core entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// The core entity the toolkit's specs describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub name: String,
    pub fields: Vec<Field>,
}

/// An option of a generated toolkit command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(rename = "type")]
    pub option_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A command of the generated toolkit's CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }
}

/// Extra templates to render into the generated project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template keys such as `generic/spec-template.md.hbs`.
    #[serde(default)]
    pub custom: Vec<String>,
}

/// A parsed and validated meta-spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSpecDefinition {
    pub name: String,
    pub version: String,
    pub domain: Domain,
    pub lifecycle: Lifecycle,
    pub entity: EntityDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<TemplateConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl MetaSpecDefinition {
    /// Python package name derived from the toolkit name.
    pub fn package_name(&self) -> String {
        self.name.replace('-', "_").to_lowercase()
    }

    pub fn description_or_default(&self) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => format!("Spec-driven toolkit for {}", self.domain),
        }
    }

    /// Template keys listed under `templates.custom`.
    pub fn custom_templates(&self) -> &[String] {
        self.templates
            .as_ref()
            .map(|t| t.custom.as_slice())
            .unwrap_or_default()
    }

    /// Serialize back to a meta-spec YAML document.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
