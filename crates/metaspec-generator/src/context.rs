//! Template rendering context.

use metaspec_definition::MetaSpecDefinition;
use serde::Serialize;

/// Default value of `specs_dir`.
pub const DEFAULT_SPECS_DIR: &str = "specs";

/// Variables available to every template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub name: String,
    pub package_name: String,
    pub version: String,
    pub description: String,
    pub domain: String,
    pub lifecycle: String,
    pub entity: EntityContext,
    pub commands: Vec<CommandContext>,
    pub dependencies: Vec<String>,
    pub year: String,
    pub date: String,
    pub metaspec_version: String,

    // Placeholders used by generalized third-party command templates.
    pub toolkit_name: String,
    pub cli_name: String,
    pub cli_prefix: String,
    pub specs_dir: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityContext {
    pub name: String,
    pub fields: Vec<FieldContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandContext {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionContext {
    pub name: String,
    #[serde(rename = "type")]
    pub option_type: String,
    pub required: bool,
    pub description: String,
}

impl TemplateContext {
    pub fn from_meta_spec(def: &MetaSpecDefinition) -> Self {
        let now = chrono::Local::now();
        let package_name = def.package_name();

        let fields = def
            .entity
            .fields
            .iter()
            .map(|f| FieldContext {
                name: f.name.clone(),
                field_type: f.field_type.clone().unwrap_or_else(|| "str".to_string()),
                required: f.required,
                description: f.description.clone().unwrap_or_default(),
            })
            .collect();

        let commands = def
            .commands
            .iter()
            .map(|c| CommandContext {
                name: c.name.clone(),
                description: c.description.clone(),
                options: c
                    .options
                    .iter()
                    .map(|o| OptionContext {
                        name: o.name.clone(),
                        option_type: o.option_type.clone(),
                        required: o.required,
                        description: o.description.clone().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: def.name.clone(),
            package_name: package_name.clone(),
            version: def.version.clone(),
            description: def.description_or_default(),
            domain: def.domain.to_string(),
            lifecycle: def.lifecycle.to_string(),
            entity: EntityContext {
                name: def.entity.name.clone(),
                fields,
            },
            commands,
            dependencies: def.dependencies.clone(),
            year: now.format("%Y").to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            metaspec_version: env!("CARGO_PKG_VERSION").to_string(),
            toolkit_name: def.name.clone(),
            cli_name: def.name.clone(),
            cli_prefix: package_name,
            specs_dir: DEFAULT_SPECS_DIR.to_string(),
        }
    }

    pub fn with_specs_dir(mut self, specs_dir: impl Into<String>) -> Self {
        self.specs_dir = specs_dir.into();
        self
    }
}
